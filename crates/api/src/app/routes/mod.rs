pub mod assets;
pub mod payments;
pub mod requests;
pub mod session;
pub mod users;
