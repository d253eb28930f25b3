//! Request workflow: employees ask for assets, HR managers decide.

pub mod request;
pub mod service;

pub use request::{AssetRequest, NewRequest, RequestFilter, RequestStatus};
pub use service::RequestService;
