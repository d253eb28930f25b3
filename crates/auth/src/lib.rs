//! `assetdesk-auth` — credential and session boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it signs and
//! verifies session tokens, hashes credentials, and defines the capability
//! lookup seam the access guard re-checks roles through.

pub mod capabilities;
pub mod claims;
pub mod password;
pub mod roles;
pub mod token;

pub use capabilities::CapabilityResolver;
pub use claims::{SESSION_TTL_DAYS, SessionClaims};
pub use password::{PasswordError, hash_password, verify_password};
pub use roles::Role;
pub use token::{Hs256TokenService, TokenError, TokenService};
