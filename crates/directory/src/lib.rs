//! Directory of user records: signup, invitation upsert, lookup, team edits.

pub mod service;
pub mod user;

pub use service::{DirectoryService, UpsertOutcome};
pub use user::{
    EmployeeSignup, GenericSignup, HrManagerSignup, ProfilePatch, TeamMembership, User, UserStatus,
};
