use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assetdesk_auth::Role;
use assetdesk_core::UserId;

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    /// Signed up directly and confirmed.
    Verified,
    /// Member of a company team.
    Active,
    /// Invited; waiting to be picked up by an HR manager.
    Requested,
}

/// A user document.
///
/// Relationships to company and package are soft (string-keyed); nothing in
/// the store enforces them. The email is the unique key the directory
/// guards on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,

    /// Argon2 PHC string. Absent for identities that authenticate externally
    /// or were created through the invitation flow without a credential.
    pub password_hash: Option<String>,

    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub image: Option<String>,

    /// `None` for generic signups that never picked a role.
    pub role: Option<Role>,
    pub status: Option<UserStatus>,

    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub package_name: Option<String>,
    pub member_limit: Option<u32>,

    pub timestamp: DateTime<Utc>,
}

/// Signup payload for an HR manager owning a company tenant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrManagerSignup {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub package_name: Option<String>,
    pub member_limit: Option<u32>,
}

/// Signup payload for an employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSignup {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Shared signup payload used by the generic `/user` route and the
/// invitation upsert flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericSignup {
    pub email: String,
    pub password: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub image: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub package_name: Option<String>,
    pub member_limit: Option<u32>,
}

/// Field-whitelisted patch for profile updates.
///
/// `role` and `status` are listed here but only applied for HR-manager
/// callers; the service enforces that.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub image: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub package_name: Option<String>,
    pub member_limit: Option<u32>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

/// Team-membership edit an HR manager applies to a user by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub role: Option<Role>,
}
