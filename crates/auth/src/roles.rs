use core::str::FromStr;

use serde::{Deserialize, Serialize};

use assetdesk_core::DomainError;

/// Fixed access-control roles.
///
/// The wire spelling ("HRManager" / "Employee") matches what the frontend
/// sends and what the directory stores; keep it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HRManager")]
    HrManager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HrManager => "HRManager",
            Role::Employee => "Employee",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HRManager" => Ok(Role::HrManager),
            "Employee" => Ok(Role::Employee),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_spelling_round_trips() {
        let json = serde_json::to_string(&Role::HrManager).unwrap();
        assert_eq!(json, "\"HRManager\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::HrManager);
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        assert!(Role::from_str("Admin").is_err());
    }
}
