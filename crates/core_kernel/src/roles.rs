//! Portal roles
//!
//! Every authenticated user carries exactly one role; the demand pipeline
//! and the HTTP layer both branch on it. Wire names keep the portal's
//! historical French vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a portal user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Society member: submits demands and registers dependents
    #[serde(rename = "membre")]
    Member,
    /// First-stage reviewer: accepts or rejects pending demands
    #[serde(rename = "controleur")]
    Controller,
    /// Final-stage reviewer and user manager
    #[serde(rename = "administrateur")]
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "membre",
            Role::Controller => "controleur",
            Role::Administrator => "administrateur",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "membre" => Ok(Role::Member),
            "controleur" => Ok(Role::Controller),
            "administrateur" => Ok(Role::Administrator),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for role strings outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for role in [Role::Member, Role::Controller, Role::Administrator] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!("superviseur".parse::<Role>().is_err());
    }
}
