use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// closed set of application roles.
///
/// adding a role is a new variant; every gating site matches exhaustively
/// so the compiler walks each one when the set grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct FromStrError;

impl FromStr for Role {
    type Err = FromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(FromStrError),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = FromStrError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_str(s)
    }
}

impl TryFrom<String> for Role {
    type Error = FromStrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn role_str_round_trip() {
        for role in [Role::User, Role::Admin] {
            let Ok(parsed) = Role::from_str(role.as_str()) else {
                panic!("failed to parse role string {:?}", role.as_str());
            };

            assert_eq!(parsed, role);
        }

        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("Admin").is_err(), "role strings are lowercase");
    }
}
