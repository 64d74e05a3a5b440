//! Users as seen by the catalog
//!
//! Users are owned by the identity provider; the catalog only reads them to
//! check that an owner exists and to look up its role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Back-office role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Partner,
}

impl Role {
    /// Only the exact value `admin` grants the admin role.
    pub fn from_name(name: &str) -> Self {
        if name == "admin" {
            Role::Admin
        } else {
            Role::Partner
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name_is_exact() {
        assert_eq!(Role::from_name("admin"), Role::Admin);
        assert_eq!(Role::from_name("Admin"), Role::Partner);
        assert_eq!(Role::from_name("mitra"), Role::Partner);
        assert_eq!(Role::from_name(""), Role::Partner);
    }
}
