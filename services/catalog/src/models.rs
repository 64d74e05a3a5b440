//! Catalog models for records, users and response payloads

use serde::{Deserialize, Serialize};

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductChanges};
pub use user::{Role, User};

/// Which back-office variant a response is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingFlag {
    Admin,
    Mitra,
}

impl From<Role> for RoutingFlag {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => RoutingFlag::Admin,
            Role::Partner => RoutingFlag::Mitra,
        }
    }
}

/// Outcome of a create, update or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: &'static str,
    pub from: RoutingFlag,
}

/// Flash-style success payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: String,
    pub from: RoutingFlag,
}

impl From<Outcome> for SuccessResponse {
    fn from(outcome: Outcome) -> Self {
        Self {
            success: outcome.message.to_string(),
            from: outcome.from,
        }
    }
}

/// Machine-readable delete acknowledgment
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
