//! Product records and the typed inputs that create or change them

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::blob::BlobObject;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub wa: Option<String>,
    pub ig: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub wa: Option<String>,
    pub ig: Option<String>,
    pub image: Option<BlobObject>,
    pub owner_id: Option<Uuid>,
}

/// Validated update payload
///
/// Optional text fields use `None` for "not submitted" and `Some(None)` for
/// "submitted empty", which clears the stored value.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<Option<String>>,
    pub wa: Option<Option<String>>,
    pub ig: Option<Option<String>>,
    pub image: Option<BlobObject>,
}

impl ProductChanges {
    /// Overwrite the fields of `product` carried by this change set.
    /// The image key is handled by the caller.
    pub fn apply_to(&self, product: &mut Product) {
        product.name.clone_from(&self.name);
        product.price = self.price;
        product.stock = self.stock;

        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(wa) = &self.wa {
            product.wa.clone_from(wa);
        }
        if let Some(ig) = &self.ig {
            product.ig.clone_from(ig);
        }
    }
}
