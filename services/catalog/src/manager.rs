//! Product record manager
//!
//! Owns the product lifecycle: ownership resolution on create, image blob
//! replacement on update, blob release on delete, and the routing flag that
//! tells the caller which back-office variant the affected product belongs to.

use std::sync::Arc;

use chrono::Utc;
use common::blob::BlobStore;
use common::error::{BlobError, DatabaseError};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::models::{NewProduct, Outcome, Product, ProductChanges, RoutingFlag};
use crate::repositories::{ProductStore, UserDirectory};
use crate::validation::{self, ProductForm, UNKNOWN_OWNER, ValidationErrors};

/// Namespace product images are stored under
pub const IMAGE_NAMESPACE: &str = "products";

pub const CREATED_MESSAGE: &str = "Product created successfully!";
pub const SAVED_MESSAGE: &str = "Product saved successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully.";

/// Failures of a catalog operation
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("product {0} not found")]
    NotFound(Uuid),

    #[error("record store failure: {0}")]
    Records(#[from] DatabaseError),

    #[error("blob store failure: {0}")]
    Blobs(#[from] BlobError),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Create, read, update and delete operations on products
#[derive(Clone)]
pub struct ProductManager {
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserDirectory>,
    blobs: Arc<dyn BlobStore>,
}

impl ProductManager {
    pub fn new(
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserDirectory>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            products,
            users,
            blobs,
        }
    }

    /// All products, unfiltered and unpaginated
    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.list_all().await?)
    }

    /// A single product, for the edit form
    pub async fn find(&self, id: Uuid) -> CatalogResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Validate a create form
    ///
    /// When some field is invalid, an unknown `owner_id` is reported in the
    /// same set of errors. A valid form has its owner checked by [`create`].
    ///
    /// [`create`]: ProductManager::create
    pub async fn validate_create(&self, form: &ProductForm) -> CatalogResult<NewProduct> {
        let mut errors = match validation::validate_create(form) {
            Ok(input) => return Ok(input),
            Err(errors) => errors,
        };

        if let Some(owner_id) = validation::owner_id(form) {
            if self.users.find_by_id(owner_id).await?.is_none() {
                errors.add("owner_id", UNKNOWN_OWNER);
            }
        }

        Err(errors.into())
    }

    /// Create a product owned by `input.owner_id`, or by `acting_user` when
    /// no owner was chosen.
    ///
    /// Any caller may assign the product to another user; no role check is
    /// applied to `owner_id`.
    pub async fn create(
        &self,
        input: NewProduct,
        acting_user: &AuthUser,
    ) -> CatalogResult<Outcome> {
        let owner_id = match input.owner_id {
            Some(owner_id) => {
                if self.users.find_by_id(owner_id).await?.is_none() {
                    let mut errors = ValidationErrors::new();
                    errors.add("owner_id", UNKNOWN_OWNER);
                    return Err(errors.into());
                }
                owner_id
            }
            None => acting_user.id,
        };

        let image = match input.image {
            Some(object) => Some(self.blobs.put(IMAGE_NAMESPACE, object).await?),
            None => None,
        };

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            user_id: owner_id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            description: input.description,
            wa: input.wa,
            ig: input.ig,
            image,
            created_at: now,
            updated_at: now,
        };

        let product = self.products.insert(&product).await?;
        info!(
            "Product {} created by {} for owner {}",
            product.id, acting_user.id, product.user_id
        );

        Ok(Outcome {
            message: CREATED_MESSAGE,
            from: RoutingFlag::from(acting_user.role),
        })
    }

    /// Replace the fields of product `id`, swapping its image when a new one
    /// is supplied.
    ///
    /// The old blob is deleted before the new one is written; a failed delete
    /// aborts before the record is touched.
    pub async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<Outcome> {
        let mut product = self.find(id).await?;

        changes.apply_to(&mut product);

        if let Some(object) = changes.image {
            if let Some(old_key) = product.image.take() {
                self.blobs.delete(&old_key).await?;
            }
            product.image = Some(self.blobs.put(IMAGE_NAMESPACE, object).await?);
        }

        let product = self.products.update(&product).await?;
        info!("Product {} updated", product.id);

        Ok(Outcome {
            message: SAVED_MESSAGE,
            from: self.owner_flag(&product).await,
        })
    }

    /// Delete product `id` and its image.
    ///
    /// The routing flag is computed first since the owner link is gone once
    /// the record is removed. Blob then record.
    pub async fn destroy(&self, id: Uuid) -> CatalogResult<Outcome> {
        let product = self.find(id).await?;
        let from = self.owner_flag(&product).await;

        if let Some(key) = &product.image {
            self.blobs.delete(key).await?;
        }
        self.products.delete(product.id).await?;
        info!("Product {} deleted", product.id);

        Ok(Outcome {
            message: DELETED_MESSAGE,
            from,
        })
    }

    /// Flag for the product's owner; `mitra` when the owner is unknown or
    /// cannot be looked up.
    async fn owner_flag(&self, product: &Product) -> RoutingFlag {
        match self.users.find_by_id(product.user_id).await {
            Ok(owner) => owner
                .map(|user| RoutingFlag::from(user.role))
                .unwrap_or(RoutingFlag::Mitra),
            Err(e) => {
                warn!(
                    "Could not resolve owner {} of product {}: {}",
                    product.user_id, product.id, e
                );
                RoutingFlag::Mitra
            }
        }
    }
}
