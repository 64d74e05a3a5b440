#![cfg(test)]
//! In-memory stores for tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use common::blob::{BlobObject, BlobStore, object_key};
use common::error::{BlobError, BlobResult, DatabaseError, DatabaseResult};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::manager::ProductManager;
use crate::middleware::AuthUser;
use crate::models::{Product, Role, User};
use crate::repositories::{ProductStore, UserDirectory};

#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn all(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Product> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> DatabaseResult<Vec<Product>> {
        Ok(self.all())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Product>> {
        Ok(self.get(id))
    }

    async fn insert(&self, product: &Product) -> DatabaseResult<Product> {
        self.rows.lock().unwrap().push(product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> DatabaseResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let mut updated = product.clone();
        updated.updated_at = Utc::now();
        if let Some(row) = rows.iter_mut().find(|p| p.id == product.id) {
            *row = updated.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserDirectory {
    users: Mutex<HashMap<Uuid, User>>,
    unavailable: Mutex<bool>,
}

impl MemoryUserDirectory {
    pub fn add(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    /// Make every later lookup fail
    pub fn go_offline(&self) {
        *self.unavailable.lock().unwrap() = true;
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        if *self.unavailable.lock().unwrap() {
            return Err(DatabaseError::Configuration(
                "user directory unavailable".to_string(),
            ));
        }
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCall {
    Put(String),
    Delete(String),
}

/// Blob store that keeps keys in memory and records every call
#[derive(Default)]
pub struct RecordingBlobStore {
    keys: Mutex<HashSet<String>>,
    calls: Mutex<Vec<BlobCall>>,
    fail_deletes: Mutex<bool>,
}

impl RecordingBlobStore {
    pub fn seed(&self, key: &str) {
        self.keys.lock().unwrap().insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.lock().unwrap().contains(key)
    }

    pub fn calls(&self) -> Vec<BlobCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_deletes(&self) {
        *self.fail_deletes.lock().unwrap() = true;
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn put(&self, namespace: &str, object: BlobObject) -> BlobResult<String> {
        let key = object_key(namespace, object.extension.as_deref());
        self.keys.lock().unwrap().insert(key.clone());
        self.calls.lock().unwrap().push(BlobCall::Put(key.clone()));
        Ok(key)
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        if *self.fail_deletes.lock().unwrap() {
            return Err(BlobError::Backend("delete refused".to_string()));
        }
        self.keys.lock().unwrap().remove(key);
        self.calls
            .lock()
            .unwrap()
            .push(BlobCall::Delete(key.to_string()));
        Ok(())
    }
}

/// A manager wired to in-memory stores
pub struct Fixture {
    pub manager: ProductManager,
    pub products: Arc<MemoryProductStore>,
    pub users: Arc<MemoryUserDirectory>,
    pub blobs: Arc<RecordingBlobStore>,
}

impl Fixture {
    pub fn new() -> Self {
        let products = Arc::new(MemoryProductStore::default());
        let users = Arc::new(MemoryUserDirectory::default());
        let blobs = Arc::new(RecordingBlobStore::default());
        let manager = ProductManager::new(products.clone(), users.clone(), blobs.clone());

        Self {
            manager,
            products,
            users,
            blobs,
        }
    }

    /// Register a user and return it as an authenticated actor
    pub fn user(&self, role: Role) -> AuthUser {
        let id = Uuid::new_v4();
        self.users.add(User {
            id,
            name: format!("user-{id}"),
            email: format!("{id}@example.com"),
            role,
        });
        AuthUser { id, role }
    }

    /// Seed a product directly into the record store, bypassing the manager
    pub fn product(&self, owner: Uuid, image: Option<&str>) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            user_id: owner,
            name: "Shirt".to_string(),
            price: Decimal::new(50000, 0),
            stock: 10,
            description: Some("Cotton shirt".to_string()),
            wa: None,
            ig: None,
            image: image.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        if let Some(key) = image {
            self.blobs.seed(key);
        }
        self.products.rows.lock().unwrap().push(product.clone());
        product
    }
}
