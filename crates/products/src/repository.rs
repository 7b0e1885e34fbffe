//! Storage capability for products.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use catalog_core::ProductId;

use crate::product::Product;

/// Failure signalled by a storage collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage constraint failed: {0}")]
    Constraint(String),

    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Persistence capability products are stored through.
///
/// Implementations own all storage state; callers treat the returned values
/// as authoritative.
pub trait ProductRepository: Send + Sync {
    /// Persist `product` and return the stored record.
    fn save(&self, product: Product) -> Result<Product, StorageError>;
    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError>;
    fn find_all(&self) -> Result<Vec<Product>, StorageError>;
    fn delete_by_id(&self, id: &ProductId) -> Result<(), StorageError>;
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    fn save(&self, product: Product) -> Result<Product, StorageError> {
        (**self).save(product)
    }

    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        (**self).find_all()
    }

    fn delete_by_id(&self, id: &ProductId) -> Result<(), StorageError> {
        (**self).delete_by_id(id)
    }
}

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("product store lock poisoned".to_string())
}

impl ProductRepository for InMemoryProductRepository {
    fn save(&self, mut product: Product) -> Result<Product, StorageError> {
        let id = *product.id.get_or_insert_with(ProductId::new);
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(id, product.clone());
        Ok(product)
    }

    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut all: Vec<Product> = map.values().cloned().collect();
        // UUIDv7 ids sort by creation time.
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    fn delete_by_id(&self, id: &ProductId) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(id).map(|_| ()).ok_or(StorageError::NotFound(*id))
    }
}
