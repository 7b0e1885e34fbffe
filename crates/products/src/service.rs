//! Product service: pass-through to the storage collaborator.

use thiserror::Error;
use tracing::{debug, warn};

use catalog_core::{ProductId, Violations};

use crate::product::{Product, validate};
use crate::repository::{ProductRepository, StorageError};

/// Error returned by [`ProductService::create`].
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("product is invalid: {0}")]
    Invalid(Violations),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Forwards products to a [`ProductRepository`].
///
/// Apart from [`ProductService::create`], no operation validates, retries or
/// rewrites anything: storage's answer, success or error, is returned as is.
#[derive(Debug, Clone)]
pub struct ProductService<R> {
    repository: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Save a product. The caller is expected to have validated it.
    pub fn save(&self, product: Product) -> Result<Product, StorageError> {
        debug!(product_id = ?product.id, "saving product");
        self.repository.save(product).inspect_err(log_storage_error)
    }

    /// Save an existing product; same contract as [`ProductService::save`].
    pub fn update(&self, product: Product) -> Result<Product, StorageError> {
        debug!(product_id = ?product.id, "updating product");
        self.repository.save(product).inspect_err(log_storage_error)
    }

    pub fn find_one(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        debug!(product_id = %id, "fetching product");
        self.repository.find_by_id(id).inspect_err(log_storage_error)
    }

    pub fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        debug!("fetching all products");
        self.repository.find_all().inspect_err(log_storage_error)
    }

    pub fn delete(&self, id: &ProductId) -> Result<(), StorageError> {
        debug!(product_id = %id, "deleting product");
        self.repository.delete_by_id(id).inspect_err(log_storage_error)
    }

    /// Validate, then save. Invalid products never reach storage.
    pub fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let violations = validate(&product);
        if !violations.is_empty() {
            warn!(count = violations.len(), %violations, "rejecting invalid product");
            return Err(ServiceError::Invalid(violations));
        }
        Ok(self.save(product)?)
    }
}

fn log_storage_error(err: &StorageError) {
    warn!(error = %err, "storage reported an error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::product::{ProductStatus, fields};
    use crate::repository::InMemoryProductRepository;

    /// Storage double: answers `save` with a configured result and records inputs.
    struct StubRepository {
        on_save: Option<Result<Product, StorageError>>,
        saved: Mutex<Vec<Product>>,
    }

    impl StubRepository {
        /// Returns whatever it is given.
        fn identity() -> Self {
            Self {
                on_save: None,
                saved: Mutex::new(Vec::new()),
            }
        }

        fn returning(result: Result<Product, StorageError>) -> Self {
            Self {
                on_save: Some(result),
                saved: Mutex::new(Vec::new()),
            }
        }

        fn saved(&self) -> Vec<Product> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl ProductRepository for StubRepository {
        fn save(&self, product: Product) -> Result<Product, StorageError> {
            self.saved.lock().unwrap().push(product.clone());
            match &self.on_save {
                Some(result) => result.clone(),
                None => Ok(product),
            }
        }

        fn find_by_id(&self, _id: &ProductId) -> Result<Option<Product>, StorageError> {
            Err(StorageError::Unavailable("stub".into()))
        }

        fn find_all(&self) -> Result<Vec<Product>, StorageError> {
            Err(StorageError::Unavailable("stub".into()))
        }

        fn delete_by_id(&self, _id: &ProductId) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("stub".into()))
        }
    }

    fn valid_product() -> Product {
        Product::new()
            .with_title("Producto Válido")
            .with_price(Decimal::new(9999, 2))
            .with_status(ProductStatus::InStock)
            .with_date_added(Utc::now())
    }

    #[test]
    fn save_returns_what_storage_returns() {
        let product = valid_product();
        let service = ProductService::new(StubRepository::identity());

        let created = service.save(product.clone()).unwrap();

        assert_eq!(created, product);
        assert_eq!(created.title.as_deref(), Some("Producto Válido"));
        assert_eq!(created.price, Some(Decimal::new(9999, 2)));
        assert_eq!(service.repository().saved(), vec![product]);
    }

    #[test]
    fn save_does_not_rewrite_storage_answer() {
        let stored = valid_product().with_id(ProductId::new()).with_title("Stored title");
        let service = ProductService::new(StubRepository::returning(Ok(stored.clone())));

        assert_eq!(service.save(valid_product()).unwrap(), stored);
    }

    #[test]
    fn save_does_not_validate() {
        let service = ProductService::new(StubRepository::identity());
        let invalid = Product::new().with_title("ab");

        assert_eq!(service.save(invalid.clone()).unwrap(), invalid);
    }

    #[test]
    fn save_propagates_storage_errors_unchanged() {
        let err = StorageError::Unavailable("connection refused".into());
        let service = ProductService::new(StubRepository::returning(Err(err.clone())));

        assert_eq!(service.save(valid_product()), Err(err));
    }

    #[test]
    fn create_rejects_invalid_product_without_touching_storage() {
        let service = ProductService::new(StubRepository::identity());
        let product = valid_product().with_price(Decimal::new(-1, 0));

        match service.create(product).unwrap_err() {
            ServiceError::Invalid(violations) => {
                assert!(violations.contains(fields::PRICE, "must be greater than or equal to 0"));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
        assert!(service.repository().saved().is_empty());
    }

    #[test]
    fn create_surfaces_storage_errors() {
        let err = StorageError::Constraint("duplicate title".into());
        let service = ProductService::new(StubRepository::returning(Err(err.clone())));

        assert_eq!(service.create(valid_product()), Err(ServiceError::Storage(err)));
    }

    #[test]
    fn crud_round_trip_through_in_memory_storage() {
        catalog_observability::init();
        let service = ProductService::new(InMemoryProductRepository::new());

        let saved = service.create(valid_product()).unwrap();
        let id = saved.id.unwrap();
        assert_eq!(service.find_one(&id).unwrap(), Some(saved.clone()));

        let updated = service.update(saved.with_quantity_in_stock(7)).unwrap();
        assert_eq!(updated.quantity_in_stock, Some(7));
        assert_eq!(service.find_all().unwrap(), vec![updated]);

        service.delete(&id).unwrap();
        assert_eq!(service.find_one(&id).unwrap(), None);
        assert_eq!(service.delete(&id), Err(StorageError::NotFound(id)));
    }
}
