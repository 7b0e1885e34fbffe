//! Products catalog module.
//!
//! Holds the `Product` entity with its declarative constraint table, the
//! storage capability products are persisted through, and the thin service
//! that forwards to it. No IO happens here beyond what a repository does.

pub mod product;
pub mod repository;
pub mod service;

pub use product::{Product, ProductStatus, validate};
pub use repository::{InMemoryProductRepository, ProductRepository, StorageError};
pub use service::{ProductService, ServiceError};
