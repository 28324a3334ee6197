//! Storage abstractions for the service layer.
//!
//! A collection is always loaded and saved whole; callers own the
//! read-modify-write cycle.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_file_store;

pub use json_file_store::JsonFileStore;

/// Port for a durable, ordered collection of records.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync {
    /// Read the full collection.
    async fn load(&self) -> Result<Vec<T>, ServiceError>;
    /// Replace the full collection.
    async fn save(&self, items: &[T]) -> Result<(), ServiceError>;
    /// Human-readable location for logs.
    fn location(&self) -> String;
}
