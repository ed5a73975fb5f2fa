//! Storage abstraction for saved maps.
//!
//! Backends store the scene's JSON save format under a document name.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::format::LoadError;
use crate::scene::Scene;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid map data: {0}")]
    Invalid(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for map storage backends.
pub trait Storage: Send + Sync {
    /// Save a scene.
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()>;

    /// Load a scene.
    fn load(&self, id: &str) -> StorageResult<Scene>;

    /// Delete a scene. Deleting a missing scene is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all stored names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a scene exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}

fn encode(scene: &Scene) -> StorageResult<String> {
    scene
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))
}
