//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult, encode};
use crate::scene::Scene;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Scenes are kept in their serialized form, so loading goes through the same
/// validation as any other saved map.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `id` without checking it.
    pub fn insert_raw(&self, id: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.insert(id.to_string(), json.into());
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()> {
        let json = encode(scene)?;
        self.insert_raw(id, json)
    }

    fn load(&self, id: &str) -> StorageResult<Scene> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let json = docs
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        Ok(Scene::from_json(json)?)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let mut ids: Vec<String> = docs.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.contains_key(id))
    }
}
