//! Whole-document key/value storage
//!
//! The score list is stored as a single JSON document that is read and
//! rewritten in full; stores here only move that document around.

use std::cell::RefCell;

use crate::error::StoreError;

/// A single stored document
pub trait RecordStore {
    /// Current document, `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// Replace the document
    fn write(&self, document: &str) -> Result<(), StoreError>;
}

/// In-process store (tests, headless runs)
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document.borrow().clone())
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        *self.document.borrow_mut() = Some(document.to_string());
        Ok(())
    }
}

impl<T: RecordStore + ?Sized> RecordStore for std::rc::Rc<T> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        (**self).write(document)
    }
}

/// JSON file on disk (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        // Readers only ever see a complete list
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, document)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage under a fixed key
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, document)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read().unwrap().is_none());
        store.write("[]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("[]"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_missing_is_empty() {
        let path = std::env::temp_dir().join(format!("dino_run_missing_{}.json", std::process::id()));
        let store = FileStore::new(&path);
        assert!(store.read().unwrap().is_none());
        store.write("[1]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("[1]"));
        let _ = std::fs::remove_file(&path);
    }
}
