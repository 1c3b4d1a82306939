//! Durable Key-Value Storage
//!
//! String slots keyed by name. The browser build uses `window.localStorage`.

use crate::error::{AppError, AppResult};

/// Synchronous string-keyed slots, scoped to the browser profile
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn handle() -> AppResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| AppError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| AppError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        Self::handle()?
            .remove_item(key)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;
