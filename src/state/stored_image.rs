//! The single pending-image slot shared between the landing and result pages.
//!
//! One key, overwritten on every confirm. The result page reads it and only
//! clears it once rendering succeeded, so a reload after success is inert.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::LookupError;

/// Session-scoped string storage (`window.sessionStorage` in the browser).
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, LookupError>;
    fn set(&self, key: &str, value: &str) -> Result<(), LookupError>;
    fn remove(&self, key: &str) -> Result<(), LookupError>;
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LookupError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LookupError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LookupError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Handle on the pending image slot.
pub struct StoredImage<'a, S: SessionStore + ?Sized> {
    store: &'a S,
    key: &'a str,
}

impl<'a, S: SessionStore + ?Sized> StoredImage<'a, S> {
    pub fn new(store: &'a S, key: &'a str) -> Self {
        Self { store, key }
    }

    /// Replace whatever is pending with a new data URL.
    pub fn put(&self, data_url: &str) -> Result<(), LookupError> {
        self.store.set(self.key, data_url)?;
        log::debug!("💾 Stored pending image ({} chars)", data_url.len());
        Ok(())
    }

    /// Read the pending data URL without consuming it.
    pub fn peek(&self) -> Result<Option<String>, LookupError> {
        Ok(self.store.get(self.key)?.filter(|v| !v.is_empty()))
    }

    /// Drop the pending image.
    pub fn clear(&self) -> Result<(), LookupError> {
        self.store.remove(self.key)?;
        log::debug!("🧹 Cleared pending image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        let slot = StoredImage::new(&store, "uploadedImage");

        slot.put("data:image/png;base64,AAAA").unwrap();
        slot.put("data:image/png;base64,BBBB").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            slot.peek().unwrap().as_deref(),
            Some("data:image/png;base64,BBBB")
        );
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let slot = StoredImage::new(&store, "uploadedImage");
        slot.put("data:,x").unwrap();
        assert!(slot.peek().unwrap().is_some());

        slot.clear().unwrap();
        assert_eq!(slot.peek().unwrap(), None);
        assert!(store.is_empty());

        // Clearing an empty slot is fine
        slot.clear().unwrap();
    }

    #[test]
    fn test_empty_value_is_not_pending() {
        let store = MemoryStore::new();
        store.set("uploadedImage", "").unwrap();
        let slot = StoredImage::new(&store, "uploadedImage");
        assert_eq!(slot.peek().unwrap(), None);
    }
}
