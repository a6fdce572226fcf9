use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::SocialError;

/// String key/value persistence, as offered by `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SocialError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SocialError> {
        (**self).set_item(key, value)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SocialError> {
        let storage = Self::storage().ok_or_else(|| SocialError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| SocialError::Storage(format!("{:?}", e)))
    }
}

/// In-memory store, used when nothing should touch the browser.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SocialError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = Rc::new(MemoryStorage::default());
        assert_eq!(storage.get_item("posts"), None);
        storage.set_item("posts", "[]").unwrap();
        let shared = storage.clone();
        assert_eq!(shared.get_item("posts").as_deref(), Some("[]"));
    }
}
