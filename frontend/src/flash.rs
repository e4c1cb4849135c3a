//! One-shot notices carried across a page redirect.
//!
//! A page stores the notice right before navigating away and the destination
//! page takes it on load, which also removes it, so it is shown exactly once.

use crate::config::FLASH_KEY;

/// Minimal string storage, implemented by the browser's session storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.sessionStorage`. Storage failures are logged and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

impl SessionStore {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.session_storage() {
            Ok(storage) => storage,
            Err(error) => {
                tracing::error!("session storage unavailable: {error:?}");
                None
            }
        }
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(error) = storage.set_item(key, value) {
                tracing::error!("could not store {key}: {error:?}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(error) = storage.remove_item(key) {
                tracing::error!("could not remove {key}: {error:?}");
            }
        }
    }
}

pub fn set_flash(store: &impl KeyValueStore, message: &str) {
    store.set(FLASH_KEY, message);
}

/// Read and clear the pending notice.
pub fn take_flash(store: &impl KeyValueStore) -> Option<String> {
    let message = store.get(FLASH_KEY)?;
    store.remove(FLASH_KEY);
    Some(message).filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::{set_flash, take_flash, KeyValueStore};
    use crate::config::FLASH_KEY;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn flash_is_delivered_exactly_once() {
        let store = MemoryStore::default();

        set_flash(&store, "Registration was successful. Please, sign in");

        assert_eq!(
            take_flash(&store).as_deref(),
            Some("Registration was successful. Please, sign in")
        );
        assert_eq!(take_flash(&store), None);
        assert_eq!(store.get(FLASH_KEY), None);
    }

    #[test]
    fn no_flash_when_nothing_was_set() {
        let store = MemoryStore::default();

        assert_eq!(take_flash(&store), None);
    }

    #[test]
    fn empty_flash_is_cleared_but_not_shown() {
        let store = MemoryStore::default();
        set_flash(&store, "");

        assert_eq!(take_flash(&store), None);
        assert!(store.0.borrow().is_empty());
    }
}
