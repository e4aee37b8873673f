use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartStorage;

use super::models::{decode_cart, encode_cart};

/// Process-local slots holding the same JSON text [`FileStorage`] writes.
/// Used by tests and by hosts that do not need the cart to outlive them.
///
/// [`FileStorage`]: super::FileStorage
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots().contains_key(key)
    }

    /// Put raw slot text, bypassing encoding.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.slots().insert(key.to_string(), raw.to_string());
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Cart>, DomainError> {
        self.slots()
            .get(key)
            .map(|raw| decode_cart(raw))
            .transpose()
    }

    fn save(&self, key: &str, cart: &Cart) -> Result<(), DomainError> {
        let raw = encode_cart(cart)?;
        self.slots().insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.slots().remove(key);
        Ok(())
    }
}
