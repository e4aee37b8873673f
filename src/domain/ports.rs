use super::cart::Cart;
use super::errors::DomainError;

/// Durable cart slots addressed by key, the way a browser's local storage
/// holds one serialized value per key.
pub trait CartStorage: Send + Sync + 'static {
    /// `Ok(None)` for an absent slot; a slot that cannot be decoded is
    /// `Err(DomainError::Serialization)`.
    fn load(&self, key: &str) -> Result<Option<Cart>, DomainError>;
    /// Overwrite the whole slot.
    fn save(&self, key: &str, cart: &Cart) -> Result<(), DomainError>;
    /// Removing an absent slot succeeds.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}

impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Cart>, DomainError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, cart: &Cart) -> Result<(), DomainError> {
        (**self).save(key, cart)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key)
    }
}
