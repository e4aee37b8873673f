use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::event::CartEvent;
use crate::domain::ports::CartStorage;

/// Slot key used when no other is configured. Bumping the suffix silently
/// abandons carts written under the old key.
pub const DEFAULT_CART_KEY: &str = "neat_cart_v1";

type Listener = Box<dyn Fn(&CartEvent) + Send + Sync>;

/// Command layer over the persisted cart. Every command reads the whole cart,
/// mutates it, writes it back in full and then publishes a [`CartEvent`].
pub struct CartStore<S> {
    storage: S,
    key: String,
    listeners: Vec<Listener>,
}

impl<S: CartStorage> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            listeners: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a listener; listeners run in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn publish(&self, event: CartEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Read the cart. Absent, unreadable or malformed slots all yield an
    /// empty cart.
    pub fn load(&self) -> Cart {
        match self.storage.load(&self.key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(DomainError::Serialization(e)) => {
                log::warn!("Ignoring malformed cart slot '{}': {}", self.key, e);
                Cart::new()
            }
            Err(e) => {
                log::warn!("Failed to read cart slot '{}': {}", self.key, e);
                Cart::new()
            }
        }
    }

    /// Overwrite the slot with `cart` and announce it.
    pub fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        self.storage.save(&self.key, cart)?;
        self.publish(CartEvent::Saved { cart: cart.clone() });
        Ok(())
    }

    /// Add `qty` units of an item; a `qty` of zero counts as one.
    pub fn add_item(&self, id: &str, name: &str, price: i64, qty: u32) -> Result<(), DomainError> {
        let qty = qty.max(1);
        let mut cart = self.load();
        cart.add(id, name, price, qty);
        self.save(&cart)?;
        log::debug!("Added {} x '{}' to cart", qty, id);
        self.publish(CartEvent::ItemAdded {
            id: id.to_string(),
            name: name.to_string(),
            qty,
        });
        Ok(())
    }

    /// Shift a line's quantity; unknown ids are ignored.
    pub fn change_qty(&self, id: &str, delta: i64) -> Result<(), DomainError> {
        let mut cart = self.load();
        if !cart.change_qty(id, delta) {
            log::debug!("change_qty on unknown line '{}' ignored", id);
            return Ok(());
        }
        self.save(&cart)?;
        self.publish(CartEvent::LinesChanged { cart });
        Ok(())
    }

    /// Drop a line; unknown ids are ignored.
    pub fn remove_item(&self, id: &str) -> Result<(), DomainError> {
        let mut cart = self.load();
        if cart.remove(id).is_none() {
            log::debug!("remove_item on unknown line '{}' ignored", id);
            return Ok(());
        }
        self.save(&cart)?;
        self.publish(CartEvent::LinesChanged { cart });
        Ok(())
    }

    /// Delete the slot itself rather than writing an empty cart.
    pub fn clear(&self) -> Result<(), DomainError> {
        self.storage.remove(&self.key)?;
        log::info!("Cart cleared");
        self.publish(CartEvent::Cleared);
        Ok(())
    }
}
