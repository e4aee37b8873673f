use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::cart::{Cart, CartLine};
use crate::domain::errors::DomainError;

/// A cart line as written into the persisted slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: i64,
    pub qty: i64,
}

/// The persisted slot value: a JSON object keyed by line id, kept in the
/// order its keys appear.
#[derive(Debug, Clone, Default)]
pub struct StoredCart {
    entries: Vec<(String, StoredLine)>,
}

impl StoredCart {
    /// Build the domain cart. The object key wins over the embedded `id`, and
    /// lines with a quantity below one are dropped.
    pub fn into_cart(self) -> Cart {
        let mut cart = Cart::new();
        for (key, line) in self.entries {
            if line.qty < 1 {
                log::warn!("Dropping stored cart line '{}' with qty {}", key, line.qty);
                continue;
            }
            cart.insert(CartLine {
                id: key,
                name: line.name,
                price: line.price,
                qty: u32::try_from(line.qty).unwrap_or(u32::MAX),
            });
        }
        cart
    }
}

impl From<&Cart> for StoredCart {
    fn from(cart: &Cart) -> Self {
        Self {
            entries: cart
                .lines()
                .map(|l| {
                    (
                        l.id.clone(),
                        StoredLine {
                            id: l.id.clone(),
                            name: l.name.clone(),
                            price: l.price,
                            qty: i64::from(l.qty),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Serialize `cart` into the slot's JSON text.
pub fn encode_cart(cart: &Cart) -> Result<String, DomainError> {
    serde_json::to_string(&StoredCart::from(cart))
        .map_err(|e| DomainError::Serialization(e.to_string()))
}

/// Parse slot JSON text back into a cart.
pub fn decode_cart(raw: &str) -> Result<Cart, DomainError> {
    serde_json::from_str::<StoredCart>(raw)
        .map(StoredCart::into_cart)
        .map_err(|e| DomainError::Serialization(e.to_string()))
}

impl Serialize for StoredCart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, line) in &self.entries {
            map.serialize_entry(key, line)?;
        }
        map.end()
    }
}

struct StoredCartVisitor;

impl<'de> Visitor<'de> for StoredCartVisitor {
    type Value = StoredCart;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of cart lines keyed by id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StoredCart, A::Error> {
        let mut entries: Vec<(String, StoredLine)> = Vec::new();
        while let Some((key, line)) = access.next_entry::<String, StoredLine>()? {
            // Duplicate keys: last value wins, first position is kept.
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = line,
                None => entries.push((key, line)),
            }
        }
        Ok(StoredCart { entries })
    }
}

impl<'de> Deserialize<'de> for StoredCart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StoredCartVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_object_keyed_by_id_in_cart_order() {
        let mut cart = Cart::new();
        cart.add("b2", "Es Teh", 5000, 1);
        cart.add("a1", "Nasi Goreng", 25000, 2);
        let json = serde_json::to_string(&StoredCart::from(&cart)).unwrap();
        assert_eq!(
            json,
            r#"{"b2":{"id":"b2","name":"Es Teh","price":5000,"qty":1},"a1":{"id":"a1","name":"Nasi Goreng","price":25000,"qty":2}}"#
        );
    }

    #[test]
    fn key_is_authoritative_for_line_id() {
        let stored: StoredCart =
            serde_json::from_str(r#"{"a1":{"id":"other","name":"Sate","price":1,"qty":1}}"#)
                .unwrap();
        let cart = stored.into_cart();
        assert!(cart.contains("a1"));
        assert!(!cart.contains("other"));
    }

    #[test]
    fn lines_with_non_positive_qty_are_dropped() {
        let stored: StoredCart = serde_json::from_str(
            r#"{"a":{"name":"A","price":1,"qty":0},"b":{"name":"B","price":1,"qty":-2},"c":{"name":"C","price":1,"qty":4}}"#,
        )
        .unwrap();
        let cart = stored.into_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("c").map(|l| l.qty), Some(4));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(decode_cart("[1,2,3]"), Err(DomainError::Serialization(_))));
        assert!(matches!(decode_cart("null"), Err(DomainError::Serialization(_))));
        assert!(decode_cart("{not json").is_err());
    }

    #[test]
    fn encoded_cart_decodes_to_same_lines() {
        let mut cart = Cart::new();
        cart.add("b2", "Es Teh", 5000, 1);
        cart.add("a1", "Nasi Goreng", 25000, 2);
        assert_eq!(decode_cart(&encode_cart(&cart).unwrap()).unwrap(), cart);
    }
}
