use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartStorage;

use super::models::{decode_cart, encode_cart};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<io::Error> for DomainError {
    fn from(e: io::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Whether `key` can name a slot file: ASCII letters, digits, `_`, `-` and
/// `.`, not empty and not starting with `.`.
pub fn is_valid_slot_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Keeps each slot in `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create the storage, making `dir` if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        if !is_valid_slot_key(key) {
            return Err(DomainError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<Cart>, DomainError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => decode_cart(&raw).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, cart: &Cart) -> Result<(), DomainError> {
        let path = self.slot_path(key)?;
        let raw = encode_cart(cart)?;
        // Write beside the target and rename so a crash never leaves half a slot.
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(raw.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote slot '{}' ({} bytes)", key, raw.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, FileStorage) {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let storage = FileStorage::open(dir.path().join("slots")).expect("open failed");
        (dir, storage)
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add("a1", "Nasi Goreng", 25000, 2);
        cart
    }

    #[test]
    fn missing_slot_loads_as_none() {
        let (_dir, storage) = storage();
        assert_eq!(storage.load("neat_cart_v1").unwrap(), None);
    }

    #[test]
    fn saved_cart_loads_back() {
        let (_dir, storage) = storage();
        storage.save("neat_cart_v1", &cart()).unwrap();
        assert_eq!(storage.load("neat_cart_v1").unwrap(), Some(cart()));
        let raw = fs::read_to_string(storage.dir().join("neat_cart_v1.json")).unwrap();
        assert!(raw.starts_with(r#"{"a1":"#));
    }

    #[test]
    fn save_overwrites_previous_cart() {
        let (_dir, storage) = storage();
        storage.save("k", &cart()).unwrap();
        storage.save("k", &Cart::new()).unwrap();
        assert_eq!(storage.load("k").unwrap(), Some(Cart::new()));
    }

    #[test]
    fn malformed_slot_is_a_serialization_error() {
        let (_dir, storage) = storage();
        fs::write(storage.dir().join("k.json"), "{oops").unwrap();
        assert!(matches!(
            storage.load("k"),
            Err(DomainError::Serialization(_))
        ));
    }

    #[test]
    fn remove_deletes_the_slot_file() {
        let (_dir, storage) = storage();
        storage.save("k", &cart()).unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.load("k").unwrap(), None);
        assert!(!storage.dir().join("k.json").exists());
    }

    #[test]
    fn removing_absent_slot_succeeds() {
        let (_dir, storage) = storage();
        assert!(storage.remove("never-written").is_ok());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let (_dir, storage) = storage();
        assert!(matches!(
            storage.save("../escape", &cart()),
            Err(DomainError::Storage(_))
        ));
        assert!(storage.load("").is_err());
    }

    #[test]
    fn slot_key_charset() {
        assert!(is_valid_slot_key("neat_cart_v1"));
        assert!(is_valid_slot_key("cart-2.backup"));
        assert!(!is_valid_slot_key("neat cart v1"));
        assert!(!is_valid_slot_key(".hidden"));
        assert!(!is_valid_slot_key("a/b"));
        assert!(!is_valid_slot_key(""));
    }
}
