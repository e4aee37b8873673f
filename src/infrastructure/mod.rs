pub mod delay;
pub mod file_storage;
pub mod memory_storage;
pub mod models;

pub use delay::DelayedTask;
pub use file_storage::{is_valid_slot_key, FileStorage};
pub use memory_storage::MemoryStorage;
