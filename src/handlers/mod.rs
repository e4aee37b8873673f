pub mod events;

pub use events::{EventBinder, UiEvent};
