use super::cart::Cart;

/// Published by the store after each successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// The full cart was written to its slot.
    Saved { cart: Cart },
    /// A line was created or incremented through `add_item`.
    ItemAdded { id: String, name: String, qty: u32 },
    /// Quantities changed or a line was removed; lists should re-render.
    LinesChanged { cart: Cart },
    /// The slot was removed.
    Cleared,
}
