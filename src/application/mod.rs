pub mod cart_store;
pub mod checkout;

pub use cart_store::{CartStore, DEFAULT_CART_KEY};
pub use checkout::{CheckoutOutcome, CheckoutState};
