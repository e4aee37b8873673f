pub mod cart;
pub mod errors;
pub mod event;
pub mod ports;
