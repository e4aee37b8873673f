use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::{CartStore, CheckoutOutcome, CheckoutState};
use crate::domain::ports::CartStorage;
use crate::errors::AppError;
use crate::view::dom::{Document, CART_MODAL_ID, SUCCESS_MODAL_ID};
use crate::view::CartView;

pub const EMPTY_CART_ALERT: &str = "Keranjang kosong!";

// ── UI events ────────────────────────────────────────────────────────────────

/// A discrete user interaction, as reported by the page host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// "Add" on a menu card. Fields carry the raw `data-*` attribute and
    /// quantity input strings; a missing `id` means no card was found.
    AddToCart {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        price: Option<String>,
        #[serde(default)]
        qty: Option<String>,
    },
    Increment {
        id: String,
    },
    Decrement {
        id: String,
    },
    Remove {
        id: String,
    },
    OpenCart,
    CloseCart,
    /// "Clear" after the host asked "Kosongkan keranjang?".
    ClearCart {
        confirmed: bool,
    },
    Checkout,
    CloseSuccess,
    /// A click that landed on a modal's backdrop.
    BackdropClick {
        modal: String,
    },
}

impl std::str::FromStr for UiEvent {
    type Err = AppError;

    /// Parse one JSON event line as sent by the page host.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(line).map_err(|e| AppError::InvalidEvent(e.to_string()))
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
/// Trailing garbage is ignored; no digits at all yields `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Quantity input: anything unparsable means one, and never less than one.
fn parse_qty(raw: Option<&str>) -> u32 {
    let qty = raw.and_then(parse_leading_int).unwrap_or(1).max(1);
    u32::try_from(qty).unwrap_or(u32::MAX)
}

// ── Binder ───────────────────────────────────────────────────────────────────

/// Routes UI events to store commands and drives the checkout flow. The view
/// learns about cart changes only through its store subscription.
pub struct EventBinder<S> {
    store: CartStore<S>,
    view: Arc<CartView>,
    document: Document,
    state: CheckoutState,
}

impl<S: CartStorage> EventBinder<S> {
    /// Wire `document` to `store` and refresh the indicator from whatever cart
    /// is already persisted.
    pub fn bind(mut store: CartStore<S>, document: Document, toast_delay: Duration) -> Self {
        let view = Arc::new(CartView::new(&document, toast_delay));
        let subscriber = Arc::clone(&view);
        store.subscribe(move |event| subscriber.on_cart_event(event));
        view.update_indicator(&store.load());
        Self {
            store,
            view,
            document,
            state: CheckoutState::default(),
        }
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), AppError> {
        log::debug!("Dispatching {:?}", event);
        match event {
            UiEvent::AddToCart {
                id,
                name,
                price,
                qty,
            } => {
                let Some(id) = id else {
                    log::debug!("Add-to-cart without a menu card ignored");
                    return Ok(());
                };
                let price = price.as_deref().and_then(parse_leading_int).unwrap_or(0);
                let qty = parse_qty(qty.as_deref());
                self.store
                    .add_item(&id, name.as_deref().unwrap_or_default(), price, qty)?;
            }
            UiEvent::Increment { id } => self.store.change_qty(&id, 1)?,
            UiEvent::Decrement { id } => self.store.change_qty(&id, -1)?,
            UiEvent::Remove { id } => self.store.remove_item(&id)?,
            UiEvent::OpenCart => self.open_cart(),
            UiEvent::CloseCart => self.close_cart(),
            UiEvent::ClearCart { confirmed } => {
                if confirmed {
                    self.store.clear()?;
                }
            }
            UiEvent::Checkout => {
                self.checkout()?;
            }
            UiEvent::CloseSuccess => self.close_success(),
            UiEvent::BackdropClick { modal } => self.backdrop_click(&modal),
        }
        Ok(())
    }

    pub fn open_cart(&mut self) {
        let Some(modal) = self.document.get_element_by_id(CART_MODAL_ID) else {
            return;
        };
        self.view.render_list(&self.store.load());
        modal.show();
        self.state = self.state.open_cart();
    }

    pub fn close_cart(&mut self) {
        let Some(modal) = self.document.get_element_by_id(CART_MODAL_ID) else {
            return;
        };
        modal.hide();
        self.state = self.state.close_cart();
    }

    /// Simulated checkout: an empty cart raises an alert and changes nothing;
    /// otherwise the cart is torn down and the confirmation shown.
    pub fn checkout(&mut self) -> Result<CheckoutOutcome, AppError> {
        if self.store.load().is_empty() {
            self.document.alert(EMPTY_CART_ALERT);
            self.state = self.state.after_checkout(CheckoutOutcome::RejectedEmpty);
            return Ok(CheckoutOutcome::RejectedEmpty);
        }
        self.close_cart();
        self.store.clear()?;
        if let Some(success) = self.document.get_element_by_id(SUCCESS_MODAL_ID) {
            success.show();
        }
        self.state = self.state.after_checkout(CheckoutOutcome::Confirmed);
        log::info!("Checkout confirmed");
        Ok(CheckoutOutcome::Confirmed)
    }

    pub fn close_success(&mut self) {
        let Some(modal) = self.document.get_element_by_id(SUCCESS_MODAL_ID) else {
            return;
        };
        modal.hide();
        self.state = self.state.close_success();
    }

    fn backdrop_click(&mut self, modal_id: &str) {
        let Some(modal) = self.document.get_element_by_id(modal_id) else {
            return;
        };
        if modal.is_centered() {
            return;
        }
        if modal_id == CART_MODAL_ID {
            self.close_cart();
        } else {
            modal.hide();
        }
    }
}
