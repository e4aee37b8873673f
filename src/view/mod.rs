pub mod dom;
pub mod render;
pub mod toast;

use std::time::Duration;

use crate::domain::cart::Cart;
use crate::domain::event::CartEvent;

use dom::{Document, Element, BADGE_ID, CART_ITEMS_ID, CART_TOTAL_ID, TOAST_ID};
use toast::{Notifier, ITEM_ADDED_MESSAGE};

pub use dom::PageSnapshot;
pub use render::{escape_html, format_rupiah, render_list, CartItemsTemplate, RenderedList};

/// Renders cart state into whichever of its elements the page provides.
/// Every element is optional; missing ones are skipped.
pub struct CartView {
    badge: Option<Element>,
    items: Option<Element>,
    total: Option<Element>,
    toast: Notifier,
}

impl CartView {
    pub fn new(document: &Document, toast_delay: Duration) -> Self {
        Self {
            badge: document.get_element_by_id(BADGE_ID),
            items: document.get_element_by_id(CART_ITEMS_ID),
            total: document.get_element_by_id(CART_TOTAL_ID),
            toast: Notifier::new(document.get_element_by_id(TOAST_ID), toast_delay),
        }
    }

    pub fn render_list(&self, cart: &Cart) {
        let (Some(items), Some(total)) = (&self.items, &self.total) else {
            return;
        };
        let rendered = match render_list(cart) {
            Ok(rendered) => rendered,
            Err(e) => {
                log::warn!("Failed to render cart items: {}", e);
                return;
            }
        };
        items.set_inner_html(rendered.items_html);
        total.set_text(rendered.total_text);
    }

    pub fn update_indicator(&self, cart: &Cart) {
        if let Some(badge) = &self.badge {
            badge.set_text(cart.item_count().to_string());
        }
    }

    pub fn notify(&self, message: &str) {
        self.toast.notify(message);
    }

    /// Store subscription entry point.
    pub fn on_cart_event(&self, event: &CartEvent) {
        match event {
            CartEvent::Saved { cart } => self.update_indicator(cart),
            CartEvent::ItemAdded { .. } => self.notify(ITEM_ADDED_MESSAGE),
            CartEvent::LinesChanged { cart } => self.render_list(cart),
            CartEvent::Cleared => {
                let empty = Cart::new();
                self.update_indicator(&empty);
                self.render_list(&empty);
            }
        }
    }
}
