//! A minimal page model: the handful of elements the cart overlay touches.
//!
//! Elements are shared handles, so a clone held by the view or by a pending
//! toast timer sees the same state as the host that renders the page.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::errors::AppError;

pub const BADGE_ID: &str = "cartCount";
pub const TOAST_ID: &str = "toast";
pub const CART_MODAL_ID: &str = "cartModal";
pub const CART_ITEMS_ID: &str = "cartItems";
pub const CART_TOTAL_ID: &str = "cartTotal";
pub const SUCCESS_MODAL_ID: &str = "successModal";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    pub text: String,
    pub inner_html: String,
    pub hidden: bool,
    /// Centered modals ignore backdrop clicks.
    pub centered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    state: Arc<Mutex<ElementState>>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// An element that starts out hidden, like a modal or the toast.
    pub fn hidden() -> Self {
        let el = Self::new();
        el.hide();
        el
    }

    pub fn centered(self) -> Self {
        self.lock().centered = true;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().text = text.into();
    }

    pub fn set_inner_html(&self, html: impl Into<String>) {
        self.lock().inner_html = html.into();
    }

    pub fn show(&self) {
        self.lock().hidden = false;
    }

    pub fn hide(&self) {
        self.lock().hidden = true;
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn inner_html(&self) -> String {
        self.lock().inner_html.clone()
    }

    pub fn is_hidden(&self) -> bool {
        self.lock().hidden
    }

    pub fn is_centered(&self) -> bool {
        self.lock().centered
    }

    pub fn snapshot(&self) -> ElementState {
        self.lock().clone()
    }
}

/// Elements by id plus the alerts raised against the page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
    alerts: Arc<Mutex<Vec<String>>>,
}

impl Document {
    /// A page with no elements at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A menu page carrying every element the cart overlay knows about.
    pub fn full_page() -> Self {
        Self::new()
            .with_element(BADGE_ID, Element::new())
            .with_element(TOAST_ID, Element::hidden())
            .with_element(CART_MODAL_ID, Element::hidden())
            .with_element(CART_ITEMS_ID, Element::new())
            .with_element(CART_TOTAL_ID, Element::new())
            .with_element(SUCCESS_MODAL_ID, Element::hidden().centered())
    }

    pub fn with_element(mut self, id: impl Into<String>, element: Element) -> Self {
        self.elements.insert(id.into(), element);
        self
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.elements.get(id).cloned()
    }

    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("Alert: {}", message);
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Alerts raised since the last call.
    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut *self.alerts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            elements: self
                .elements
                .iter()
                .map(|(id, el)| (id.clone(), el.snapshot()))
                .collect(),
            alerts: self.take_alerts(),
        }
    }
}

/// Serializable view of the page, handed to hosts after each event.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub elements: std::collections::BTreeMap<String, ElementState>,
    pub alerts: Vec<String>,
}

impl PageSnapshot {
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::Serialization(e.to_string()))
    }
}
