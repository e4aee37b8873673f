use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::dom::Element;
use crate::infrastructure::DelayedTask;

pub const DEFAULT_TOAST_DELAY: Duration = Duration::from_millis(1800);
pub const ITEM_ADDED_MESSAGE: &str = "Pesanan Berhasil Ditambahkan";

/// Transient notification. A new message replaces the current one and
/// restarts the auto-hide delay.
pub struct Notifier {
    element: Option<Element>,
    delay: Duration,
    hide_task: DelayedTask,
    shown: Arc<AtomicU64>,
}

/// Hides the toast only if no newer message was shown since `generation`.
fn hide_if_current(element: &Element, shown: &AtomicU64, generation: u64) {
    if shown.load(Ordering::SeqCst) == generation {
        element.hide();
    }
}

impl Notifier {
    pub fn new(element: Option<Element>, delay: Duration) -> Self {
        Self {
            element,
            delay,
            hide_task: DelayedTask::new(),
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn notify(&self, message: &str) {
        let Some(element) = &self.element else {
            return;
        };
        let generation = self.shown.fetch_add(1, Ordering::SeqCst) + 1;
        let target = element.clone();
        let shown = Arc::clone(&self.shown);
        // Cancel the previous hide before showing the new message.
        self.hide_task.restart(self.delay, move || {
            hide_if_current(&target, &shown, generation);
        });
        element.set_text(message);
        element.show();
    }

    pub fn is_pending(&self) -> bool {
        self.hide_task.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toast_hides_after_delay() {
        let el = Element::hidden();
        let notifier = Notifier::new(Some(el.clone()), DEFAULT_TOAST_DELAY);
        notifier.notify(ITEM_ADDED_MESSAGE);
        assert!(!el.is_hidden());
        assert_eq!(el.text(), ITEM_ADDED_MESSAGE);

        tokio::time::sleep(Duration::from_millis(1700)).await;
        assert!(!el.is_hidden());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(el.is_hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn second_notify_restarts_the_delay() {
        let el = Element::hidden();
        let notifier = Notifier::new(Some(el.clone()), DEFAULT_TOAST_DELAY);
        notifier.notify("first");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        notifier.notify("second");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!el.is_hidden());
        assert_eq!(el.text(), "second");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(el.is_hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_hide_leaves_newer_toast_visible() {
        let el = Element::hidden();
        let notifier = Notifier::new(Some(el.clone()), DEFAULT_TOAST_DELAY);
        notifier.notify("first");
        let first = notifier.shown.load(Ordering::SeqCst);
        notifier.notify("second");

        hide_if_current(&el, &notifier.shown, first);
        assert!(!el.is_hidden());
        assert_eq!(el.text(), "second");
        assert!(notifier.is_pending());

        hide_if_current(&el, &notifier.shown, first + 1);
        assert!(el.is_hidden());
    }

    #[test]
    fn missing_element_is_a_no_op() {
        let notifier = Notifier::new(None, DEFAULT_TOAST_DELAY);
        notifier.notify("ignored");
        assert!(!notifier.is_pending());
    }
}
