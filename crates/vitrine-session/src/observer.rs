//! Host notification surface.

use vitrine_tabs::TabId;

/// Notifications republished to the host UI.
///
/// Every method defaults to a no-op so hosts implement only what they
/// render. `title_changed` fires once per actual change (redundant
/// updates are suppressed upstream), so the host can re-render only the
/// affected tab's label.
pub trait SessionObserver {
    fn tab_opened(&self, index: usize, id: TabId, url: &str) {
        let _ = (index, id, url);
    }

    fn tab_closed(&self, id: TabId) {
        let _ = id;
    }

    fn selection_changed(&self, index: usize) {
        let _ = index;
    }

    fn title_changed(&self, index: usize, id: TabId, title: &str) {
        let _ = (index, id, title);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
