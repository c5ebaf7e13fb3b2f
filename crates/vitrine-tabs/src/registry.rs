//! Ordered tab registry.
//!
//! Owns the ordered sequence of [`TabEntry`] values and the active index.
//! Routine mismatches (stale identity, out-of-range index) are silent
//! no-ops: they are expected races between asynchronous surface callbacks
//! and user-driven mutations, not errors, so this crate has no error type.

use crate::phase::TabPhase;
use crate::tab::{TabEntry, TabId};

/// Outcome of a successful [`TabRegistry::close_tab`].
#[derive(Debug)]
pub struct CloseOutcome {
    /// The removed entry, its phase advanced to `Closed`.
    pub removed: TabEntry,
    /// Id of the default tab synthesized when the close emptied the registry.
    pub synthesized: Option<TabId>,
}

/// A title change to republish to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleUpdate {
    pub index: usize,
    pub title: String,
}

/// Ordered tab sequence with a single active index.
///
/// Always non-empty: the constructor seeds the initial tabs and
/// [`close_tab`](Self::close_tab) synthesizes a fresh default tab before
/// returning if a close would leave zero tabs.
pub struct TabRegistry {
    tabs: Vec<TabEntry>,
    active: usize,
    default_home_url: String,
    pin_first: bool,
}

impl TabRegistry {
    /// Registry seeded with a single default-home tab.
    pub fn new(default_home_url: impl Into<String>, pin_first: bool) -> Self {
        Self::with_initial_tabs(default_home_url, &[], pin_first)
    }

    /// Registry seeded with one tab per URL in `initial`, or a single
    /// default-home tab when the list is empty. The first tab starts
    /// active.
    pub fn with_initial_tabs(
        default_home_url: impl Into<String>,
        initial: &[String],
        pin_first: bool,
    ) -> Self {
        let mut registry = Self {
            tabs: Vec::new(),
            active: 0,
            default_home_url: default_home_url.into(),
            pin_first,
        };

        if initial.is_empty() {
            let home = registry.default_home_url.clone();
            registry.create_tab(&home);
        } else {
            for url in initial {
                registry.create_tab(url);
            }
            registry.active = 0;
        }

        registry
    }

    /// Append a new tab and make it active. Always succeeds.
    pub fn create_tab(&mut self, url: &str) -> TabId {
        let entry = TabEntry::new(url);
        let id = entry.id;
        self.tabs.push(entry);
        self.active = self.tabs.len() - 1;

        tracing::info!(tab_id = %id, url = %url, index = self.active, "created tab");

        id
    }

    /// Remove the tab at `index`; silent no-op when out of range.
    ///
    /// If the removal empties the sequence, a fresh default-home tab is
    /// synthesized before returning. Otherwise the new active index is
    /// `min(index, count - 1)`: closing the last tab selects the new last
    /// tab, closing a middle tab selects the tab now occupying its slot.
    pub fn close_tab(&mut self, index: usize) -> Option<CloseOutcome> {
        if index >= self.tabs.len() {
            return None;
        }

        let mut removed = self.tabs.remove(index);
        removed.phase = TabPhase::Closed;
        tracing::info!(tab_id = %removed.id, index, "closed tab");

        let synthesized = if self.tabs.is_empty() {
            let home = self.default_home_url.clone();
            Some(self.create_tab(&home))
        } else {
            self.active = index.min(self.tabs.len() - 1);
            None
        };

        Some(CloseOutcome {
            removed,
            synthesized,
        })
    }

    /// Resolve `id` and update its display title.
    ///
    /// A blank candidate falls back to the entry's `initial_url`. Returns
    /// `None` without touching anything when the id is stale or the
    /// resolved title matches the current one, so pages that fire repeated
    /// title callbacks cause no UI churn.
    pub fn rename_tab(&mut self, id: TabId, candidate: &str) -> Option<TitleUpdate> {
        let index = self.index_of(id)?;
        let entry = &mut self.tabs[index];

        let resolved_title = if candidate.trim().is_empty() {
            entry.initial_url.clone()
        } else {
            candidate.to_string()
        };

        if entry.title == resolved_title {
            return None;
        }

        entry.title = resolved_title.clone();
        if entry.phase.can_advance_to(TabPhase::Loaded) {
            entry.phase = TabPhase::Loaded;
        }

        tracing::debug!(tab_id = %id, index, title = %resolved_title, "renamed tab");

        Some(TitleUpdate {
            index,
            title: resolved_title,
        })
    }

    /// Set the active index. Returns `false` (no-op) when out of range or
    /// already active.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || index == self.active {
            return false;
        }

        self.active = index;
        tracing::debug!(index, "activated tab");
        true
    }

    /// Record that a surface was bound to `id`. Stale ids and repeat
    /// bindings are ignored.
    pub fn mark_activated(&mut self, id: TabId) {
        if let Some(index) = self.index_of(id) {
            let entry = &mut self.tabs[index];
            if entry.phase == TabPhase::Created {
                entry.phase = TabPhase::Activated;
                tracing::debug!(tab_id = %id, "tab surface bound");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    pub fn get(&self, index: usize) -> Option<&TabEntry> {
        self.tabs.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &TabEntry {
        &self.tabs[self.active]
    }

    pub fn id_at(&self, index: usize) -> Option<TabId> {
        self.tabs.get(index).map(|entry| entry.id)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|entry| entry.id == id)
    }

    /// Whether the host should offer a close affordance for `index`.
    ///
    /// Advisory only: when the first tab is pinned this reports `false`
    /// for index 0, but `close_tab` itself does not enforce the pin.
    pub fn is_closable(&self, index: usize) -> bool {
        index < self.tabs.len() && !(self.pin_first && index == 0)
    }
}
