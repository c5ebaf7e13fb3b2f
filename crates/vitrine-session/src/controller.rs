//! Session controller.
//!
//! Composition root: receives UI intents (new tab, close tab, link
//! navigated), applies the navigation-interception policy through the
//! surface wiring, mutates the tab registry, drives the surface binding,
//! and republishes title/selection changes to the host.
//!
//! Every operation is synchronous and runs on the event-loop thread.
//! Surface callbacks re-enter through the [`TabHost`] capabilities at
//! arbitrary later times; lock guards are never held across hook or
//! observer invocations, so re-entry cannot deadlock. Hosts driving the
//! controller from multiple threads get the same serialization from the
//! internal locks.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use vitrine_surface::{
    SurfaceBinding, SurfaceConfig, SurfaceFactory, SurfaceSnapshot, TabHost,
};
use vitrine_tabs::{TabEntry, TabId, TabRegistry};

use crate::observer::SessionObserver;
use crate::Result;

/// Seed configuration for a controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Home URL used for the default tab and for the tab synthesized
    /// when the last one closes
    pub home_url: String,
    /// Tabs opened at start; empty means one default-home tab
    pub initial_tabs: Vec<String>,
    /// Advisory: the host should not offer closing the first tab
    pub pin_first_tab: bool,
    /// Settings applied to every surface
    pub surface: SurfaceConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            home_url: "about:blank".to_string(),
            initial_tabs: Vec::new(),
            pin_first_tab: true,
            surface: SurfaceConfig::default(),
        }
    }
}

pub struct SessionController {
    registry: Arc<RwLock<TabRegistry>>,
    binding: SurfaceBinding,
    observer: Arc<dyn SessionObserver>,
}

impl SessionController {
    /// Build a controller with its registry seeded per `options`. No
    /// surface exists until [`initialize`](Self::initialize) or the
    /// first operation runs.
    pub fn new(
        options: SessionOptions,
        factory: Arc<dyn SurfaceFactory>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        let registry = TabRegistry::with_initial_tabs(
            options.home_url,
            &options.initial_tabs,
            options.pin_first_tab,
        );

        Self {
            registry: Arc::new(RwLock::new(registry)),
            binding: SurfaceBinding::new(factory, options.surface),
            observer,
        }
    }

    /// Bind a surface to the seeded active tab.
    pub fn initialize(&self) -> Result<()> {
        self.ensure_active_surface()
    }

    /// Open a new tab, make it active, and bind its surface.
    ///
    /// The entry always survives; a surface-acquire failure propagates as
    /// a recoverable error and the host may retry through
    /// [`activate`](Self::activate).
    pub fn new_tab(&self, url: &str) -> Result<TabId> {
        let (id, index) = {
            let mut registry = self.registry.write();
            let id = registry.create_tab(url);
            (id, registry.active_index())
        };

        self.observer.tab_opened(index, id, url);
        self.observer.selection_changed(index);

        self.ensure_active_surface()?;
        Ok(id)
    }

    /// Close the tab at `index`; silent no-op when out of range.
    ///
    /// The surface is released before the registry mutates the sequence,
    /// so no handle is left behind under an identity that became
    /// unreachable. If the close emptied the registry, the synthesized
    /// default tab is reported and bound like any other.
    pub fn close_tab(&self, index: usize) -> Result<()> {
        let id = match self.registry.read().id_at(index) {
            Some(id) => id,
            None => return Ok(()),
        };

        self.binding.release(id);

        let outcome = match self.registry.write().close_tab(index) {
            Some(outcome) => outcome,
            None => return Ok(()),
        };

        self.observer.tab_closed(outcome.removed.id);

        if let Some(synthesized) = outcome.synthesized {
            let (index, url) = {
                let registry = self.registry.read();
                (
                    registry.active_index(),
                    registry.active().initial_url.clone(),
                )
            };
            self.observer.tab_opened(index, synthesized, &url);
        }

        let active = self.registry.read().active_index();
        self.observer.selection_changed(active);

        self.ensure_active_surface()
    }

    /// Make the tab at `index` active; silent no-op when out of range.
    pub fn activate(&self, index: usize) -> Result<()> {
        let changed = self.registry.write().activate(index);
        if changed {
            self.observer.selection_changed(index);
        }

        // Runs even when the selection did not move, so a tab whose
        // surface failed to acquire can be retried by re-activating it.
        self.ensure_active_surface()
    }

    /// Navigate the active tab in place.
    pub fn load_on_active(&self, url: &str) -> Result<()> {
        self.ensure_active_surface()?;
        self.binding.load(self.active_id(), url);
        Ok(())
    }

    /// Reload the active tab.
    pub fn reload_active(&self) -> Result<()> {
        self.ensure_active_surface()?;
        self.binding.reload(self.active_id());
        Ok(())
    }

    /// Title-changed events from any surface land here. Stale identities
    /// from closed tabs and redundant titles are dropped silently; the
    /// observer hears about actual changes only.
    pub fn title_changed(&self, id: TabId, title: &str) {
        let update = self.registry.write().rename_tab(id, title);
        if let Some(update) = update {
            self.observer.title_changed(update.index, id, &update.title);
        }
    }

    /// Opaque per-tab history snapshots for every tab with a live
    /// surface. Tabs never activated have no surface and no entry in the
    /// map.
    pub fn snapshot_all(&self) -> HashMap<TabId, SurfaceSnapshot> {
        let ids: Vec<TabId> = self.registry.read().tabs().iter().map(|tab| tab.id).collect();

        ids.into_iter()
            .filter_map(|id| self.binding.snapshot(id).map(|snapshot| (id, snapshot)))
            .collect()
    }

    /// Hand snapshots back to their surfaces: restored in place for live
    /// surfaces, staged for tabs that have none yet so the next acquire
    /// restores instead of loading fresh. Unknown identities are dropped.
    pub fn restore_all(&self, snapshots: HashMap<TabId, SurfaceSnapshot>) {
        let known: Vec<(TabId, SurfaceSnapshot)> = {
            let registry = self.registry.read();
            snapshots
                .into_iter()
                .filter(|(id, _)| {
                    let known = registry.index_of(*id).is_some();
                    if !known {
                        tracing::debug!(tab_id = %id, "dropping snapshot for unknown tab");
                    }
                    known
                })
                .collect()
        };

        for (id, snapshot) in known {
            self.binding.stage_restore(id, snapshot);
        }
    }

    /// Release every surface (host teardown). Entries survive so the
    /// host can still render the strip while shutting down.
    pub fn teardown(&self) {
        tracing::info!("session teardown");
        self.binding.release_all();
    }

    pub fn tabs(&self) -> Vec<TabEntry> {
        self.registry.read().tabs().to_vec()
    }

    pub fn tab_count(&self) -> usize {
        self.registry.read().len()
    }

    pub fn active_index(&self) -> usize {
        self.registry.read().active_index()
    }

    /// Whether the host should offer a close affordance for `index`.
    pub fn is_closable(&self, index: usize) -> bool {
        self.registry.read().is_closable(index)
    }

    fn active_id(&self) -> TabId {
        self.registry.read().active().id
    }

    /// Bind a surface to the active tab if it has none yet. Idempotent.
    fn ensure_active_surface(&self) -> Result<()> {
        let (id, url) = {
            let registry = self.registry.read();
            let active = registry.active();
            (active.id, active.initial_url.clone())
        };

        let host: Arc<dyn TabHost> = Arc::new(self.clone());
        self.binding.acquire(id, &url, host)?;
        self.registry.write().mark_activated(id);

        Ok(())
    }
}

impl TabHost for SessionController {
    fn open_new_tab(&self, url: &str) {
        if let Err(error) = self.new_tab(url) {
            tracing::warn!(%error, url, "failed to open tab for intercepted navigation");
        }
    }

    fn update_tab_title(&self, id: TabId, title: &str) {
        self.title_changed(id, title);
    }
}

impl Clone for SessionController {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            binding: self.binding.clone(),
            observer: Arc::clone(&self.observer),
        }
    }
}
