//! In-memory browsing surface.
//!
//! Reference implementation of the collaborator contract for headless
//! hosts and tests: keeps a plain URL history, serializes it as the
//! snapshot blob, and lets callers drive title and navigation events
//! through per-tab handles. A destroyed surface drops all events, the way
//! a torn-down platform view stops delivering callbacks.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use vitrine_navigation::{NavigationRequest, SurfaceCapabilities};
use vitrine_tabs::TabId;

use crate::surface::{
    BrowsingSurface, SurfaceConfig, SurfaceFactory, SurfaceHooks, SurfaceSnapshot,
};
use crate::Result;

#[derive(Default)]
struct Inner {
    history: Vec<String>,
    loads: usize,
    reloads: usize,
    destroyed: bool,
}

pub struct MemorySurface {
    inner: Arc<RwLock<Inner>>,
}

impl BrowsingSurface for MemorySurface {
    fn load(&mut self, url: &str) {
        let mut inner = self.inner.write();
        if inner.destroyed {
            return;
        }
        inner.history.push(url.to_string());
        inner.loads += 1;
    }

    fn reload(&mut self) {
        let mut inner = self.inner.write();
        if inner.destroyed {
            return;
        }
        inner.reloads += 1;
    }

    fn snapshot(&self) -> SurfaceSnapshot {
        let inner = self.inner.read();
        let bytes = serde_json::to_vec(&inner.history).unwrap_or_default();
        SurfaceSnapshot::from_bytes(bytes)
    }

    fn restore(&mut self, snapshot: &SurfaceSnapshot) {
        let mut inner = self.inner.write();
        if inner.destroyed {
            return;
        }
        match serde_json::from_slice(snapshot.as_bytes()) {
            Ok(history) => inner.history = history,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable surface snapshot");
            }
        }
    }

    fn destroy(self: Box<Self>) {
        self.inner.write().destroyed = true;
    }
}

/// Inspection and event-injection handle for one memory surface.
///
/// Stays valid after the surface is destroyed so callers can observe the
/// teardown; events emitted through a destroyed handle are dropped.
#[derive(Clone)]
pub struct MemoryHandle {
    inner: Arc<RwLock<Inner>>,
    hooks: Arc<SurfaceHooks>,
}

impl MemoryHandle {
    /// Deliver a title-changed event, as the loaded page would.
    pub fn emit_title(&self, title: &str) {
        if self.inner.read().destroyed {
            return;
        }
        self.hooks.title_changed(title);
    }

    /// Simulate an outgoing navigation. The surface navigates in place
    /// only when the shell does not intercept it; returns whether it did.
    pub fn emit_navigation(&self, request: &NavigationRequest) -> bool {
        if self.inner.read().destroyed {
            return false;
        }

        let allowed = self.hooks.should_navigate(request);
        if allowed {
            self.inner
                .write()
                .history
                .push(request.url.as_str().to_string());
        }
        allowed
    }

    pub fn current_url(&self) -> Option<String> {
        self.inner.read().history.last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.read().history.clone()
    }

    pub fn load_count(&self) -> usize {
        self.inner.read().loads
    }

    pub fn reload_count(&self) -> usize {
        self.inner.read().reloads
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.read().destroyed
    }
}

/// Factory for [`MemorySurface`] instances, with per-tab handles for
/// inspection and event injection.
pub struct MemoryFactory {
    capabilities: SurfaceCapabilities,
    handles: Arc<RwLock<HashMap<TabId, MemoryHandle>>>,
}

impl MemoryFactory {
    pub fn new() -> Self {
        Self::with_capabilities(SurfaceCapabilities::default())
    }

    pub fn with_capabilities(capabilities: SurfaceCapabilities) -> Self {
        Self {
            capabilities,
            handles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Handle for the surface created for `id`, if one was ever created.
    pub fn handle(&self, id: TabId) -> Option<MemoryHandle> {
        self.handles.read().get(&id).cloned()
    }

    /// Number of surfaces created so far, destroyed ones included.
    pub fn created_count(&self) -> usize {
        self.handles.read().len()
    }
}

impl Default for MemoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryFactory {
    fn clone(&self) -> Self {
        Self {
            capabilities: self.capabilities,
            handles: Arc::clone(&self.handles),
        }
    }
}

impl SurfaceFactory for MemoryFactory {
    fn capabilities(&self) -> SurfaceCapabilities {
        self.capabilities
    }

    fn create(
        &self,
        id: TabId,
        config: &SurfaceConfig,
        hooks: SurfaceHooks,
    ) -> Result<Box<dyn BrowsingSurface>> {
        let inner = Arc::new(RwLock::new(Inner::default()));
        let hooks = Arc::new(hooks);

        self.handles.write().insert(
            id,
            MemoryHandle {
                inner: Arc::clone(&inner),
                hooks,
            },
        );

        tracing::debug!(tab_id = %id, javascript = config.javascript, "created memory surface");

        Ok(Box::new(MemorySurface { inner }))
    }
}
