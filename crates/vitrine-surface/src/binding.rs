//! Identity-keyed surface table.
//!
//! Maps each live tab identity to its browsing surface so a reordered tab
//! keeps its own surface instance. Keying by identity rather than
//! position is load-bearing: position-keyed recycling would silently swap
//! surfaces between tabs on reorder.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use vitrine_navigation::{interceptor_for, NavigationInterceptor, Verdict};
use vitrine_tabs::TabId;

use crate::surface::{
    BrowsingSurface, SurfaceConfig, SurfaceFactory, SurfaceHooks, SurfaceSnapshot, TabHost,
};
use crate::Result;

pub struct SurfaceBinding {
    surfaces: Arc<RwLock<HashMap<TabId, Box<dyn BrowsingSurface>>>>,
    /// Snapshots staged for tabs whose surfaces do not exist yet
    staged: Arc<RwLock<HashMap<TabId, SurfaceSnapshot>>>,
    factory: Arc<dyn SurfaceFactory>,
    interceptor: Arc<dyn NavigationInterceptor>,
    config: SurfaceConfig,
}

impl SurfaceBinding {
    pub fn new(factory: Arc<dyn SurfaceFactory>, config: SurfaceConfig) -> Self {
        let interceptor = interceptor_for(&factory.capabilities());

        Self {
            surfaces: Arc::new(RwLock::new(HashMap::new())),
            staged: Arc::new(RwLock::new(HashMap::new())),
            factory,
            interceptor,
            config,
        }
    }

    /// Bind a surface to `id`, constructing one on first need.
    ///
    /// Idempotent: an existing binding is left untouched. A snapshot
    /// staged for `id` takes precedence over a fresh load of
    /// `initial_url`, so restoring never discards in-flight history. On
    /// failure nothing is bound and any staged snapshot stays staged for
    /// a retry.
    pub fn acquire(&self, id: TabId, initial_url: &str, host: Arc<dyn TabHost>) -> Result<()> {
        if self.surfaces.read().contains_key(&id) {
            return Ok(());
        }

        let hooks = self.hooks_for(id, host);
        let mut surface = self.factory.create(id, &self.config, hooks)?;

        let staged = self.staged.write().remove(&id);
        match staged {
            Some(snapshot) => surface.restore(&snapshot),
            None => surface.load(initial_url),
        }

        self.surfaces.write().insert(id, surface);
        tracing::info!(tab_id = %id, url = %initial_url, "bound surface");

        Ok(())
    }

    /// Wire the surface's event streams to the injected host capabilities
    /// and the platform-selected interceptor.
    fn hooks_for(&self, id: TabId, host: Arc<dyn TabHost>) -> SurfaceHooks {
        let title_host = Arc::clone(&host);
        let interceptor = Arc::clone(&self.interceptor);

        SurfaceHooks::new(
            move |title| title_host.update_tab_title(id, title),
            move |request| match interceptor.classify(request) {
                Verdict::NewTab(url) => {
                    host.open_new_tab(url.as_str());
                    false
                }
                Verdict::Continue => true,
            },
        )
    }

    /// Destroy the surface bound to `id` and drop its staged snapshot.
    /// Double-release is a no-op, not an error.
    pub fn release(&self, id: TabId) {
        let surface = self.surfaces.write().remove(&id);
        self.staged.write().remove(&id);

        if let Some(surface) = surface {
            surface.destroy();
            tracing::info!(tab_id = %id, "released surface");
        }
    }

    /// Destroy every bound surface (host teardown).
    pub fn release_all(&self) {
        let surfaces: Vec<_> = self.surfaces.write().drain().collect();
        for (id, surface) in surfaces {
            surface.destroy();
            tracing::debug!(tab_id = %id, "released surface");
        }
    }

    /// Serialized history of the surface bound to `id`, or `None` if no
    /// surface exists yet.
    pub fn snapshot(&self, id: TabId) -> Option<SurfaceSnapshot> {
        self.surfaces.read().get(&id).map(|surface| surface.snapshot())
    }

    /// Stage `snapshot` for the next acquire of `id`, or restore in place
    /// when the surface already exists.
    pub fn stage_restore(&self, id: TabId, snapshot: SurfaceSnapshot) {
        if let Some(surface) = self.surfaces.write().get_mut(&id) {
            surface.restore(&snapshot);
        } else {
            self.staged.write().insert(id, snapshot);
        }
    }

    /// `false` when no surface is bound for `id`.
    pub fn load(&self, id: TabId, url: &str) -> bool {
        match self.surfaces.write().get_mut(&id) {
            Some(surface) => {
                surface.load(url);
                true
            }
            None => false,
        }
    }

    /// `false` when no surface is bound for `id`.
    pub fn reload(&self, id: TabId) -> bool {
        match self.surfaces.write().get_mut(&id) {
            Some(surface) => {
                surface.reload();
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self, id: TabId) -> bool {
        self.surfaces.read().contains_key(&id)
    }

    pub fn bound_count(&self) -> usize {
        self.surfaces.read().len()
    }
}

impl Clone for SurfaceBinding {
    fn clone(&self) -> Self {
        Self {
            surfaces: Arc::clone(&self.surfaces),
            staged: Arc::clone(&self.staged),
            factory: Arc::clone(&self.factory),
            interceptor: Arc::clone(&self.interceptor),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryFactory;
    use url::Url;
    use vitrine_navigation::{InteractionSignal, NavigationRequest};

    #[derive(Default)]
    struct RecordingHost {
        opened: RwLock<Vec<String>>,
        titles: RwLock<Vec<(TabId, String)>>,
    }

    impl TabHost for RecordingHost {
        fn open_new_tab(&self, url: &str) {
            self.opened.write().push(url.to_string());
        }

        fn update_tab_title(&self, id: TabId, title: &str) {
            self.titles.write().push((id, title.to_string()));
        }
    }

    fn setup() -> (MemoryFactory, SurfaceBinding, Arc<RecordingHost>) {
        let factory = MemoryFactory::new();
        let binding = SurfaceBinding::new(
            Arc::new(factory.clone()),
            SurfaceConfig::default(),
        );
        (factory, binding, Arc::new(RecordingHost::default()))
    }

    #[test]
    fn acquire_is_lazy_and_idempotent() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        assert_eq!(factory.created_count(), 0);

        binding.acquire(id, "https://a.test/", host.clone()).unwrap();
        binding.acquire(id, "https://a.test/", host).unwrap();

        assert_eq!(factory.created_count(), 1);
        let handle = factory.handle(id).unwrap();
        assert_eq!(handle.load_count(), 1);
        assert_eq!(handle.current_url().as_deref(), Some("https://a.test/"));
    }

    #[test]
    fn staged_snapshot_takes_precedence_over_load() {
        let (factory, binding, host) = setup();
        let first = TabId::fresh();

        binding.acquire(first, "https://a.test/", host.clone()).unwrap();
        binding.load(first, "https://a.test/deeper");
        let snapshot = binding.snapshot(first).unwrap();

        let second = TabId::fresh();
        binding.stage_restore(second, snapshot);
        binding.acquire(second, "https://fresh.test/", host).unwrap();

        let handle = factory.handle(second).unwrap();
        // Restored history, not a fresh load of the initial URL
        assert_eq!(handle.load_count(), 0);
        assert_eq!(
            handle.history(),
            vec!["https://a.test/", "https://a.test/deeper"]
        );
    }

    #[test]
    fn stage_restore_on_live_surface_restores_in_place() {
        let (factory, binding, host) = setup();
        let first = TabId::fresh();
        let second = TabId::fresh();

        binding.acquire(first, "https://a.test/", host.clone()).unwrap();
        binding.acquire(second, "https://b.test/", host).unwrap();

        let snapshot = binding.snapshot(first).unwrap();
        binding.stage_restore(second, snapshot);

        let handle = factory.handle(second).unwrap();
        assert_eq!(handle.history(), vec!["https://a.test/"]);
    }

    #[test]
    fn release_destroys_exactly_once() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        binding.acquire(id, "https://a.test/", host).unwrap();
        let handle = factory.handle(id).unwrap();

        binding.release(id);
        assert!(handle.is_destroyed());
        assert!(!binding.is_bound(id));

        // Double-release is a silent no-op
        binding.release(id);
    }

    #[test]
    fn release_all_tears_down_every_surface() {
        let (factory, binding, host) = setup();
        let a = TabId::fresh();
        let b = TabId::fresh();

        binding.acquire(a, "https://a.test/", host.clone()).unwrap();
        binding.acquire(b, "https://b.test/", host).unwrap();
        binding.release_all();

        assert_eq!(binding.bound_count(), 0);
        assert!(factory.handle(a).unwrap().is_destroyed());
        assert!(factory.handle(b).unwrap().is_destroyed());
    }

    #[test]
    fn snapshot_absent_surface_is_none() {
        let (_, binding, _) = setup();
        assert!(binding.snapshot(TabId::fresh()).is_none());
    }

    #[test]
    fn load_and_reload_require_a_binding() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        assert!(!binding.load(id, "https://a.test/"));
        assert!(!binding.reload(id));

        binding.acquire(id, "https://a.test/", host).unwrap();
        assert!(binding.reload(id));
        assert_eq!(factory.handle(id).unwrap().reload_count(), 1);
    }

    #[test]
    fn title_events_flow_to_the_host() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        binding.acquire(id, "https://a.test/", host.clone()).unwrap();
        factory.handle(id).unwrap().emit_title("Example Domain");

        assert_eq!(
            host.titles.read().as_slice(),
            &[(id, "Example Domain".to_string())]
        );
    }

    #[test]
    fn gestured_navigation_opens_new_tab_instead_of_navigating() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        binding.acquire(id, "https://a.test/", host.clone()).unwrap();
        let handle = factory.handle(id).unwrap();

        let request = NavigationRequest::with_metadata(
            Url::parse("https://linked.test/").unwrap(),
            true,
            true,
        );
        let navigated = handle.emit_navigation(&request);

        assert!(!navigated);
        assert_eq!(handle.history(), vec!["https://a.test/"]);
        assert_eq!(host.opened.read().as_slice(), &["https://linked.test/"]);
    }

    #[test]
    fn passive_navigation_continues_in_place() {
        let (factory, binding, host) = setup();
        let id = TabId::fresh();

        binding.acquire(id, "https://a.test/", host.clone()).unwrap();
        let handle = factory.handle(id).unwrap();

        let request = NavigationRequest::with_metadata(
            Url::parse("https://redirect.test/").unwrap(),
            false,
            true,
        );
        let navigated = handle.emit_navigation(&request);

        assert!(navigated);
        assert_eq!(
            handle.history(),
            vec!["https://a.test/", "https://redirect.test/"]
        );
        assert!(host.opened.read().is_empty());
    }

    #[test]
    fn degraded_platform_uses_hit_test_fallback() {
        let factory = MemoryFactory::with_capabilities(vitrine_navigation::SurfaceCapabilities {
            precise_navigation_metadata: false,
        });
        let binding = SurfaceBinding::new(Arc::new(factory.clone()), SurfaceConfig::default());
        let host = Arc::new(RecordingHost::default());
        let id = TabId::fresh();

        binding.acquire(id, "https://a.test/", host.clone()).unwrap();
        let handle = factory.handle(id).unwrap();

        let request = NavigationRequest::from_hit_test(
            Url::parse("https://linked.test/").unwrap(),
            InteractionSignal::Pointer,
        );
        assert!(!handle.emit_navigation(&request));
        assert_eq!(host.opened.read().as_slice(), &["https://linked.test/"]);
    }
}
