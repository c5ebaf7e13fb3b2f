//! Browsing-surface collaborator contract.

use serde::{Deserialize, Serialize};

use vitrine_navigation::{NavigationRequest, SurfaceCapabilities};

use crate::error::SurfaceError;
use vitrine_tabs::TabId;

/// Opaque serialized navigation history for one surface.
///
/// The format is owned entirely by the browsing-surface collaborator; the
/// core never parses it, only passes it back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSnapshot(Vec<u8>);

impl SurfaceSnapshot {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cache behavior requested from a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Use cached content when fresh, hit the network otherwise
    #[default]
    Default,
    /// Prefer cached content even when stale
    CacheElseNetwork,
    /// Bypass the cache entirely
    NoCache,
    /// Never hit the network
    CacheOnly,
}

/// Settings applied to every surface at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Enable script execution
    pub javascript: bool,
    /// Enable persistent local/DOM storage
    pub local_storage: bool,
    /// Cache behavior
    pub cache: CachePolicy,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            javascript: true,
            local_storage: true,
            cache: CachePolicy::Default,
        }
    }
}

/// One navigable web-content view.
///
/// The narrow contract the core needs from the rendering collaborator;
/// rendering, script execution, DOM and networking all stay behind it.
/// None of these operations block: network activity is entirely the
/// collaborator's concern.
pub trait BrowsingSurface {
    fn load(&mut self, url: &str);

    fn reload(&mut self);

    /// Serialized navigation history; opaque to the caller.
    fn snapshot(&self) -> SurfaceSnapshot;

    fn restore(&mut self, snapshot: &SurfaceSnapshot);

    /// Tear the surface down. Consumes the handle, so a surface can only
    /// be destroyed once.
    fn destroy(self: Box<Self>);
}

/// Event wiring installed when a surface is constructed.
///
/// The surface delivers its title-changed stream and navigation-intercept
/// requests through these callbacks; they run on the event-loop thread
/// and must never block.
pub struct SurfaceHooks {
    on_title_changed: Box<dyn Fn(&str)>,
    on_navigation: Box<dyn Fn(&NavigationRequest) -> bool>,
}

impl SurfaceHooks {
    pub fn new(
        on_title_changed: impl Fn(&str) + 'static,
        on_navigation: impl Fn(&NavigationRequest) -> bool + 'static,
    ) -> Self {
        Self {
            on_title_changed: Box::new(on_title_changed),
            on_navigation: Box::new(on_navigation),
        }
    }

    /// Deliver a title-changed event from the surface.
    pub fn title_changed(&self, title: &str) {
        (self.on_title_changed)(title)
    }

    /// Ask whether the surface should handle `request` in place. Returns
    /// `false` when the shell intercepted it (e.g. opened a new tab).
    pub fn should_navigate(&self, request: &NavigationRequest) -> bool {
        (self.on_navigation)(request)
    }
}

impl std::fmt::Debug for SurfaceHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHooks").finish_non_exhaustive()
    }
}

/// Host capabilities injected into each surface wiring step.
///
/// Exactly two: open a new tab and update a tab title. Implemented by the
/// session controller and passed in explicitly, never discovered through
/// ambient container lookup.
pub trait TabHost {
    fn open_new_tab(&self, url: &str);
    fn update_tab_title(&self, id: TabId, title: &str);
}

/// Constructs platform surfaces.
pub trait SurfaceFactory {
    /// The navigation metadata this platform can report; decides the
    /// interceptor path once at startup.
    fn capabilities(&self) -> SurfaceCapabilities;

    fn create(
        &self,
        id: TabId,
        config: &SurfaceConfig,
        hooks: SurfaceHooks,
    ) -> Result<Box<dyn BrowsingSurface>, SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_mirrors_shell_settings() {
        let config = SurfaceConfig::default();
        assert!(config.javascript);
        assert!(config.local_storage);
        assert_eq!(config.cache, CachePolicy::Default);
    }

    #[test]
    fn snapshot_bytes_pass_through_unchanged() {
        let snapshot = SurfaceSnapshot::from_bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(snapshot.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert!(!snapshot.is_empty());
        assert!(SurfaceSnapshot::default().is_empty());
    }
}
