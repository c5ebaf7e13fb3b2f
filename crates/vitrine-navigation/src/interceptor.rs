//! Navigation classification.
//!
//! Clicking a link opens a new tab, mirroring the open-in-new-tab
//! ergonomics of a kiosk-style shell; passive redirects and embedded
//! sub-frame loads must never spawn tabs.

use std::sync::Arc;

use url::Url;

use crate::request::{InteractionSignal, NavigationRequest};

/// Classification verdict for one navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Open the target in a fresh tab; the surface must not navigate
    NewTab(Url),
    /// Let the existing surface handle the navigation in place
    Continue,
}

/// Pure decision procedure for outgoing navigations.
pub trait NavigationInterceptor: Send + Sync {
    fn classify(&self, request: &NavigationRequest) -> Verdict;
}

/// Precise path for platforms that report gesture and frame metadata
/// directly: a navigation opens a new tab iff it resulted from a direct
/// user gesture and targets the top-level frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataInterceptor;

impl NavigationInterceptor for MetadataInterceptor {
    fn classify(&self, request: &NavigationRequest) -> Verdict {
        if request.user_gesture && request.top_frame {
            tracing::debug!(url = %request.url, "gestured top-frame navigation");
            Verdict::NewTab(request.url.clone())
        } else {
            Verdict::Continue
        }
    }
}

/// Fallback for surfaces whose navigation callbacks carry no gesture or
/// frame metadata: any navigation correlated with the last known
/// interaction signal is treated as gestured. Prefer
/// [`MetadataInterceptor`] whenever the platform supports it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HitTestInterceptor;

impl NavigationInterceptor for HitTestInterceptor {
    fn classify(&self, request: &NavigationRequest) -> Verdict {
        if request.interaction != InteractionSignal::Unknown {
            tracing::debug!(url = %request.url, "hit-test correlated navigation");
            Verdict::NewTab(request.url.clone())
        } else {
            Verdict::Continue
        }
    }
}

/// What a browsing-surface platform can report about its navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// Navigation callbacks carry per-request gesture and frame metadata
    pub precise_navigation_metadata: bool,
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self {
            precise_navigation_metadata: true,
        }
    }
}

/// Select the interceptor implementation for a platform, once at startup.
pub fn interceptor_for(capabilities: &SurfaceCapabilities) -> Arc<dyn NavigationInterceptor> {
    if capabilities.precise_navigation_metadata {
        Arc::new(MetadataInterceptor)
    } else {
        tracing::info!("navigation metadata unavailable, using hit-test fallback");
        Arc::new(HitTestInterceptor)
    }
}
