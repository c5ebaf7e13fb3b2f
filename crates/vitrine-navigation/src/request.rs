//! Navigation request metadata.

use serde::{Deserialize, Serialize};
use url::Url;

/// The most recent hit-test/interaction signal observed on a surface.
///
/// Only meaningful on platforms whose navigation callbacks carry no
/// gesture or frame metadata; see
/// [`HitTestInterceptor`](crate::HitTestInterceptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSignal {
    /// No interaction correlates with the navigation
    Unknown,
    /// A pointer hit a navigable element shortly before the navigation
    Pointer,
}

/// Metadata for one outgoing navigation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub url: Url,
    /// Whether the navigation resulted from a direct user gesture, as
    /// opposed to a script-initiated or programmatic redirect
    pub user_gesture: bool,
    /// Whether it targets the top-level browsing context
    pub top_frame: bool,
    /// Fallback interaction signal for metadata-less platforms
    pub interaction: InteractionSignal,
}

impl NavigationRequest {
    /// Request built from precise platform metadata.
    pub fn with_metadata(url: Url, user_gesture: bool, top_frame: bool) -> Self {
        Self {
            url,
            user_gesture,
            top_frame,
            interaction: InteractionSignal::Unknown,
        }
    }

    /// Request built on a platform that only exposes a hit-test signal.
    ///
    /// The legacy callbacks this path serves fire for the top-level frame
    /// only, so `top_frame` is always set.
    pub fn from_hit_test(url: Url, interaction: InteractionSignal) -> Self {
        Self {
            url,
            user_gesture: false,
            top_frame: true,
            interaction,
        }
    }
}
