//! Tab identity and entry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::phase::TabPhase;

/// Opaque, process-unique tab identity.
///
/// Identities are never reused within a session, even after the owning
/// entry is removed; a stale id from a closed tab resolves to "unknown"
/// in registry lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabEntry {
    /// Unique identifier
    pub id: TabId,
    /// Display title; falls back to `initial_url`, never blank
    pub title: String,
    /// The URL the tab was created with
    pub initial_url: String,
    /// Current lifecycle phase
    pub phase: TabPhase,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
}

impl TabEntry {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: TabId::fresh(),
            title: url.clone(),
            initial_url: url,
            phase: TabPhase::Created,
            created_at: Utc::now(),
        }
    }
}
