//! Per-tab lifecycle state machine.
//!
//! ```text
//! Created
//!   ↓ surface bound
//! Activated
//!   ↓ first title
//! Loaded
//!   ↓ close
//! Closed
//! ```
//!
//! `Closed` is terminal; any event that arrives for a closed identity is
//! dropped by the registry's unknown-id rule, never delivered to a
//! recycled identity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPhase {
    /// Entry exists, no surface bound yet
    Created,
    /// Surface acquired, content loading
    Activated,
    /// At least one real title has arrived; titles may keep updating
    Loaded,
    /// Entry removed from the registry; terminal
    Closed,
}

impl TabPhase {
    /// Check if advancing to another phase is valid
    pub fn can_advance_to(&self, target: TabPhase) -> bool {
        match (self, target) {
            (TabPhase::Created, TabPhase::Activated) => true,
            (TabPhase::Activated, TabPhase::Loaded) => true,
            // Any live phase may close
            (TabPhase::Created | TabPhase::Activated | TabPhase::Loaded, TabPhase::Closed) => true,
            // Repeated title updates keep the tab loaded
            (TabPhase::Loaded, TabPhase::Loaded) => true,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TabPhase::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabPhase::Created => "created",
            TabPhase::Activated => "activated",
            TabPhase::Loaded => "loaded",
            TabPhase::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TabPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_advances() {
        assert!(TabPhase::Created.can_advance_to(TabPhase::Activated));
        assert!(TabPhase::Activated.can_advance_to(TabPhase::Loaded));
        assert!(TabPhase::Loaded.can_advance_to(TabPhase::Loaded));
        assert!(TabPhase::Created.can_advance_to(TabPhase::Closed));
        assert!(TabPhase::Activated.can_advance_to(TabPhase::Closed));
        assert!(TabPhase::Loaded.can_advance_to(TabPhase::Closed));
    }

    #[test]
    fn invalid_advances() {
        // Titles only arrive once a surface is bound
        assert!(!TabPhase::Created.can_advance_to(TabPhase::Loaded));
        // No transition leaves the terminal phase
        assert!(!TabPhase::Closed.can_advance_to(TabPhase::Created));
        assert!(!TabPhase::Closed.can_advance_to(TabPhase::Activated));
        assert!(!TabPhase::Closed.can_advance_to(TabPhase::Loaded));
        assert!(!TabPhase::Closed.can_advance_to(TabPhase::Closed));
        // No going backwards
        assert!(!TabPhase::Loaded.can_advance_to(TabPhase::Activated));
        assert!(!TabPhase::Activated.can_advance_to(TabPhase::Created));
    }
}
