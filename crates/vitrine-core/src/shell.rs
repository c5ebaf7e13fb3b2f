//! Top-level shell container.
//!
//! Owns the configuration, the session controller and the exit gate.
//! Window chrome and toolbars are thin callers of these operations and
//! render from the observer notifications.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use vitrine_session::{SessionController, SessionObserver, SessionOptions};
use vitrine_surface::{SurfaceFactory, SurfaceSnapshot};
use vitrine_tabs::{TabEntry, TabId};

use crate::config::Config;
use crate::exit::ExitGate;
use crate::Result;

/// Serializable per-tab snapshot state, stored alongside the host's own
/// transient-state persistence. The blobs are opaque to the shell and
/// passed back to the surfaces unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub snapshots: HashMap<TabId, SurfaceSnapshot>,
}

pub struct Shell {
    config: Config,
    controller: SessionController,
    exit_gate: ExitGate,
}

impl Shell {
    /// Validate `config` and build the shell. No surface exists until
    /// [`initialize`](Self::initialize).
    pub fn new(
        config: Config,
        factory: Arc<dyn SurfaceFactory>,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self> {
        config.validate()?;

        let options = SessionOptions {
            home_url: config.home_url.clone(),
            initial_tabs: config.initial_tabs.clone(),
            pin_first_tab: config.pin_first_tab,
            surface: config.surface.clone(),
        };
        let exit_gate = ExitGate::new(config.exit_password.clone());

        Ok(Self {
            config,
            controller: SessionController::new(options, factory, observer),
            exit_gate,
        })
    }

    /// Bind a surface to the seeded active tab.
    pub fn initialize(&self) -> Result<()> {
        self.controller.initialize()?;
        tracing::info!(
            home = %self.config.home_url,
            tabs = self.controller.tab_count(),
            "shell initialized"
        );
        Ok(())
    }

    // === Tab operations ===

    pub fn new_tab(&self, url: &str) -> Result<TabId> {
        Ok(self.controller.new_tab(url)?)
    }

    pub fn close_tab(&self, index: usize) -> Result<()> {
        Ok(self.controller.close_tab(index)?)
    }

    pub fn activate(&self, index: usize) -> Result<()> {
        Ok(self.controller.activate(index)?)
    }

    pub fn tabs(&self) -> Vec<TabEntry> {
        self.controller.tabs()
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    pub fn is_closable(&self, index: usize) -> bool {
        self.controller.is_closable(index)
    }

    // === Toolbar operations ===

    /// Home button: load the configured home URL in the active tab.
    pub fn go_home(&self) -> Result<()> {
        let home = self.config.home_url.clone();
        self.load_on_active(&home)
    }

    pub fn load_on_active(&self, url: &str) -> Result<()> {
        Ok(self.controller.load_on_active(url)?)
    }

    pub fn reload_active(&self) -> Result<()> {
        Ok(self.controller.reload_active()?)
    }

    // === Suspension ===

    pub fn snapshot_state(&self) -> SessionState {
        SessionState {
            snapshots: self.controller.snapshot_all(),
        }
    }

    pub fn restore_state(&self, state: SessionState) {
        self.controller.restore_all(state.snapshots);
    }

    // === Exit ===

    /// `true` when `attempt` unlocks the exit gate; the host then tears
    /// down and quits.
    pub fn verify_exit(&self, attempt: &str) -> bool {
        let allowed = self.exit_gate.verify(attempt);
        if !allowed {
            tracing::info!("exit attempt rejected");
        }
        allowed
    }

    pub fn exit_gated(&self) -> bool {
        self.exit_gate.is_enabled()
    }

    /// Release every surface; the host quits afterwards.
    pub fn teardown(&self) {
        self.controller.teardown();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }
}
