//! Vitrine session coordination.
//!
//! Composes the tab registry, the surface binding and the navigation
//! interception policy behind the host-facing operations of the shell:
//! new tab, close tab, activate, load/reload on the active tab, and
//! whole-session snapshot/restore.

mod controller;
mod error;
mod observer;

pub use controller::{SessionController, SessionOptions};
pub use error::SessionError;
pub use observer::{NoopObserver, SessionObserver};

pub type Result<T> = std::result::Result<T, SessionError>;
