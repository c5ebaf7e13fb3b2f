//! Surface error types

use thiserror::Error;

use vitrine_tabs::TabId;

#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The platform collaborator failed to initialize a surface. The tab
    /// entry survives with its URL as title; the host may retry or show a
    /// placeholder.
    #[error("surface acquire failed for tab {id}: {reason}")]
    AcquireFailed { id: TabId, reason: String },
}
