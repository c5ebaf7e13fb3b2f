//! Session error types
//!
//! Routine mismatches (stale identity, out-of-range index) never surface
//! as errors; only the external collaborator can genuinely fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("surface error: {0}")]
    Surface(#[from] vitrine_surface::SurfaceError),
}
