//! Vitrine browsing-surface layer.
//!
//! The boundary to the web-content collaborator: a narrow
//! [`BrowsingSurface`] trait (load, reload, opaque history snapshot,
//! destroy, plus event wiring for title changes and navigation
//! interception) and the [`SurfaceBinding`] table that keys live surfaces
//! by tab identity so reordering never swaps surfaces between tabs.

mod binding;
mod error;
pub mod memory;
mod surface;

pub use binding::SurfaceBinding;
pub use error::SurfaceError;
pub use surface::{
    BrowsingSurface, CachePolicy, SurfaceConfig, SurfaceFactory, SurfaceHooks, SurfaceSnapshot,
    TabHost,
};

pub type Result<T> = std::result::Result<T, SurfaceError>;
