//! Vitrine core.
//!
//! Central coordination layer for the Vitrine shell: configuration, the
//! top-level [`Shell`] container, the exit gate, and re-exports of the
//! component crates so hosts depend on one crate.

mod config;
mod error;
mod exit;
mod shell;

pub use config::Config;
pub use error::CoreError;
pub use exit::ExitGate;
pub use shell::{SessionState, Shell};

// Re-export core components
pub use vitrine_navigation::{
    interceptor_for, HitTestInterceptor, InteractionSignal, MetadataInterceptor,
    NavigationInterceptor, NavigationRequest, SurfaceCapabilities, Verdict,
};
pub use vitrine_session::{
    NoopObserver, SessionController, SessionError, SessionObserver, SessionOptions,
};
pub use vitrine_surface::{
    BrowsingSurface, CachePolicy, SurfaceBinding, SurfaceConfig, SurfaceError, SurfaceFactory,
    SurfaceHooks, SurfaceSnapshot, TabHost,
};
pub use vitrine_tabs::{CloseOutcome, TabEntry, TabId, TabPhase, TabRegistry, TitleUpdate};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
