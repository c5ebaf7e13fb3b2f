//! Vitrine navigation interception.
//!
//! Decides whether an outgoing navigation opens a new tab or continues in
//! the current surface:
//! 1. Direct user gesture targeting the top-level frame → new tab
//! 2. Everything else (redirects, sub-frame loads, programmatic
//!    navigation) → continue in place
//!
//! Platforms without per-request gesture metadata use a documented
//! hit-test fallback, selected once at startup by capability detection.

mod interceptor;
mod request;

pub use interceptor::{
    interceptor_for, HitTestInterceptor, MetadataInterceptor, NavigationInterceptor,
    SurfaceCapabilities, Verdict,
};
pub use request::{InteractionSignal, NavigationRequest};
