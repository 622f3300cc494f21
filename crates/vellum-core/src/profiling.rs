//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing,
//! so call sites never need their own `cfg` guards.

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __vellum_profile_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__vellum_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__vellum_profile_noop as profile_scope;

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

/// Address the puffin HTTP server listens on.
pub const PUFFIN_ADDRESS: &str = "0.0.0.0:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Turn scope recording on or off.
pub fn set_enabled(enabled: bool) {
    #[cfg(feature = "profiling")]
    puffin::set_scopes_on(enabled);

    #[cfg(not(feature = "profiling"))]
    if enabled {
        tracing::warn!("Profiling requested but the `profiling` feature is disabled");
    }
}

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use vellum_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => {
            set_enabled(true);

            #[cfg(feature = "profiling")]
            match puffin_http::Server::new(PUFFIN_ADDRESS) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{PUFFIN_ADDRESS}");
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

/// Mark the start of a new profiling frame.
///
/// Call once per rendered frame, typically right before `SpriteBatch::begin`.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
