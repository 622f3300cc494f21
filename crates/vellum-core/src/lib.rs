//! Vellum Core
//!
//! Shared utilities for the Vellum sprite renderer: logging, profiling,
//! packed vertex vectors, small geometry types and engine-level configuration.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

use config::{Config, ProfilingMode};

/// Apply an engine [`Config`]: install logging, then enable profiling as requested.
pub fn init(config: &Config) {
    logging::init();

    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => profiling::set_enabled(true),
        ProfilingMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
    }
}
