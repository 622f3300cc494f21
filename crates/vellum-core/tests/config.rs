//! Engine configuration and initialisation tests.

use vellum_core::config::{Config, ProfilingMode};

#[test]
fn test_default_config_disables_profiling() {
    let config = Config::default();
    assert_eq!(config.profiling, ProfilingMode::Off);
}

#[test]
fn test_with_profiling_overrides_mode() {
    let config = Config::default().with_profiling(ProfilingMode::On);
    assert_eq!(config.profiling, ProfilingMode::On);
}

#[test]
fn test_init_is_repeatable() {
    let config = Config::default().with_profiling(ProfilingMode::On);
    vellum_core::init(&config);
    vellum_core::init(&config);
    vellum_core::profiling::new_frame();
}
