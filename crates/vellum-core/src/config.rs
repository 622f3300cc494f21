/// Engine-level configuration for Vellum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub profiling: ProfilingMode,
}

impl Config {
    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    #[default]
    Off,
    /// Profiling scopes are recorded and can be inspected in-process
    On,
    /// Profiling scopes are recorded and served to external tools such as 'puffin_viewer'
    WithWebserver,
}
