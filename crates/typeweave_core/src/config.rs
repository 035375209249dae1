//! Engine configuration.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Configuration for the combinator engine.
///
/// Controls failure logging, update recursion depth, and diagnostic names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Log every reported failure at debug level.
    pub log_failures: bool,

    /// Maximum nesting of an update spec.
    pub max_update_depth: usize,

    /// Render structural names for unnamed composite types.
    pub infer_names: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_failures: true,
            max_update_depth: 64,
            infer_names: true,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with a tighter update depth.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            log_failures: true,
            max_update_depth: 32,
            infer_names: true,
        }
    }

    /// Creates a configuration that never logs failures.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            log_failures: false,
            ..Self::default()
        }
    }

    /// Builder method to set failure logging.
    #[must_use]
    pub fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }

    /// Builder method to set the update depth limit.
    #[must_use]
    pub fn with_max_update_depth(mut self, depth: usize) -> Self {
        self.max_update_depth = depth;
        self
    }

    /// Builder method to set name inference.
    #[must_use]
    pub fn with_infer_names(mut self, infer_names: bool) -> Self {
        self.infer_names = infer_names;
        self
    }
}

static CONFIG: Lazy<RwLock<EngineConfig>> = Lazy::new(|| RwLock::new(EngineConfig::default()));

/// Installs `config` process-wide.
pub fn configure(config: EngineConfig) {
    *CONFIG.write() = config;
}

/// Returns a copy of the active configuration.
#[must_use]
pub fn config() -> EngineConfig {
    CONFIG.read().clone()
}
