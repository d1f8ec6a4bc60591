use std::{env, path::PathBuf};

/// Base directory for default output paths
pub const ASSETS_DIR_VAR: &str = "LUTGEN_ASSETS_DIR";
/// Log filter directive, `RUST_LOG` syntax
pub const LOG_VAR: &str = "LUTGEN_LOG";
pub const FALLBACK_LOG_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Single-entry LUT location relative to the assets directory
pub const SINGLE_ENTRY_PATH: &str = "assets/luts/dummy_lut.h5";

/// Configuration shared by the lutgen binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Directory that default output paths are resolved against.
    pub assets_dir: PathBuf,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl ToolConfig {
    /// Builds a configuration from environment variables, falling back to
    /// the current directory and `warn` level logging.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ToolConfig::from_env`] with a custom variable source.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let assets_dir = var(ASSETS_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_filter = var(LOG_VAR)
            .or_else(|| var(FALLBACK_LOG_VAR))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            assets_dir,
            log_filter,
        }
    }

    /// Default output path of `single-entry-lut`
    pub fn single_entry_output(&self) -> PathBuf {
        self.assets_dir.join(SINGLE_ENTRY_PATH)
    }
}
