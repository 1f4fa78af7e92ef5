//! Shared configuration for the pollshim binary.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a
//! configuration file (`--config-path` or `POLLSHIM_CONFIG_PATH`), then
//! `POLLSHIM_*` environment variables, then command-line flags.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use pollshim_patcher::PatchOptions;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
    default_variant, default_wait_timeout_ms,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use pollshim_patcher::{Variant, VariantParseError};

/// Resolved configuration for one pollshim run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POLLSHIM")]
pub struct Config {
    /// Tracing filter expression (for example `pollshim=debug`).
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records written to stderr.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Marker-set variant matching the toolchain that produced the glue.
    #[serde(default = "default_variant")]
    #[ortho_config(default = default_variant())]
    pub variant: Variant,
    /// Bound on the inserted wait, in milliseconds.
    #[serde(default = "default_wait_timeout_ms")]
    #[ortho_config(default = default_wait_timeout_ms())]
    pub wait_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            variant: default_variant(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Selected marker-set variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Bound on the inserted wait, in milliseconds.
    #[must_use]
    pub const fn wait_timeout_ms(&self) -> u32 {
        self.wait_timeout_ms
    }

    /// Builds the patcher options described by this configuration.
    #[must_use]
    pub const fn patch_options(&self) -> PatchOptions {
        PatchOptions::for_variant(self.variant).with_wait_timeout(self.wait_timeout_ms)
    }
}
