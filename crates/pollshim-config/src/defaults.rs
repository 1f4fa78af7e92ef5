use pollshim_patcher::{DEFAULT_WAIT_TIMEOUT_MS, Variant};

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
///
/// Kept at `warn` so patch progress does not interleave with build output
/// unless asked for.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Returns [`DEFAULT_LOG_FILTER`].
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default marker-set variant.
#[must_use]
pub const fn default_variant() -> Variant {
    Variant::SyscallPoll
}

/// Default bound on the inserted wait, in milliseconds.
#[must_use]
pub const fn default_wait_timeout_ms() -> u32 {
    DEFAULT_WAIT_TIMEOUT_MS
}
