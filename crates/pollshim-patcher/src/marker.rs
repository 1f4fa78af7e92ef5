//! Marker literals and the named marker-set variants.
//!
//! A marker is a fixed substring used as a search anchor inside generated glue
//! code. The patcher searches for four of them in order; each
//! [`MarkerRole`] names one step of that search so failures can say which
//! anchor was missing.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Position of a marker within the ordered search sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// Start of the target function definition.
    Function,
    /// Start of the conditional guarding pthread-proxied execution.
    Guard,
    /// The `return` keyword whose statement is rewritten.
    Return,
    /// Closing of the call expression whose result is captured.
    StatementEnd,
}

impl MarkerRole {
    /// All roles in search order.
    pub const ALL: [Self; 4] = [
        Self::Function,
        Self::Guard,
        Self::Return,
        Self::StatementEnd,
    ];
}

impl fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Guard => write!(f, "guard"),
            Self::Return => write!(f, "return"),
            Self::StatementEnd => write!(f, "statement end"),
        }
    }
}

/// The four marker literals used by one patch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSet {
    function: &'static str,
    guard: &'static str,
    ret: &'static str,
    statement_end: &'static str,
}

/// Keyword replaced by the capture block. The trailing space is consumed so
/// the captured expression follows the assignment directly.
const RETURN_MARKER: &str = "return ";
const STATEMENT_END_MARKER: &str = ");";

impl MarkerSet {
    /// Builds a marker set from a function and guard literal, sharing the
    /// return and statement-end markers every variant uses.
    #[must_use]
    pub const fn new(function: &'static str, guard: &'static str) -> Self {
        Self {
            function,
            guard,
            ret: RETURN_MARKER,
            statement_end: STATEMENT_END_MARKER,
        }
    }

    /// Returns the literal searched for in the given role.
    #[must_use]
    pub const fn get(&self, role: MarkerRole) -> &'static str {
        match role {
            MarkerRole::Function => self.function,
            MarkerRole::Guard => self.guard,
            MarkerRole::Return => self.ret,
            MarkerRole::StatementEnd => self.statement_end,
        }
    }
}

/// Named marker sets, one per supported toolchain output shape.
///
/// # Examples
///
/// ```
/// use pollshim_patcher::{MarkerRole, Variant};
///
/// let variant: Variant = "sys-poll".parse().expect("known variant");
/// assert_eq!(variant.markers().get(MarkerRole::Function), "function ___sys_poll(");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Variant {
    /// Output naming the shim `___syscall_poll` behind a bare pthread guard.
    #[default]
    SyscallPoll,
    /// Older output naming the shim `___sys_poll`, whose guard proxies through
    /// `_emscripten_proxy_to_main_thread_js`.
    SysPoll,
}

impl Variant {
    /// Returns the marker literals for this variant.
    #[must_use]
    pub const fn markers(self) -> MarkerSet {
        match self {
            Self::SyscallPoll => {
                MarkerSet::new("function ___syscall_poll(", "if (ENVIRONMENT_IS_PTHREAD)")
            }
            Self::SysPoll => MarkerSet::new(
                "function ___sys_poll(",
                "if (ENVIRONMENT_IS_PTHREAD) return _emscripten_proxy_to_main_thread_js(",
            ),
        }
    }
}

/// Errors encountered while parsing a [`Variant`] from text.
pub type VariantParseError = strum::ParseError;
