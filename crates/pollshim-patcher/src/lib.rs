//! Rewrites generated WebAssembly glue code so the proxied `poll` shim waits
//! briefly instead of spinning.
//!
//! Under pthread-proxied execution the toolchain's `poll` shim returns the
//! proxied call's result straight away. When nothing is ready the worker
//! re-polls immediately and spins across the thread boundary. The patch
//! captures that result and, when it is zero, blocks on a one-slot shared
//! cell with a short timeout before returning it.
//!
//! The transformation is located purely by literal markers (see
//! [`MarkerRole`]); there is no parsing of the JavaScript.
//!
//! # Example
//!
//! ```
//! use pollshim_patcher::{PatchOptions, Variant, patch};
//!
//! let glue = "function ___syscall_poll(x) { if (ENVIRONMENT_IS_PTHREAD) return doCall(x); }";
//! let patched = patch(glue, &PatchOptions::for_variant(Variant::SyscallPoll))?;
//! assert!(patched.text().contains("Atomics.wait(__pollshimWaitCell, 0, 0, 50);"));
//! # Ok::<(), pollshim_patcher::PatchError>(())
//! ```

mod error;
mod marker;
mod patcher;

pub use error::PatchError;
pub use marker::{MarkerRole, MarkerSet, Variant, VariantParseError};
pub use patcher::{
    DEFAULT_WAIT_TIMEOUT_MS, MarkerPositions, PatchOptions, Patched, WAIT_CELL, cell_declaration,
    patch, patch_default,
};

#[cfg(test)]
mod tests;
