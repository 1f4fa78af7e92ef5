//! The glue rewrite itself.
//!
//! The rewrite is four sequential find-from-offset searches, each of which
//! may fail independently, interleaved with three splices:
//!
//! 1. declare the synchronization cell ahead of the shim function;
//! 2. open a block capturing the proxied call's result in `ret`;
//! 3. after the call statement, wait on the cell while `ret == 0`, return
//!    `ret` and close the block.

use tracing::debug;

use crate::error::PatchError;
use crate::marker::{MarkerRole, MarkerSet, Variant};

/// Identifier of the shared cell declared ahead of the shim.
pub const WAIT_CELL: &str = "__pollshimWaitCell";

/// Default bound on the wait, in milliseconds.
pub const DEFAULT_WAIT_TIMEOUT_MS: u32 = 50;

const CAPTURE_OPEN: &str = "{\nvar ret =";

/// Settings for one patch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOptions {
    markers: MarkerSet,
    wait_timeout_ms: u32,
}

impl PatchOptions {
    /// Creates options for an explicit marker set with the default timeout.
    #[must_use]
    pub const fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }

    /// Creates options for a named variant with the default timeout.
    #[must_use]
    pub const fn for_variant(variant: Variant) -> Self {
        Self::new(variant.markers())
    }

    /// Overrides the wait timeout.
    #[must_use]
    pub const fn with_wait_timeout(mut self, wait_timeout_ms: u32) -> Self {
        self.wait_timeout_ms = wait_timeout_ms;
        self
    }

    /// Marker literals searched for by this run.
    #[must_use]
    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Bound on the inserted wait, in milliseconds.
    #[must_use]
    pub const fn wait_timeout_ms(&self) -> u32 {
        self.wait_timeout_ms
    }
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

/// Byte offsets at which each marker was found.
///
/// Each offset refers to the text as it stood when that search ran: the
/// function, guard and return offsets index the text after the cell
/// declaration was inserted, the statement end offset the text after the
/// return keyword was replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerPositions {
    /// Start of the shim function definition.
    pub function: usize,
    /// Start of the pthread guard.
    pub guard: usize,
    /// Start of the rewritten `return` keyword.
    pub ret: usize,
    /// Start of the `);` closing the captured call.
    pub statement_end: usize,
}

impl MarkerPositions {
    /// Returns the recorded offset for a role.
    #[must_use]
    pub const fn get(&self, role: MarkerRole) -> usize {
        match role {
            MarkerRole::Function => self.function,
            MarkerRole::Guard => self.guard,
            MarkerRole::Return => self.ret,
            MarkerRole::StatementEnd => self.statement_end,
        }
    }
}

/// Result of a successful patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    text: String,
    positions: MarkerPositions,
}

impl Patched {
    /// The rewritten glue code.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the result, returning the rewritten glue code.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Offsets at which the markers were found.
    #[must_use]
    pub const fn positions(&self) -> &MarkerPositions {
        &self.positions
    }
}

/// Rewrites the proxied return of the poll shim into a bounded wait.
///
/// The output is a pure function of `source` and `options`. The rewrite is
/// meant to be applied once: the function marker survives in the output, so
/// a second run would declare the cell again and then either fail to find a
/// statement end or wrap the wrong `return`.
///
/// # Errors
///
/// Returns [`PatchError::MarkerNotFound`] when any marker is missing at or
/// after the position of the one before it.
///
/// # Examples
///
/// ```
/// use pollshim_patcher::{PatchOptions, patch};
///
/// let source = "function ___syscall_poll(x) { if (ENVIRONMENT_IS_PTHREAD) return doCall(x); }";
/// let patched = patch(source, &PatchOptions::default())?;
/// assert!(patched.text().contains("var ret =doCall(x);"));
/// # Ok::<(), pollshim_patcher::PatchError>(())
/// ```
pub fn patch(source: &str, options: &PatchOptions) -> Result<Patched, PatchError> {
    let markers = options.markers();

    let first_function = locate(source, markers, MarkerRole::Function, 0)?;
    let declared = splice(
        source,
        first_function,
        "",
        &cell_declaration(),
        MarkerRole::Function,
    )?;

    let function = locate(&declared, markers, MarkerRole::Function, 0)?;
    let guard = locate(&declared, markers, MarkerRole::Guard, function)?;
    let ret = locate(&declared, markers, MarkerRole::Return, guard)?;
    let opened = splice(
        &declared,
        ret,
        markers.get(MarkerRole::Return),
        CAPTURE_OPEN,
        MarkerRole::Return,
    )?;

    let statement_end = locate(&opened, markers, MarkerRole::StatementEnd, ret)?;
    let after_statement = statement_end + markers.get(MarkerRole::StatementEnd).len();
    let text = splice(
        &opened,
        after_statement,
        "",
        &wait_block(options.wait_timeout_ms()),
        MarkerRole::StatementEnd,
    )?;

    Ok(Patched {
        text,
        positions: MarkerPositions {
            function,
            guard,
            ret,
            statement_end,
        },
    })
}

/// Patches with the default variant and timeout.
///
/// # Errors
///
/// See [`patch`].
pub fn patch_default(source: &str) -> Result<Patched, PatchError> {
    patch(source, &PatchOptions::default())
}

/// Line declaring the single-slot shared cell, zeroed on allocation.
#[must_use]
pub fn cell_declaration() -> String {
    format!("var {WAIT_CELL} = new Int32Array(new SharedArrayBuffer(4));\n")
}

fn wait_block(timeout_ms: u32) -> String {
    format!("\nif (ret == 0) Atomics.wait({WAIT_CELL}, 0, 0, {timeout_ms});\nreturn ret;\n}}")
}

fn locate(
    text: &str,
    markers: &MarkerSet,
    role: MarkerRole,
    from: usize,
) -> Result<usize, PatchError> {
    let marker = markers.get(role);
    let found = text
        .get(from..)
        .and_then(|tail| tail.find(marker))
        .map(|offset| offset + from)
        .ok_or_else(|| PatchError::marker_not_found(role, marker, from))?;
    debug!(%role, marker, offset = found, "located marker");
    Ok(found)
}

/// Rebuilds `text` with `removed` at `at` swapped for `inserted`.
///
/// `removed` must be present at `at`; an empty `removed` is a plain insert.
fn splice(
    text: &str,
    at: usize,
    removed: &str,
    inserted: &str,
    role: MarkerRole,
) -> Result<String, PatchError> {
    let (head, tail) = text
        .split_at_checked(at)
        .ok_or_else(|| PatchError::marker_not_found(role, removed, at))?;
    let rest = tail
        .strip_prefix(removed)
        .ok_or_else(|| PatchError::marker_not_found(role, removed, at))?;

    let mut rebuilt = String::with_capacity(head.len() + inserted.len() + rest.len());
    rebuilt.push_str(head);
    rebuilt.push_str(inserted);
    rebuilt.push_str(rest);
    Ok(rebuilt)
}
