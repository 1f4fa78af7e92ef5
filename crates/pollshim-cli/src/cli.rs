//! CLI argument definitions for pollshim.
//!
//! This module defines the command-line interface structure used by both the
//! runtime parser and the build script for manpage generation.

use camino::Utf8PathBuf;
use clap::Parser;

/// Patches generated WebAssembly glue so the proxied `poll` shim waits
/// briefly on a shared cell instead of busy-spinning.
///
/// Without PATH the glue is read from stdin and the patched text written to
/// stdout. With PATH the file is patched in place.
///
/// Configuration flags (`--config-path`, `--log-filter`, `--log-format`,
/// `--variant`, `--wait-timeout-ms`) must precede the options below.
#[derive(Parser, Debug)]
#[command(name = "pollshim", version)]
pub(crate) struct Cli {
    /// Locates the markers and reports their offsets without writing output.
    #[arg(long)]
    pub(crate) check: bool,
    /// Glue file to patch in place. Reads stdin when omitted.
    #[arg(value_name = "PATH")]
    pub(crate) path: Option<Utf8PathBuf>,
}
