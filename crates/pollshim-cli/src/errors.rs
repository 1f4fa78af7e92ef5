//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use pollshim_patcher::PatchError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read glue from stdin: {0}")]
    ReadInput(io::Error),
    #[error("failed to write patched glue to stdout: {0}")]
    WriteOutput(io::Error),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("failed to patch {input}: {source}")]
    Patch { input: String, source: PatchError },
}
