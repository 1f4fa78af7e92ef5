//! Input/output adapters around the pure patcher.
//!
//! Stream mode reads stdin and writes stdout. File mode rewrites the named
//! file in place by truncate-and-write; there is no atomic replace, so an
//! interrupted write leaves the file damaged. Check mode runs either input
//! through the patcher and reports marker offsets without writing anything
//! back.

use std::fs;
use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use pollshim_patcher::{MarkerRole, PatchOptions, Patched, patch};
use tracing::info;

use crate::AppError;
use crate::cli::Cli;

const STDIN_LABEL: &str = "<stdin>";

/// Where the glue comes from and goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    Stdin,
    File(Utf8PathBuf),
}

/// A parsed request to patch or check one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatchRequest {
    pub(crate) source: InputSource,
    pub(crate) check: bool,
}

impl From<Cli> for PatchRequest {
    fn from(cli: Cli) -> Self {
        let source = cli.path.map_or(InputSource::Stdin, InputSource::File);
        Self {
            source,
            check: cli.check,
        }
    }
}

impl PatchRequest {
    /// Runs the request against the provided streams.
    pub(crate) fn execute<R, W>(
        &self,
        options: &PatchOptions,
        stdin: &mut R,
        stdout: &mut W,
    ) -> Result<(), AppError>
    where
        R: Read,
        W: Write,
    {
        match &self.source {
            InputSource::Stdin => self.execute_stream(options, stdin, stdout),
            InputSource::File(path) => self.execute_file(path, options, stdout),
        }
    }

    fn execute_stream<R, W>(
        &self,
        options: &PatchOptions,
        stdin: &mut R,
        stdout: &mut W,
    ) -> Result<(), AppError>
    where
        R: Read,
        W: Write,
    {
        let mut source = String::new();
        stdin
            .read_to_string(&mut source)
            .map_err(AppError::ReadInput)?;
        let patched = patch_labelled(&source, options, STDIN_LABEL)?;

        if self.check {
            return write_report(stdout, &patched);
        }

        info!(
            mode = "stream",
            bytes_in = source.len(),
            bytes_out = patched.text().len(),
            "patched glue"
        );
        stdout
            .write_all(patched.text().as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(AppError::WriteOutput)
    }

    fn execute_file<W>(
        &self,
        path: &Utf8Path,
        options: &PatchOptions,
        stdout: &mut W,
    ) -> Result<(), AppError>
    where
        W: Write,
    {
        let verb = if self.check { "Checking" } else { "Patching" };
        writeln!(stdout, "{verb} {path}")
            .and_then(|()| stdout.flush())
            .map_err(AppError::WriteOutput)?;

        let source = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let patched = patch_labelled(&source, options, path.as_str())?;

        if self.check {
            return write_report(stdout, &patched);
        }

        fs::write(path, patched.text()).map_err(|source| AppError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            mode = "file",
            path = %path,
            bytes_in = source.len(),
            bytes_out = patched.text().len(),
            "patched glue"
        );
        Ok(())
    }
}

fn patch_labelled(
    source: &str,
    options: &PatchOptions,
    label: &str,
) -> Result<Patched, AppError> {
    patch(source, options).map_err(|error| AppError::Patch {
        input: label.to_owned(),
        source: error,
    })
}

/// Writes one line per marker with the byte offset it was found at.
fn write_report<W>(stdout: &mut W, patched: &Patched) -> Result<(), AppError>
where
    W: Write,
{
    let positions = patched.positions();
    for role in MarkerRole::ALL {
        writeln!(stdout, "{role} marker at byte {}", positions.get(role))
            .map_err(AppError::WriteOutput)?;
    }
    stdout.flush().map_err(AppError::WriteOutput)
}
