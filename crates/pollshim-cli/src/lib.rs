//! Command-line runtime for pollshim.
//!
//! The module owns argument parsing, configuration bootstrapping, logging
//! setup and dispatch to the stream or file adapters. The interface is
//! designed to be exercised both from the binary entrypoint and from tests
//! where configuration loading and IO streams can be substituted.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

mod cli;
mod config;
mod errors;
mod mode;
mod telemetry;

use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use mode::PatchRequest;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `pollshim_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--variant",
    "--wait-timeout-ms",
];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, R: Read, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) fn new(stdin: &'a mut R, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }
}

/// Outcome of argument parsing.
enum Parsed {
    Run(Cli),
    /// Help or version text was requested and has been rendered.
    Informational(String),
}

struct CliRunner<'a, R: Read, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, R, W, E>,
    loader: &'a L,
}

impl<'a, R, W, E, L> CliRunner<'a, R, W, E, L>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(io: &'a mut IoStreams<'a, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        match self.try_run(args) {
            Ok(exit_code) => exit_code,
            Err(app_error) => {
                debug!(error = %app_error, "pollshim failed");
                let _ = writeln!(self.io.stderr, "{app_error}");
                ExitCode::FAILURE
            }
        }
    }

    fn try_run<I>(&mut self, args: I) -> Result<ExitCode, AppError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match parse_cli(cli_arguments)? {
            Parsed::Run(cli) => cli,
            Parsed::Informational(text) => {
                self.io
                    .stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| self.io.stdout.flush())
                    .map_err(AppError::WriteOutput)?;
                return Ok(ExitCode::SUCCESS);
            }
        };

        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;

        let request = PatchRequest::from(cli);
        request.execute(&config.patch_options(), self.io.stdin, self.io.stdout)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<'a, I, R, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, R, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    cli_arguments.extend(args.iter().skip(split.command_start).cloned());
    cli_arguments
}

fn parse_cli(arguments: Vec<OsString>) -> Result<Parsed, AppError> {
    match Cli::try_parse_from(arguments) {
        Ok(cli) => Ok(Parsed::Run(cli)),
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(Parsed::Informational(error.render().to_string()))
        }
        Err(error) => Err(AppError::CliUsage(error)),
    }
}

#[cfg(test)]
mod tests;
