//! CLI entrypoint for pollshim.
//!
//! The binary delegates to [`pollshim_cli::run`], which loads configuration,
//! parses arguments, and patches either stdin or the named file.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    pollshim_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
