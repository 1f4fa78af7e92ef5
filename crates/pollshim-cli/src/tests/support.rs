//! Test support utilities for pollshim CLI coverage.
//!
//! Supplies a fixed configuration loader and a world type that captures CLI
//! output so step definitions and unit tests remain focused on their
//! assertions.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use pollshim_config::Config;
use tempfile::TempDir;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

pub(super) const SYSCALL_POLL_GLUE: &str =
    "function ___syscall_poll(x) { if (ENVIRONMENT_IS_PTHREAD) return doCall(x); }";

pub(super) const SYSCALL_POLL_PATCHED: &str = concat!(
    "var __pollshimWaitCell = new Int32Array(new SharedArrayBuffer(4));\n",
    "function ___syscall_poll(x) { if (ENVIRONMENT_IS_PTHREAD) {\n",
    "var ret =doCall(x);\n",
    "if (ret == 0) Atomics.wait(__pollshimWaitCell, 0, 0, 50);\n",
    "return ret;\n",
    "} }",
);

/// A config loader that returns a fixed configuration for tests.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Test world holding CLI state and captured output.
#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub stdin: Vec<u8>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub temp_dir: Option<TempDir>,
    pub glue_path: Option<PathBuf>,
}

impl TestWorld {
    /// Writes `content` to a fresh glue file and remembers its path.
    pub fn write_glue_file(&mut self, content: &str) -> Result<PathBuf> {
        let temp_dir = TempDir::new().context("create temp dir")?;
        let path = temp_dir.path().join("app.js");
        fs::write(&path, content).context("write glue file")?;
        self.temp_dir = Some(temp_dir);
        self.glue_path = Some(path.clone());
        Ok(path)
    }

    /// Runs the CLI with the given arguments after the program name.
    pub fn run(&mut self, args: &[OsString]) {
        let mut argv = vec![OsString::from("pollshim")];
        argv.extend(args.iter().cloned());

        self.stdout.clear();
        self.stderr.clear();
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut stdin = Cursor::new(self.stdin.clone());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut io = IoStreams::new(&mut stdin, &mut stdout, &mut stderr);
        let exit_code = run_with_loader(argv, &mut io, &loader);
        self.stdout = stdout;
        self.stderr = stderr;
        self.exit_code = Some(exit_code);
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn glue_path(&self) -> &PathBuf {
        self.glue_path
            .as_ref()
            .expect("glue file should be written first")
    }

    pub fn read_glue_file(&self) -> String {
        fs::read_to_string(self.glue_path()).expect("read glue file")
    }
}
