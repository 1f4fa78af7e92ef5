//! Build script: render `pollshim.1` into target/generated-man/<target>/<profile>.
//!
//! The NAME line is taken from the package description rather than the first
//! line of the `Cli` doc comment.

use clap::CommandFactory;
use clap_mangen::Man;
use pollshim_build_util::{
    manual_date_from_env, manual_summary_from, out_dir_for_target_profile, write_man_page,
};
use std::{env, path::PathBuf};

#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");
    println!("cargo:rerun-if-env-changed=CARGO_BIN_NAME");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_DESCRIPTION");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=TARGET");
    println!("cargo:rerun-if-env-changed=PROFILE");

    let mut cmd = cli::Cli::command();
    let description = env::var("CARGO_PKG_DESCRIPTION").ok();
    if let Some(summary) = manual_summary_from(description.as_deref()) {
        cmd = cmd.about(summary);
    }
    let default_name = cmd
        .get_bin_name()
        .unwrap_or_else(|| cmd.get_name())
        .to_owned();
    let binary_name = env::var("CARGO_BIN_NAME").unwrap_or(default_name);

    let version = env::var("CARGO_PKG_VERSION").map_err(
        |_| "CARGO_PKG_VERSION must be set by Cargo; cannot render manual page without it.",
    )?;

    let mut warnings = Vec::new();
    let date = manual_date_from_env(&mut warnings);
    for warning in warnings {
        println!("cargo:warning={warning}");
    }

    let man = Man::new(cmd)
        .section("1")
        .manual("pollshim manual")
        .source(format!("{binary_name} {version}"))
        .date(date);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    let page_name = format!("{binary_name}.1");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".into());
    let out_dir_env = env::var_os("OUT_DIR").map(PathBuf::from);
    let out_dir = out_dir_for_target_profile(&target, &profile, out_dir_env.as_deref());
    write_man_page(&buf, &out_dir, &page_name)?;

    if let Some(extra_dir) = out_dir_env {
        if let Err(err) = write_man_page(&buf, &extra_dir, &page_name) {
            println!(
                "cargo:warning=Failed to stage manual page in OUT_DIR ({}): {err}",
                extra_dir.display()
            );
        }
    }

    Ok(())
}
