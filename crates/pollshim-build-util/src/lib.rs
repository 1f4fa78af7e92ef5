//! Build-time helpers for rendering the pollshim manual page.
//!
//! Build scripts cannot log through `tracing`, so these helpers hand warnings
//! back to the caller for emission as `cargo:warning=` lines.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use time::{OffsetDateTime, format_description::well_known::Iso8601};

const FALLBACK_DATE: &str = "1970-01-01";

/// Reasons `SOURCE_DATE_EPOCH` could not be turned into a date.
#[derive(Debug, PartialEq, Eq)]
enum SourceDateError {
    Missing,
    InvalidInteger { raw: String },
    InvalidTimestamp { raw: String },
}

/// Formats a raw `SOURCE_DATE_EPOCH` value as an ISO-8601 date.
///
/// `None` stands for an unset variable and yields the fallback date silently.
/// Any other failure also yields the fallback and pushes a warning.
#[must_use]
pub fn manual_date_from(raw: Option<&str>, warnings: &mut Vec<String>) -> String {
    let parsed = parse_source_date(raw).and_then(|value| {
        value
            .format(&Iso8601::DATE)
            .map_err(|_| SourceDateError::InvalidTimestamp {
                raw: raw.unwrap_or_default().to_owned(),
            })
    });

    match parsed {
        Ok(date) => date,
        Err(error) => {
            push_source_date_warning(warnings, &error);
            FALLBACK_DATE.into()
        }
    }
}

/// Derives the manual page date from the `SOURCE_DATE_EPOCH` environment
/// variable.
#[must_use]
pub fn manual_date_from_env(warnings: &mut Vec<String>) -> String {
    let raw = env::var("SOURCE_DATE_EPOCH").ok();
    manual_date_from(raw.as_deref(), warnings)
}

/// One-line summary for the manual page NAME section.
///
/// Takes the package description, collapsing internal whitespace. Returns
/// `None` for an unset or blank description so the command's own about text
/// is kept.
#[must_use]
pub fn manual_summary_from(raw: Option<&str>) -> Option<String> {
    let summary = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!summary.is_empty()).then_some(summary)
}

fn parse_source_date(raw: Option<&str>) -> Result<OffsetDateTime, SourceDateError> {
    let text = raw.ok_or(SourceDateError::Missing)?;
    let timestamp = text
        .trim()
        .parse::<i64>()
        .map_err(|_| SourceDateError::InvalidInteger {
            raw: text.to_owned(),
        })?;
    OffsetDateTime::from_unix_timestamp(timestamp).map_err(|_| SourceDateError::InvalidTimestamp {
        raw: text.to_owned(),
    })
}

fn push_source_date_warning(warnings: &mut Vec<String>, error: &SourceDateError) {
    match error {
        SourceDateError::Missing => {}
        SourceDateError::InvalidInteger { raw } => warnings.push(format!(
            "Invalid SOURCE_DATE_EPOCH '{raw}'; expected integer seconds since Unix epoch; \
             falling back to {FALLBACK_DATE}"
        )),
        SourceDateError::InvalidTimestamp { raw } => warnings.push(format!(
            "Invalid SOURCE_DATE_EPOCH '{raw}'; not a valid Unix timestamp; falling back to \
             {FALLBACK_DATE}"
        )),
    }
}

/// Finds the workspace `target` directory above a build script's `OUT_DIR`.
///
/// Native builds place `OUT_DIR` at
/// `{workspace}/target/{profile}/build/{crate}-{hash}/out`, cross builds add a
/// `{target}` component after `target`.
#[must_use]
pub fn workspace_target_dir(out_dir: &Path) -> Option<PathBuf> {
    out_dir
        .ancestors()
        .find(|dir| dir.file_name().and_then(|name| name.to_str()) == Some("target"))
        .map(Path::to_path_buf)
}

/// Directory receiving generated man pages for a target and profile.
///
/// Falls back to a relative `target` directory when `out_dir` is absent or
/// does not sit below one.
#[must_use]
pub fn out_dir_for_target_profile(target: &str, profile: &str, out_dir: Option<&Path>) -> PathBuf {
    let base = out_dir
        .and_then(workspace_target_dir)
        .unwrap_or_else(|| PathBuf::from("target"));
    base.join("generated-man").join(target).join(profile)
}

/// Writes a man page into `dir`, replacing any previous copy via rename.
///
/// # Errors
///
/// Returns any I/O error raised while creating the directory or writing and
/// renaming the file.
pub fn write_man_page(data: &[u8], dir: &Path, page_name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let destination = dir.join(page_name);
    let tmp = dir.join(format!("{page_name}.tmp"));
    fs::write(&tmp, data)?;
    if destination.exists() {
        fs::remove_file(&destination)?;
    }
    fs::rename(&tmp, &destination)?;
    Ok(destination)
}
