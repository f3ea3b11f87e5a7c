//! The `validate` and `process` commands.
//!
//! Both commands compile the whole curriculum; they differ only in what
//! they write. Output goes to a caller-supplied writer so the commands can
//! be exercised without a terminal.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use lectern_compiler::{ProcessResult, process_content};
use lectern_core::{Error, Result};

use crate::cli::OutputFormat;
use crate::config::LecternConfig;

/// Compile a file map with the configured layout.
pub fn compile(files: &BTreeMap<String, String>, config: &LecternConfig) -> ProcessResult {
    let result = process_content(files, &config.layout);
    tracing::info!(
        "Compiled {} files: {} modules, {} courses, {} errors, {} warnings",
        files.len(),
        result.modules.len(),
        result.courses.len(),
        result.error_count(),
        result.warning_count()
    );
    result
}

/// Write the validation report for `result`.
///
/// Returns `true` when the curriculum has no error-severity diagnostics.
pub fn run_validate(result: &ProcessResult, format: OutputFormat, out: &mut impl Write) -> Result<bool> {
    match format {
        OutputFormat::Text => write_text_report(result, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result.errors)?;
            writeln!(out).map_err(stdout_error)?;
        }
    }
    Ok(!result.has_errors())
}

fn write_text_report(result: &ProcessResult, out: &mut impl Write) -> Result<()> {
    for error in &result.errors {
        writeln!(out, "{error}").map_err(stdout_error)?;
    }
    writeln!(out, "{}", summary(result)).map_err(stdout_error)
}

/// One-line count of what a compile produced.
pub fn summary(result: &ProcessResult) -> String {
    let failed = result.modules.iter().filter(|m| m.is_failed()).count();
    format!(
        "{} modules ({} failed), {} courses: {} {}, {} {}",
        result.modules.len(),
        failed,
        result.courses.len(),
        result.error_count(),
        plural(result.error_count(), "error"),
        result.warning_count(),
        plural(result.warning_count(), "warning"),
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Serialize the full result as JSON, to `output` or to `out`.
pub fn run_process(
    result: &ProcessResult,
    pretty: bool,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    json.push('\n');

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => out.write_all(json.as_bytes()).map_err(stdout_error)?,
    }

    if result.has_errors() {
        tracing::warn!(
            "Output contains {} errors; run `lectern validate` for details",
            result.error_count()
        );
    }
    Ok(())
}

fn stdout_error(e: std::io::Error) -> Error {
    Error::io_with_path(e, "<stdout>")
}
