//! Hands the produced file list back to the CI pipeline.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the CI step-output file.
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";
pub const OUTPUT_KEY: &str = "processed_files";

/// `processed_files=<a>,<b>` with a trailing newline.
pub fn format_output_line(processed: &[PathBuf]) -> String {
    let joined = processed
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{OUTPUT_KEY}={joined}\n")
}

/// Appends the output line to `channel`. Writes nothing when `processed` is empty
/// or when no channel is configured.
pub fn report_processed(channel: Option<&Path>, processed: &[PathBuf]) -> io::Result<()> {
    if processed.is_empty() {
        info!("[REPORT] No files processed");
        return Ok(());
    }

    println!("Processed {} files:", processed.len());
    for path in processed {
        println!("  - {}", path.display());
    }

    let Some(channel) = channel else {
        warn!("[REPORT] GITHUB_OUTPUT not set, processed file list not published");
        return Ok(());
    };

    let mut file = OpenOptions::new().create(true).append(true).open(channel)?;
    file.write_all(format_output_line(processed).as_bytes())?;
    info!(
        channel = %channel.display(),
        count = processed.len(),
        "[REPORT] Published processed files"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn line_is_comma_joined() {
        let line = format_output_line(&[
            PathBuf::from("docs/a_processed.md"),
            PathBuf::from("b_processed.md"),
        ]);
        assert_eq!(line, "processed_files=docs/a_processed.md,b_processed.md\n");
    }

    #[test]
    fn appends_to_existing_channel() {
        let dir = tempfile::tempdir().unwrap();
        let channel = dir.path().join("output");
        fs::write(&channel, "previous=1\n").unwrap();

        report_processed(Some(&channel), &[PathBuf::from("x_processed.md")]).unwrap();

        assert_eq!(
            fs::read_to_string(&channel).unwrap(),
            "previous=1\nprocessed_files=x_processed.md\n"
        );
    }

    #[test]
    fn nothing_written_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let channel = dir.path().join("output");

        report_processed(Some(&channel), &[]).unwrap();

        assert!(!channel.exists());
    }

    #[test]
    fn missing_channel_is_not_an_error() {
        report_processed(None, &[PathBuf::from("x_processed.md")]).unwrap();
    }
}
