//! Per-file orchestration: filter → read → complete → write.
//!
//! Files are handled strictly one after another in change-set order. Each one
//! ends in exactly one [`FileOutcome`]; expected skips are plain variants and
//! only genuine failures (I/O, API, response parsing) travel as
//! [`ProcessError`] before being folded into [`FileOutcome::SkippedError`].
//!
//! The output of `dir/note.md` is `dir/note_processed.md`. It is never
//! overwritten: an existing output means the input is skipped without calling
//! the API, which makes re-running the job on the same change set a no-op.

use crate::chat::{ChatRequest, Completer};
use crate::config::ProcessorConfig;
use crate::error::ProcessError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const MARKDOWN_EXTENSION: &str = ".md";
pub const PROCESSED_SUFFIX: &str = "_processed.md";

/// Terminal state of one candidate file.
#[derive(Debug)]
pub enum FileOutcome {
    SkippedNotMarkdown,
    SkippedAlreadyProcessed,
    SkippedMissing,
    SkippedOutputExists { output: PathBuf },
    SkippedError { error: ProcessError },
    Succeeded { output: PathBuf },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Succeeded { .. })
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub input: String,
    pub outcome: FileOutcome,
}

/// Everything that happened during one batch, in input order.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub files: Vec<FileReport>,
}

impl ProcessReport {
    /// Output paths of the files that were written during this run.
    pub fn processed_outputs(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Succeeded { output } => Some(output.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::SkippedError { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.files.len() - self.succeeded() - self.failed()
    }
}

/// `dir/<stem>.md` → `dir/<stem>_processed.md`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{PROCESSED_SUFFIX}");
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Heading line, blank line, then the generated text verbatim.
pub fn render_output(title: &str, generated: &str) -> String {
    format!("# {title} - AI Processed\n\n{generated}")
}

/// Runs the decision tree for a single candidate path.
pub async fn process_file<C>(
    file_path: &str,
    config: &ProcessorConfig,
    completer: &C,
) -> FileOutcome
where
    C: Completer + ?Sized,
{
    info!(path = %file_path, "[PROCESS] Processing candidate file");

    if !file_path.ends_with(MARKDOWN_EXTENSION) {
        info!(path = %file_path, "[PROCESS] Skipping non-markdown file");
        return FileOutcome::SkippedNotMarkdown;
    }
    if file_path.ends_with(PROCESSED_SUFFIX) {
        info!(path = %file_path, "[PROCESS] Skipping processed file");
        return FileOutcome::SkippedAlreadyProcessed;
    }

    let input = Path::new(file_path);
    if !input.exists() {
        warn!(path = %file_path, "[PROCESS] File not found");
        return FileOutcome::SkippedMissing;
    }

    let output = output_path_for(input);
    if output.exists() {
        info!(output = %output.display(), "[PROCESS] Output file already exists");
        return FileOutcome::SkippedOutputExists { output };
    }

    match generate(input, &output, config, completer).await {
        Ok(()) => {
            info!(output = %output.display(), "[PROCESS] Created processed file");
            FileOutcome::Succeeded { output }
        }
        Err(e) => {
            error!(path = %file_path, error = %e, "[PROCESS] Error processing file");
            FileOutcome::SkippedError { error: e }
        }
    }
}

async fn generate<C>(
    input: &Path,
    output: &Path,
    config: &ProcessorConfig,
    completer: &C,
) -> Result<(), ProcessError>
where
    C: Completer + ?Sized,
{
    let content = fs::read_to_string(input).map_err(|source| ProcessError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let title = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(title = %title, "[PROCESS] Processing content");

    let request = ChatRequest::new(config, &content, Some(&title));
    let generated = completer.complete(&request).await?;

    let write_err = |source| ProcessError::Write {
        path: output.to_path_buf(),
        source,
    };
    // create_new: never clobber an output that appeared after the existence check
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(write_err)?;
    file.write_all(render_output(&title, &generated).as_bytes())
        .map_err(write_err)?;
    Ok(())
}

/// Processes every candidate in order. A failing file never stops the batch.
pub async fn process_all<C>(
    files: &[String],
    config: &ProcessorConfig,
    completer: &C,
) -> ProcessReport
where
    C: Completer + ?Sized,
{
    info!(count = files.len(), "[PROCESS] Found changed files");
    let mut report = ProcessReport::default();
    for file_path in files {
        let outcome = process_file(file_path, config, completer).await;
        report.files.push(FileReport {
            input: file_path.clone(),
            outcome,
        });
    }
    info!(
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed(),
        "[PROCESS] Batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_a_sibling() {
        assert_eq!(
            output_path_for(Path::new("docs/guide/note.md")),
            PathBuf::from("docs/guide/note_processed.md")
        );
        assert_eq!(
            output_path_for(Path::new("note.md")),
            PathBuf::from("note_processed.md")
        );
    }

    #[test]
    fn output_path_only_strips_last_extension() {
        assert_eq!(
            output_path_for(Path::new("a/v1.2.md")),
            PathBuf::from("a/v1.2_processed.md")
        );
    }

    #[test]
    fn rendered_output_has_heading_and_verbatim_body() {
        assert_eq!(
            render_output("note", "World"),
            "# note - AI Processed\n\nWorld"
        );
        assert_eq!(render_output("x", "a\n\n"), "# x - AI Processed\n\na\n\n");
    }
}
