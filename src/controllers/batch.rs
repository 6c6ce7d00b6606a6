use crate::{
    controllers::cli::{InputMode, RunOptions},
    domain::{
        batch::{BatchReport, BatchRunner, SkippedFile, TaskHandler, TaskResult},
        presentation::{file_label, resolve_task, Task},
    },
    error::{AppError, AppResult},
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub enum RunOutcome {
    Completed(BatchReport),
    Aborted,
    NothingToDo { skipped: Vec<SkippedFile> },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::Completed(report) => !report.has_failures(),
            RunOutcome::Aborted | RunOutcome::NothingToDo { .. } => true,
        }
    }
}

pub struct BatchController {
    runner: BatchRunner,
}

impl BatchController {
    pub fn new(handler: Arc<dyn TaskHandler>) -> Self {
        Self {
            runner: BatchRunner::new(handler),
        }
    }

    /// Resolve inputs, confirm with the user and run every task.
    ///
    /// `input`/`output` carry the confirmation dialogue.
    pub async fn run<R, W>(
        &self,
        options: &RunOptions,
        input: &mut R,
        output: &mut W,
    ) -> AppResult<RunOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let (tasks, skipped) = match &options.mode {
            InputMode::Single(path) => {
                let (tasks, skipped) = plan(std::slice::from_ref(path), &options.group);
                // A lone file that cannot become a task is that run's failure
                if tasks.is_empty() {
                    let results = skipped
                        .into_iter()
                        .map(|file| TaskResult::failed(file.file_label, file.reason))
                        .collect();
                    return Ok(RunOutcome::Completed(BatchReport::from_results(results)));
                }
                (tasks, skipped)
            }
            InputMode::Batch(dir) => plan(&discover_csv_files(dir)?, &options.group),
        };

        if tasks.is_empty() {
            tracing::warn!(skipped = skipped.len(), "No files to process");
            return Ok(RunOutcome::NothingToDo { skipped });
        }

        if !options.assume_yes && !confirm(&tasks, &options.group, options.dry_run, input, output)? {
            tracing::info!("Run declined at confirmation prompt");
            return Ok(RunOutcome::Aborted);
        }

        let report = match options.mode {
            InputMode::Single(_) => self.runner.run_sequential(tasks).await,
            InputMode::Batch(_) => self.runner.run(tasks, options.max_workers).await,
        };

        Ok(RunOutcome::Completed(report.with_skipped(skipped)))
    }
}

/// All `*.csv` files directly inside `dir`, sorted by path
pub fn discover_csv_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), files = files.len(), "Discovered CSV files");
    Ok(files)
}

/// Resolve each path into a task; files with malformed names are skipped
pub fn plan(paths: &[PathBuf], group: &str) -> (Vec<Task>, Vec<SkippedFile>) {
    let mut tasks = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        match resolve_task(path, group) {
            Ok(task) => tasks.push(task),
            Err(err) => {
                tracing::warn!(
                    file = %path.display(),
                    kind = err.kind(),
                    error = %err,
                    "Skipping file"
                );
                skipped.push(SkippedFile {
                    file_label: file_label(path),
                    reason: err.to_string(),
                });
            }
        }
    }

    (tasks, skipped)
}

/// List the planned presentations and ask for a yes/no answer
pub fn confirm<R, W>(
    tasks: &[Task],
    group: &str,
    dry_run: bool,
    input: &mut R,
    output: &mut W,
) -> AppResult<bool>
where
    R: BufRead,
    W: Write,
{
    let mode = if dry_run { " (dry run)" } else { "" };
    writeln!(
        output,
        "{} presentation(s) will be created in group '{}'{}:",
        tasks.len(),
        group,
        mode
    )?;
    for task in tasks {
        writeln!(
            output,
            "  {} ({}, {}) <- {}",
            task.title(),
            task.language_code(),
            task.voice_gender(),
            task.file_label()
        )?;
    }
    write!(output, "Proceed? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Human-readable summary of a run
pub fn render_outcome(outcome: &RunOutcome) -> String {
    let mut out = String::new();
    match outcome {
        RunOutcome::Aborted => out.push_str("Aborted.\n"),
        RunOutcome::NothingToDo { skipped } => {
            out.push_str("No CSV files to process.\n");
            render_skipped(&mut out, skipped);
        }
        RunOutcome::Completed(report) => {
            out.push_str(&format!(
                "Done: {} succeeded, {} failed, {} skipped\n",
                report.success_count,
                report.failure_count,
                report.skipped.len()
            ));
            for failure in report.failures() {
                out.push_str(&format!(
                    "  FAILED {}: {}\n",
                    failure.file_label, failure.message
                ));
            }
            render_skipped(&mut out, &report.skipped);
        }
    }
    out
}

fn render_skipped(out: &mut String, skipped: &[SkippedFile]) {
    for file in skipped {
        out.push_str(&format!("  SKIPPED {}: {}\n", file.file_label, file.reason));
    }
}

/// JSON rendering of a run, for `--json`
pub fn render_outcome_json(outcome: &RunOutcome) -> AppResult<String> {
    let value = match outcome {
        RunOutcome::Completed(report) => serde_json::to_value(report),
        RunOutcome::Aborted => Ok(serde_json::json!({ "aborted": true })),
        RunOutcome::NothingToDo { skipped } => {
            serde_json::to_value(skipped).map(|skipped| serde_json::json!({ "skipped": skipped }))
        }
    }
    .map_err(|e| AppError::Internal(format!("failed to encode report: {}", e)))?;

    serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::Internal(format!("failed to encode report: {}", e)))
}
