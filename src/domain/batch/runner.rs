use crate::domain::presentation::Task;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Work performed for a single task.
///
/// Returns a human-readable success message. Errors are turned into failed
/// results by the runner and never reach sibling tasks.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, task: &Task) -> AppResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Outcome of one task; produced exactly once per submitted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub file_label: String,
    pub success: bool,
    pub message: String,
    pub elapsed_ms: u64,
}

impl TaskResult {
    /// Failed result for work that never got to run
    pub fn failed(file_label: String, message: String) -> Self {
        Self {
            file_label,
            success: false,
            message,
            elapsed_ms: 0,
        }
    }

    pub fn status(&self) -> TaskStatus {
        if self.success {
            TaskStatus::Succeeded
        } else {
            TaskStatus::Failed
        }
    }
}

/// Input file that never became a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file_label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// In completion order
    pub results: Vec<TaskResult>,
    pub skipped: Vec<SkippedFile>,
    pub success_count: usize,
    pub failure_count: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    fn new(results: Vec<TaskResult>, started_at: DateTime<Utc>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        let failure_count = results.len() - success_count;
        Self {
            results,
            skipped: Vec::new(),
            success_count,
            failure_count,
            started_at,
            finished_at: Utc::now(),
        }
    }

    pub fn from_results(results: Vec<TaskResult>) -> Self {
        Self::new(results, Utc::now())
    }

    pub fn with_skipped(mut self, skipped: Vec<SkippedFile>) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }
}

/// Runs tasks through a handler with bounded concurrency
pub struct BatchRunner {
    handler: Arc<dyn TaskHandler>,
}

impl BatchRunner {
    pub fn new(handler: Arc<dyn TaskHandler>) -> Self {
        Self { handler }
    }

    /// Run up to `max_workers` tasks at a time.
    ///
    /// Every task yields exactly one result, whatever the others do.
    pub async fn run(&self, tasks: Vec<Task>, max_workers: usize) -> BatchReport {
        let started_at = Utc::now();
        let workers = max_workers.max(1);

        tracing::info!(tasks = tasks.len(), workers, "Starting batch");
        log_queued(&tasks);

        let results: Vec<TaskResult> = stream::iter(tasks)
            .map(|task| self.run_task(task))
            .buffer_unordered(workers)
            .collect()
            .await;

        let report = BatchReport::new(results, started_at);
        tracing::info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            "Batch finished"
        );
        report
    }

    /// Run tasks one after another, in submission order
    pub async fn run_sequential(&self, tasks: Vec<Task>) -> BatchReport {
        let started_at = Utc::now();
        log_queued(&tasks);
        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(self.run_task(task).await);
        }
        BatchReport::new(results, started_at)
    }

    async fn run_task(&self, task: Task) -> TaskResult {
        let file_label = task.file_label();
        let start_time = Instant::now();

        tracing::debug!(file = %file_label, status = ?TaskStatus::Running, "Task started");

        let outcome = AssertUnwindSafe(self.handler.handle(&task))
            .catch_unwind()
            .await;

        let (success, message) = match outcome {
            Ok(Ok(message)) => (true, message),
            Ok(Err(err)) => {
                tracing::warn!(file = %file_label, kind = err.kind(), error = %err, "Task failed");
                (false, err.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(file = %file_label, panic = %message, "Task panicked");
                (false, format!("task panicked: {}", message))
            }
        };

        let result = TaskResult {
            file_label,
            success,
            message,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            file = %result.file_label,
            status = ?result.status(),
            elapsed_ms = result.elapsed_ms,
            "Task finished"
        );
        result
    }
}

fn log_queued(tasks: &[Task]) {
    for task in tasks {
        tracing::debug!(file = %task.file_label(), status = ?TaskStatus::Pending, "Task queued");
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
