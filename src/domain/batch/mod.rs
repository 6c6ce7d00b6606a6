pub mod runner;

pub use runner::{
    BatchReport, BatchRunner, SkippedFile, TaskHandler, TaskResult, TaskStatus,
    DEFAULT_MAX_WORKERS,
};
