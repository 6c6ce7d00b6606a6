use crate::domain::batch::DEFAULT_MAX_WORKERS;
use crate::error::{AppError, AppResult};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "presentation-tts",
    version,
    about = "Voice script/transcript CSV files and publish them as presentations"
)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
pub struct Cli {
    /// Process a single CSV file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Process every *.csv file in a directory
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Group the presentations are filed under
    #[arg(long)]
    pub group: String,

    /// Files processed concurrently in directory mode
    #[arg(long = "max-workers", default_value_t = DEFAULT_MAX_WORKERS, value_parser = parse_worker_count)]
    pub max_workers: usize,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Only validate files and count rows; nothing is synthesized or written
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Single(PathBuf),
    Batch(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: InputMode,
    pub group: String,
    pub max_workers: usize,
    pub assume_yes: bool,
    pub dry_run: bool,
}

impl Cli {
    pub fn input_mode(&self) -> AppResult<InputMode> {
        match (&self.file, &self.dir) {
            (Some(file), None) => Ok(InputMode::Single(file.clone())),
            (None, Some(dir)) => Ok(InputMode::Batch(dir.clone())),
            _ => Err(AppError::Config(
                "exactly one of --file or --dir is required".to_string(),
            )),
        }
    }

    pub fn run_options(&self) -> AppResult<RunOptions> {
        Ok(RunOptions {
            mode: self.input_mode()?,
            group: self.group.clone(),
            max_workers: self.max_workers,
            assume_yes: self.yes,
            dry_run: self.dry_run,
        })
    }
}

fn parse_worker_count(value: &str) -> Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if count == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(count)
}
