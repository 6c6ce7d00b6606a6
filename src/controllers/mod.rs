pub mod batch;
pub mod cli;

pub use batch::{BatchController, RunOutcome};
pub use cli::{Cli, InputMode, RunOptions};
