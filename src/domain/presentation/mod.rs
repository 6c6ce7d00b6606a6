pub mod metadata;
pub mod model;
pub mod service;

pub use metadata::{resolve_task, FileMetadata};
pub use model::{file_label, voice_path, Row, Task, TranscriptEntry};
pub use service::{DryRunService, PresentationService};
