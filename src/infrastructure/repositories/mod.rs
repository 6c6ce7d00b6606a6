pub mod audio_repository;
pub mod csv_row_source;
pub mod polly_tts_repository;
pub mod presentation_repository;
pub mod tts_repository;

pub use audio_repository::{AudioRepository, S3AudioRepository};
pub use csv_row_source::{CsvRowSource, Rows};
pub use polly_tts_repository::PollyTtsRepository;
pub use presentation_repository::{DynamoDbPresentationRepository, PresentationRepository};
pub use tts_repository::TtsRepository;
