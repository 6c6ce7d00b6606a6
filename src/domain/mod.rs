pub mod batch;
pub mod presentation;
pub mod tts;
