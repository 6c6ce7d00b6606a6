use super::model::{voice_path, Task, TranscriptEntry};
use crate::domain::batch::TaskHandler;
use crate::error::AppResult;
use crate::infrastructure::repositories::{
    AudioRepository, CsvRowSource, PresentationRepository, TtsRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Turns one input file into a presentation with voiced transcripts.
///
/// Writes are not rolled back: if row `k` fails, the presentation and rows
/// `0..k` stay in place.
pub struct PresentationService {
    tts_repo: Arc<dyn TtsRepository>,
    audio_repo: Arc<dyn AudioRepository>,
    presentation_repo: Arc<dyn PresentationRepository>,
}

impl PresentationService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        audio_repo: Arc<dyn AudioRepository>,
        presentation_repo: Arc<dyn PresentationRepository>,
    ) -> Self {
        Self {
            tts_repo,
            audio_repo,
            presentation_repo,
        }
    }
}

#[async_trait]
impl TaskHandler for PresentationService {
    async fn handle(&self, task: &Task) -> AppResult<String> {
        // Open before writing anything so unreadable files leave no records
        let rows = CsvRowSource::new(task.file_path()).rows()?;

        let presentation_id = self
            .presentation_repo
            .create_presentation(task.title(), task.group())
            .await?;
        self.presentation_repo
            .upsert_group_pointer(task.group(), &presentation_id)
            .await?;

        let mut count = 0;
        for (order, row) in rows.enumerate() {
            let row = row?;

            let audio = self
                .tts_repo
                .synthesize(&row.transcript, task.language_code(), task.voice_gender())
                .await?;

            let path = voice_path(&presentation_id, order);
            self.audio_repo.upload(&path, audio).await?;

            let entry = TranscriptEntry {
                order,
                script: row.script,
                transcript: row.transcript,
                voice_path: path,
            };
            self.presentation_repo
                .append_transcript(&presentation_id, &entry)
                .await?;

            tracing::debug!(
                presentation_id = %presentation_id,
                order,
                voice_path = %entry.voice_path,
                "Transcript recorded"
            );
            count += 1;
        }

        Ok(format!(
            "{} rows uploaded to presentation {}",
            count, presentation_id
        ))
    }
}

/// Validates input and counts rows without calling any external service
#[derive(Debug, Default)]
pub struct DryRunService;

impl DryRunService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskHandler for DryRunService {
    async fn handle(&self, task: &Task) -> AppResult<String> {
        let count = CsvRowSource::new(task.file_path()).count()?;
        tracing::debug!(file = %task.file_label(), rows = count, "Dry run validated file");
        Ok(format!("dry run: {} rows", count))
    }
}
