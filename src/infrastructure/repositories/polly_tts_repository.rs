use super::tts_repository::TtsRepository;
use crate::domain::tts::{get_voice, LanguageCode, VoiceGender};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::TtsEngine;
use async_trait::async_trait;
use aws_sdk_polly::{
    error::DisplayErrorContext,
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[.!?]+\s+|[。！？]+\s*").expect("sentence pattern is a valid regex")
    })
}

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    engine: TtsEngine,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, engine: TtsEngine) -> Self {
        Self {
            polly_client,
            engine,
        }
    }

    fn polly_engine(&self) -> Engine {
        match self.engine {
            TtsEngine::Neural => Engine::Neural,
            TtsEngine::Standard => Engine::Standard,
        }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(
        &self,
        text: &str,
        language: LanguageCode,
        gender: VoiceGender,
    ) -> AppResult<Vec<u8>> {
        let voice_name = get_voice(language, gender);
        let engine = self.polly_engine();

        tracing::debug!(
            language = %language,
            gender = %gender,
            voice = voice_name,
            engine = ?engine,
            text_length = text.chars().count(),
            text_preview = %text.chars().take(80).collect::<String>(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_name))
            .language_code(PollyLanguageCode::from(language.as_str()))
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    "AWS Polly synthesize_speech failed"
                );
                AppError::Synthesis(format!("AWS Polly error: {}", DisplayErrorContext(&e)))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            AppError::Synthesis(format!("Failed to read audio stream: {}", e))
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        gender: VoiceGender,
    ) -> AppResult<Vec<u8>> {
        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text);

        let mut merged_audio = Vec::new();
        for batch in &batches {
            let audio_data = self.call_polly(batch, language, gender).await?;
            merged_audio.extend(audio_data);
        }

        tracing::debug!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis() as u64,
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most MAX_BATCH_SIZE characters.
pub(crate) fn split_into_batches(text: &str) -> Vec<String> {
    if text.chars().count() <= MAX_BATCH_SIZE {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut last_end = 0;

    for mat in sentence_pattern().find_iter(text) {
        push_piece(&mut batches, &mut current_batch, &text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        push_piece(&mut batches, &mut current_batch, &text[last_end..]);
    }

    let tail = current_batch.trim();
    if !tail.is_empty() {
        batches.push(tail.to_string());
    }

    batches
}

fn push_piece(batches: &mut Vec<String>, current_batch: &mut String, piece: &str) {
    let piece_len = piece.chars().count();

    if !current_batch.is_empty() && current_batch.chars().count() + piece_len > MAX_BATCH_SIZE {
        let full = current_batch.trim();
        if !full.is_empty() {
            batches.push(full.to_string());
        }
        current_batch.clear();
    }

    // A single sentence over the limit is cut on character boundaries
    if piece_len > MAX_BATCH_SIZE {
        let chars: Vec<char> = piece.chars().collect();
        for chunk in chars.chunks(MAX_BATCH_SIZE) {
            batches.push(chunk.iter().collect());
        }
    } else {
        current_batch.push_str(piece);
    }
}
