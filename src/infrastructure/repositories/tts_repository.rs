use crate::domain::tts::{LanguageCode, VoiceGender};
use crate::error::AppResult;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider.
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Merging audio chunks into a single audio stream
/// - Picking a voice deterministically for a (language, gender) pair
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech
    ///
    /// Returns audio data ready for playback (MP3 format)
    ///
    /// # Errors
    /// Returns `AppError::Synthesis` if synthesis fails or the provider is unavailable
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        gender: VoiceGender,
    ) -> AppResult<Vec<u8>>;
}
