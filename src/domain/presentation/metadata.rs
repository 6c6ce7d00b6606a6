use super::model::Task;
use crate::domain::tts::{LanguageCode, VoiceGender};
use crate::error::{AppError, AppResult};
use std::path::Path;

/// Title, target language and voice encoded in a `name_lang_gender.csv` file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub title: String,
    pub language_code: LanguageCode,
    pub voice_gender: VoiceGender,
}

impl FileMetadata {
    /// Parse the file stem of `path`.
    ///
    /// The last two `_`-separated segments are the language and gender
    /// tokens, everything before them is the title.
    pub fn resolve(path: &Path) -> AppResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AppError::Format(format!("invalid file name: {}", path.display())))?;

        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() < 3 {
            return Err(AppError::Format(format!(
                "expected <title>_<lang>_<gender>, got '{}'",
                stem
            )));
        }

        let (title_segments, tokens) = segments.split_at(segments.len() - 2);
        let title = title_segments.join("_");
        if title.is_empty() {
            return Err(AppError::Format(format!("empty title in '{}'", stem)));
        }

        let language_code = LanguageCode::target_for_source_token(tokens[0])?;
        let voice_gender = VoiceGender::from_token(tokens[1])?;

        Ok(Self {
            title,
            language_code,
            voice_gender,
        })
    }

    pub fn into_task(self, path: &Path, group: &str) -> Task {
        Task::new(
            path.to_path_buf(),
            self.title,
            group.to_string(),
            self.language_code,
            self.voice_gender,
        )
    }
}

/// Build a task for `path` under `group`
pub fn resolve_task(path: &Path, group: &str) -> AppResult<Task> {
    FileMetadata::resolve(path).map(|metadata| metadata.into_task(path, group))
}
