use crate::domain::tts::{LanguageCode, VoiceGender};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One script/transcript pair from an input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub script: String,
    pub transcript: String,
}

/// One unit of batch work, bound to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    file_path: PathBuf,
    title: String,
    group: String,
    language_code: LanguageCode,
    voice_gender: VoiceGender,
}

impl Task {
    pub fn new(
        file_path: PathBuf,
        title: String,
        group: String,
        language_code: LanguageCode,
        voice_gender: VoiceGender,
    ) -> Self {
        Self {
            file_path,
            title,
            group,
            language_code,
            voice_gender,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn language_code(&self) -> LanguageCode {
        self.language_code
    }

    pub fn voice_gender(&self) -> VoiceGender {
        self.voice_gender
    }

    /// File name used to identify this task in reports
    pub fn file_label(&self) -> String {
        file_label(&self.file_path)
    }
}

pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Child record of a presentation, one per synthesized row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub order: usize,
    pub script: String,
    pub transcript: String,
    pub voice_path: String,
}

/// Object storage key of the audio for a row
pub fn voice_path(presentation_id: &str, order: usize) -> String {
    format!("presentation/{}/{}.mp3", presentation_id, order)
}
