use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// BCP-47 language codes the synthesized audio can be produced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "ja-JP")]
    Japanese,
    #[serde(rename = "en-US")]
    English,
}

impl LanguageCode {
    /// Get the BCP-47 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Japanese => "ja-JP",
            LanguageCode::English => "en-US",
        }
    }

    /// Resolve the synthesis target from the source-language token of a file name.
    ///
    /// Files written in English are voiced in Japanese and vice versa.
    pub fn target_for_source_token(token: &str) -> AppResult<Self> {
        let upper = token.to_uppercase();
        if upper.contains("EN") {
            Ok(LanguageCode::Japanese)
        } else if upper.contains("JA") {
            Ok(LanguageCode::English)
        } else {
            Err(AppError::LanguageResolution(token.to_string()))
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoiceGender {
    Male,
    Female,
}

impl VoiceGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceGender::Male => "MALE",
            VoiceGender::Female => "FEMALE",
        }
    }

    /// Resolve a gender token such as `m`, `F` or `female`.
    ///
    /// `F` is checked first: `FEMALE` also contains an `M`.
    pub fn from_token(token: &str) -> AppResult<Self> {
        let upper = token.to_uppercase();
        if upper.contains('F') {
            Ok(VoiceGender::Female)
        } else if upper.contains('M') {
            Ok(VoiceGender::Male)
        } else {
            Err(AppError::VoiceResolution(token.to_string()))
        }
    }
}

impl std::fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Get the Polly voice for a language and gender
pub fn get_voice(language: LanguageCode, gender: VoiceGender) -> &'static str {
    match (language, gender) {
        (LanguageCode::Japanese, VoiceGender::Male) => "Takumi",
        (LanguageCode::Japanese, VoiceGender::Female) => "Kazuha",
        (LanguageCode::English, VoiceGender::Male) => "Matthew",
        (LanguageCode::English, VoiceGender::Female) => "Joanna",
    }
}
