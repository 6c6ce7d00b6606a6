pub mod language;

pub use language::{get_voice, LanguageCode, VoiceGender};
