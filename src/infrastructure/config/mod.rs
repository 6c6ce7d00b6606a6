use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub aws_region: String,
    pub aws_endpoint_url: Option<String>,
    pub audio_bucket: Option<String>,
    pub presentation_table: String,
    /// Raw `TTS_ENGINE`, parsed by [`Config::tts_engine`]
    pub tts_engine: String,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngine {
    Neural,
    Standard,
}

impl std::str::FromStr for TtsEngine {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neural" => Ok(TtsEngine::Neural),
            "standard" => Ok(TtsEngine::Standard),
            other => Err(AppError::Config(format!(
                "TTS_ENGINE must be 'neural' or 'standard', got '{}'",
                other
            ))),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-1".to_string()),
            aws_endpoint_url: optional_var("AWS_ENDPOINT_URL"),
            audio_bucket: optional_var("AUDIO_BUCKET"),
            presentation_table: env::var("PRESENTATION_TABLE")
                .unwrap_or_else(|_| "presentations".to_string()),
            tts_engine: env::var("TTS_ENGINE").unwrap_or_else(|_| "neural".to_string()),
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Polly engine; only validated when speech is actually synthesized
    pub fn tts_engine(&self) -> AppResult<TtsEngine> {
        self.tts_engine.parse()
    }

    /// Bucket for audio uploads; only required when audio is actually uploaded
    pub fn require_audio_bucket(&self) -> AppResult<&str> {
        self.audio_bucket
            .as_deref()
            .ok_or_else(|| AppError::Config("AUDIO_BUCKET is not set".to_string()))
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
