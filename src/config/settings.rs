//! Configuration settings for Gjenbruk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub gemini: GeminiSettings,
    pub store: StoreSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data (database, media assets).
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.gjenbruk".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcript acquisition (Supadata) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Base URL of the transcript API.
    pub api_base: String,
    /// API key fallback when SUPADATA_API_KEY is not set in the environment.
    pub api_key: Option<String>,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.supadata.ai/v1/youtube".to_string(),
            api_key: None,
        }
    }
}

/// Generative model (Gemini) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Base URL of the Gemini API.
    pub api_base: String,
    /// API key fallback when GEMINI_API_KEY is not set in the environment.
    pub api_key: Option<String>,
    /// Model for impact summaries and audio transcription.
    pub flash_model: String,
    /// Model for platform-tailored text generation.
    pub text_model: String,
    /// Low-latency model for image prompt derivation.
    pub fast_model: String,
    /// Model for image generation and refinement.
    pub image_model: String,
    /// Model for video generation.
    pub video_model: String,
    /// Seconds between video job status checks.
    pub video_poll_interval_seconds: u64,
    /// Maximum seconds to wait for a video job before giving up.
    pub video_poll_timeout_seconds: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            flash_model: "gemini-3-flash-preview".to_string(),
            text_model: "gemini-3-pro-preview".to_string(),
            fast_model: "gemini-2.5-flash-lite-latest".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            video_poll_interval_seconds: 10,
            video_poll_timeout_seconds: 600,
        }
    }
}

/// Local store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database.
    pub sqlite_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.gjenbruk/gjenbruk.db".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompt templates (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::GjenbrukError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gjenbruk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Directory where generated media assets are materialized.
    pub fn media_dir(&self) -> PathBuf {
        self.data_dir().join("media")
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.store.sqlite_path)
    }

    /// Resolve the transcript API key: environment first, then config file.
    ///
    /// Placeholder values (empty, or the sample key shipped in docs) count
    /// as absent so a fresh checkout runs in demo mode instead of failing.
    pub fn supadata_api_key(&self) -> Option<String> {
        resolve_key(
            std::env::var("SUPADATA_API_KEY").ok(),
            self.transcript.api_key.clone(),
            "your_supadata_api_key",
        )
    }

    /// Resolve the Gemini API key: environment first, then config file.
    pub fn gemini_api_key(&self) -> Option<String> {
        resolve_key(
            std::env::var("GEMINI_API_KEY").ok(),
            self.gemini.api_key.clone(),
            "your_gemini_api_key",
        )
    }
}

fn resolve_key(env: Option<String>, file: Option<String>, placeholder: &str) -> Option<String> {
    let usable = |k: &String| k.len() > 5 && !k.contains(placeholder);
    env.map(|k| k.trim().to_string())
        .filter(usable)
        .or(file.map(|k| k.trim().to_string()).filter(usable))
}
