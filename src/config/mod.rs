//! Configuration management for Gjenbruk.

mod prompts;
mod settings;

pub use prompts::{platform_instruction, Prompts};
pub use settings::{
    GeminiSettings, GeneralSettings, PromptSettings, Settings, StoreSettings, TranscriptSettings,
};
