//! Prompt templates for Gjenbruk.
//!
//! Narrative templates can be customized by placing TOML files in the custom
//! prompts directory. The per-platform instruction profiles are fixed: they
//! define the product's output styles and are not user-tunable.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// The fixed instruction profile for a text platform.
pub fn platform_instruction(platform: Platform) -> &'static str {
    match platform {
        Platform::LinkedIn => {
            "You are an executive strategist. Focus on 'Executive Insight.' Use a \
             scroll-stopping hook, 3 bulleted 'golden nuggets,' and a conversational \
             closing. Use 1.5x line spacing for readability. Be professional and \
             authoritative."
        }
        Platform::InstagramReel => {
            "Write a 60-second script for an Instagram Reel. Structure: 0-3s (The Hook), \
             3-50s (Value/Visual instructions), 50-60s (CTA). Focus on fast pacing and \
             high energy."
        }
        Platform::TweetThread => {
            "Create a 5-tweet thread. Tweet 1 is a bold claim. Tweets 2-4 provide \
             evidence from the content. Tweet 5 is a Call to Action. Use punchy, short \
             sentences."
        }
        Platform::Email => {
            "Write an email in 'The Curiosity Gap' style. Subject lines must demand a \
             click. Focus on the transformation/lesson from the video. Keep it personal \
             and engaging."
        }
        Platform::Facebook => {
            "Write an engaging Facebook post that encourages community discussion. Focus \
             on storytelling and emotional connection to the video's content."
        }
        _ => "Repurpose this content into a viral social media post.",
    }
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub social: SocialPrompts,
    pub media: MediaPrompts,
}

/// Prompt for the impact summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            user: "Based on this transcript, provide a 3-sentence \"Impact Summary\" that \
                   highlights the core value proposition: {{transcript}}"
                .to_string(),
        }
    }
}

/// Prompt for platform-tailored text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialPrompts {
    pub user: String,
}

impl Default for SocialPrompts {
    fn default() -> Self {
        Self {
            user: "Generate a high-end {{platform}} post based on this YouTube video \
                   title: \"{{title}}\" and transcript: \"{{transcript}}\""
                .to_string(),
        }
    }
}

/// Prompts for image and video asset generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaPrompts {
    /// Derives an image-generation prompt from the transcript.
    pub image_prompt: String,
    /// Video prompt synthesized from the session summary or title.
    pub video: String,
    /// Instruction attached to inline audio for speech transcription.
    pub audio_transcription: String,
}

impl Default for MediaPrompts {
    fn default() -> Self {
        Self {
            image_prompt: "Create a high-fidelity image prompt for Gemini 2.5 Flash Image \
                           based on this content: \"{{transcript}}\". Focus on cinematic \
                           lighting, 16:9 aspect ratio, and consistent high-end branding. \
                           Return only the prompt."
                .to_string(),
            video: "Futuristic visualization of: {{subject}}. Professional color grading, \
                    volumetric lighting, and smooth motion."
                .to_string(),
            audio_transcription: "Transcribe this audio exactly as spoken.".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory overrides.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let social_path = custom_path.join("social.toml");
            if social_path.exists() {
                let content = std::fs::read_to_string(&social_path)?;
                prompts.social = toml::from_str(&content)?;
            }

            let media_path = custom_path.join("media.toml");
            if media_path.exists() {
                let content = std::fs::read_to_string(&media_path)?;
                prompts.media = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
