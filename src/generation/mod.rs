//! Content generation for Gjenbruk.
//!
//! Four independent capabilities against a generative model endpoint:
//! narrative text (summary and platform posts), image prompt + image,
//! image refinement, and long-running video jobs. Audio transcription for
//! the dictation input path rides on the same client.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;
use crate::platform::Platform;
use async_trait::async_trait;

/// Trait for generative backends.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce a short impact summary of a transcript.
    async fn summarize(&self, transcript: &str) -> Result<String>;

    /// Produce platform-tailored text from a transcript and title.
    async fn platform_text(&self, platform: Platform, transcript: &str, title: &str)
        -> Result<String>;

    /// Derive an image-generation prompt from a transcript.
    async fn image_prompt(&self, transcript: &str) -> Result<String>;

    /// Render an image from a prompt. Returns a local media handle.
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Refine an existing image (base64 PNG) per an edit instruction.
    /// Returns a new local media handle.
    async fn edit_image(&self, png_base64: &str, instruction: &str) -> Result<String>;

    /// Render a video from a prompt via a polled long-running job.
    /// Returns a local media handle.
    async fn generate_video(&self, prompt: &str) -> Result<String>;

    /// Transcribe raw recorded audio (base64 PCM at 16 kHz).
    async fn transcribe_audio(&self, audio_base64: &str) -> Result<String>;
}
