//! Transcript acquisition for Gjenbruk.
//!
//! Resolves a video URL into a transcript plus descriptive metadata.

mod supadata;
mod youtube;

pub use supadata::SupadataClient;
pub use youtube::{extract_video_id, fallback_thumbnail};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fetched transcript with its descriptive metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTranscript {
    /// Full transcript text.
    pub transcript: String,
    /// Video title.
    pub title: String,
    /// Human-readable duration (e.g. "18:22").
    pub duration: String,
    /// Thumbnail URL.
    pub thumbnail: String,
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript and metadata for a video URL.
    ///
    /// Fails before any network call when the URL is not a recognizable
    /// video link.
    async fn fetch(&self, video_url: &str) -> Result<VideoTranscript>;
}
