//! Supadata transcript client.
//!
//! Fetches YouTube transcripts over the Supadata HTTP API. When no
//! credential is configured at all, a fixed demo transcript is returned so
//! the rest of the pipeline stays exercisable; a configured-but-invalid key
//! is a hard failure, never silently downgraded.

use super::youtube::{extract_video_id, fallback_thumbnail};
use super::{TranscriptSource, VideoTranscript};
use crate::config::Settings;
use crate::error::{GjenbrukError, Result};
use crate::http::create_client;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const DEMO_TITLE: &str = "10x Your Reach: The Ultimate Content Repurposing Strategy (DEMO MODE)";
const DEMO_DURATION: &str = "18:22";

const DEMO_TRANSCRIPT: &str = "Welcome back to the channel. Today we're diving deep into the \
architecture of large language models and why the 'Ultimate Content Repurposer' is the next \
frontier for digital marketing.\n\n\
The core problem most creators face is burnout. You spend 40 hours producing one high-quality \
video, and then it lives on only one platform. That is a massive waste of intellectual property. \
By leveraging the Gemini API, specifically the Flash and Pro models, we can extract the 'golden \
nuggets' from your transcript instantly.\n\n\
Think about it: a 20-minute video contains enough insight for five LinkedIn posts, a Twitter \
thread, three Instagram Reels, and a deep-dive email newsletter. We use the Nano Banana model \
for high-fidelity thumbnails and Veo 3.1 for cinematic b-roll.\n\n\
The key to viral content is not just the information, but the delivery. LinkedIn needs executive \
presence. Twitter needs punchy claims. Instagram needs high energy. Our tool automates the \
stylistic transformation while keeping your core message intact. This is how you 10x your output \
without 10x-ing your stress level. Let's look at how to set up the prompt orchestration...";

/// Wire format of a Supadata transcript response.
///
/// The transcript has been observed both as a flat string and as an array
/// of timed parts, so both shapes are parsed explicitly.
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    transcript: Option<TranscriptField>,
    #[serde(default)]
    metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptField {
    Text(String),
    Parts(Vec<TranscriptPart>),
}

#[derive(Debug, Deserialize)]
struct TranscriptPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<DurationField>,
    #[serde(default)]
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationField {
    Seconds(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Supadata-backed transcript source.
pub struct SupadataClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl SupadataClient {
    /// Create a client from settings (env credential first, config fallback).
    pub fn new(settings: &Settings) -> Self {
        Self::with_config(&settings.transcript.api_base, settings.supadata_api_key())
    }

    /// Create a client with an explicit base URL and credential.
    pub fn with_config(api_base: &str, api_key: Option<String>) -> Self {
        Self {
            http: create_client(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn demo_transcript(video_id: &str) -> VideoTranscript {
        warn!("No Supadata API key configured. Using demo transcript data.");
        VideoTranscript {
            transcript: DEMO_TRANSCRIPT.to_string(),
            title: DEMO_TITLE.to_string(),
            duration: DEMO_DURATION.to_string(),
            thumbnail: fallback_thumbnail(video_id),
        }
    }

    fn display_duration(duration: Option<DurationField>) -> String {
        match duration {
            Some(DurationField::Seconds(secs)) => {
                let total = secs.max(0.0) as u64;
                format!("{}:{:02}", total / 60, total % 60)
            }
            Some(DurationField::Text(text)) => text,
            None => "00:00".to_string(),
        }
    }

    fn transcript_text(response: &TranscriptResponse) -> String {
        if let Some(content) = &response.content {
            return content.clone();
        }
        match &response.transcript {
            Some(TranscriptField::Text(text)) => text.clone(),
            Some(TranscriptField::Parts(parts)) => parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        }
    }
}

#[async_trait]
impl TranscriptSource for SupadataClient {
    #[instrument(skip(self), fields(url = %video_url))]
    async fn fetch(&self, video_url: &str) -> Result<VideoTranscript> {
        // Fail fast, before any network traffic, on unrecognizable URLs.
        let video_id = extract_video_id(video_url).ok_or_else(|| {
            GjenbrukError::InvalidUrl(
                "Invalid YouTube URL format. Please provide a valid YouTube link.".to_string(),
            )
        })?;

        let Some(api_key) = &self.api_key else {
            return Ok(Self::demo_transcript(&video_id));
        };

        debug!("Fetching transcript for video {}", video_id);

        let response = self
            .http
            .get(format!("{}/transcript", self.api_base))
            .query(&[("url", video_url), ("text", "true")])
            .header("x-api-key", api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(GjenbrukError::Auth(
                    "Your Supadata API key is invalid or has no credits.".to_string(),
                ));
            }
            let body: ErrorBody = response
                .json()
                .await
                .unwrap_or(ErrorBody { message: None });
            return Err(GjenbrukError::Upstream {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| "Transcript API request failed".to_string()),
            });
        }

        let parsed: TranscriptResponse = response.json().await.map_err(|e| {
            GjenbrukError::Upstream {
                status: status.as_u16(),
                message: format!("Malformed transcript response: {}", e),
            }
        })?;

        let transcript = Self::transcript_text(&parsed);
        if transcript.is_empty() {
            return Err(GjenbrukError::EmptyTranscript(
                "The API returned successfully, but no transcript content was found for this \
                 video."
                    .to_string(),
            ));
        }

        let metadata = parsed.metadata;
        let (title, duration, thumbnail) = match metadata {
            Some(m) => (
                m.title.unwrap_or_else(|| "Analyzed Video".to_string()),
                Self::display_duration(m.duration),
                m.thumbnail.unwrap_or_else(|| fallback_thumbnail(&video_id)),
            ),
            None => (
                "Analyzed Video".to_string(),
                "00:00".to_string(),
                fallback_thumbnail(&video_id),
            ),
        };

        info!("Fetched transcript for '{}' ({} chars)", title, transcript.len());

        Ok(VideoTranscript {
            transcript,
            title,
            duration,
            thumbnail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_url_fails_without_network() {
        // Unroutable base: if a request were attempted it would error
        // differently than InvalidUrl.
        let client = SupadataClient::with_config("http://127.0.0.1:1", Some("sd_key_123".into()));
        let result = client.fetch("https://example.com/clip").await;
        assert!(matches!(result, Err(GjenbrukError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_demo_mode_without_credential() {
        let client = SupadataClient::with_config("http://127.0.0.1:1", None);
        let result = client
            .fetch("https://www.youtube.com/watch?v=abc12345678")
            .await
            .unwrap();

        assert!(result.title.contains("(DEMO MODE)"));
        assert_eq!(result.duration, "18:22");
        assert!(result.thumbnail.contains("abc12345678"));
        assert!(result.transcript.contains("golden"));
    }

    #[tokio::test]
    async fn test_fetch_success_with_flat_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .and(query_param("text", "true"))
            .and(header("x-api-key", "sd_key_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": "full transcript text",
                "metadata": {
                    "title": "A Video",
                    "duration": 125,
                    "thumbnail": "https://example.com/t.jpg"
                }
            })))
            .mount(&server)
            .await;

        let client = SupadataClient::with_config(&server.uri(), Some("sd_key_123".into()));
        let result = client
            .fetch("https://www.youtube.com/watch?v=abc12345678")
            .await
            .unwrap();

        assert_eq!(result.transcript, "full transcript text");
        assert_eq!(result.title, "A Video");
        assert_eq!(result.duration, "2:05");
        assert_eq!(result.thumbnail, "https://example.com/t.jpg");
    }

    #[tokio::test]
    async fn test_fetch_success_with_timed_parts_and_missing_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transcript": [
                    {"text": "hello", "start": 0.0, "duration": 1.0},
                    {"text": "world", "start": 1.0, "duration": 1.0}
                ]
            })))
            .mount(&server)
            .await;

        let client = SupadataClient::with_config(&server.uri(), Some("sd_key_123".into()));
        let result = client
            .fetch("https://youtu.be/abc12345678")
            .await
            .unwrap();

        assert_eq!(result.transcript, "hello world");
        assert_eq!(result.title, "Analyzed Video");
        assert_eq!(result.duration, "00:00");
        assert_eq!(
            result.thumbnail,
            "https://img.youtube.com/vi/abc12345678/maxresdefault.jpg"
        );
    }

    #[tokio::test]
    async fn test_auth_failure_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "unauthorized"
            })))
            .mount(&server)
            .await;

        let client = SupadataClient::with_config(&server.uri(), Some("sd_bad_key_1".into()));
        let result = client
            .fetch("https://www.youtube.com/watch?v=abc12345678")
            .await;
        assert!(matches!(result, Err(GjenbrukError::Auth(_))));
    }

    #[tokio::test]
    async fn test_upstream_error_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "backend exploded"
            })))
            .mount(&server)
            .await;

        let client = SupadataClient::with_config(&server.uri(), Some("sd_key_123".into()));
        let result = client
            .fetch("https://www.youtube.com/watch?v=abc12345678")
            .await;

        match result {
            Err(GjenbrukError::Upstream { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_transcript_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metadata": {"title": "Silent Video"}
            })))
            .mount(&server)
            .await;

        let client = SupadataClient::with_config(&server.uri(), Some("sd_key_123".into()));
        let result = client
            .fetch("https://www.youtube.com/watch?v=abc12345678")
            .await;
        assert!(matches!(result, Err(GjenbrukError::EmptyTranscript(_))));
    }
}
