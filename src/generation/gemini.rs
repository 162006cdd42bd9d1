//! Gemini REST client for text, image and video generation.
//!
//! All request and response shapes are typed; a malformed upstream response
//! surfaces as a typed error instead of best-effort field probing. Generated
//! media is materialized under the media directory and referenced by path.

use super::ContentGenerator;
use crate::config::{platform_instruction, GeminiSettings, Prompts, Settings};
use crate::error::{GjenbrukError, Result};
use crate::http::create_client;
use crate::platform::Platform;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, instrument};

static MEDIA_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Serialize)]
struct VideoRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
struct VideoInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    aspect_ratio: String,
    resolution: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoOperation {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<VideoOperationResult>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoOperationResult {
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Gemini-backed content generator.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiSettings,
    api_key: Option<String>,
    media_dir: PathBuf,
    prompts: Prompts,
}

impl GeminiClient {
    /// Create a client from settings. Ensures the media directory exists.
    pub fn new(settings: &Settings, prompts: Prompts) -> Result<Self> {
        Self::with_config(
            settings.gemini.clone(),
            settings.gemini_api_key(),
            settings.media_dir(),
            prompts,
        )
    }

    /// Create a client with explicit configuration (used by tests).
    pub fn with_config(
        config: GeminiSettings,
        api_key: Option<String>,
        media_dir: PathBuf,
        prompts: Prompts,
    ) -> Result<Self> {
        std::fs::create_dir_all(&media_dir)?;
        Ok(Self {
            http: create_client(),
            config,
            api_key,
            media_dir,
            prompts,
        })
    }

    /// A bound credential is a blocking prerequisite for every call.
    fn ensure_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            GjenbrukError::Config(
                "GEMINI_API_KEY is not set. Set it with: export GEMINI_API_KEY='...'".to_string(),
            )
        })
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GjenbrukError::Auth(
                "Your Gemini API key was rejected by the model endpoint.".to_string(),
            ));
        }
        let body: GeminiErrorBody = response
            .json()
            .await
            .unwrap_or(GeminiErrorBody { error: None });
        Err(GjenbrukError::Upstream {
            status: status.as_u16(),
            message: body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "Model request failed".to_string()),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let key = self.ensure_key()?;
        let url = format!("{}/models/{}:generateContent", self.config.api_base, model);
        debug!("Calling {}", model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .await?;
        let response = self.check_status(response).await?;

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            GjenbrukError::Generation(format!("Malformed model response: {}", e))
        })
    }

    fn first_text(response: GenerateContentResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| GjenbrukError::Generation("Model returned no text content".to_string()))
    }

    fn first_inline_data(response: GenerateContentResponse) -> Result<InlineData> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
            .ok_or_else(|| {
                GjenbrukError::Generation("No image data returned from model".to_string())
            })
    }

    /// Write decoded media bytes to the media directory.
    fn materialize(&self, prefix: &str, extension: &str, bytes: &[u8]) -> Result<String> {
        let seq = MEDIA_SEQ.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "{}-{}-{}.{}",
            prefix,
            chrono::Utc::now().timestamp_millis(),
            seq,
            extension
        );
        let path = self.media_dir.join(name);
        std::fs::write(&path, bytes)?;
        Ok(path.to_string_lossy().to_string())
    }

    fn save_image(&self, inline: InlineData) -> Result<String> {
        let bytes = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
            GjenbrukError::Generation(format!("Invalid base64 image data: {}", e))
        })?;
        self.materialize("image", "png", &bytes)
    }

    async fn poll_video_operation(&self, mut operation: VideoOperation) -> Result<VideoOperation> {
        let key = self.ensure_key()?;
        let interval = Duration::from_secs(self.config.video_poll_interval_seconds);
        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(self.config.video_poll_timeout_seconds);

        while !operation.done {
            if tokio::time::Instant::now() >= deadline {
                return Err(GjenbrukError::Timeout(format!(
                    "Video job did not finish within {} seconds",
                    self.config.video_poll_timeout_seconds
                )));
            }
            tokio::time::sleep(interval).await;

            debug!("Polling video job {}", operation.name);
            let url = format!("{}/{}", self.config.api_base, operation.name);
            let response = self
                .http
                .get(&url)
                .header("x-goog-api-key", key)
                .send()
                .await?;
            let response = self.check_status(response).await?;
            operation = response.json::<VideoOperation>().await.map_err(|e| {
                GjenbrukError::Generation(format!("Malformed video job status: {}", e))
            })?;
        }

        Ok(operation)
    }

    async fn download_video(&self, uri: &str) -> Result<String> {
        let key = self.ensure_key()?;
        let mut download_url = url::Url::parse(uri)
            .map_err(|e| GjenbrukError::Generation(format!("Invalid video URI: {}", e)))?;
        download_url.query_pairs_mut().append_pair("key", key);

        let response = self.http.get(download_url).send().await?;
        let response = self.check_status(response).await?;
        let bytes = response.bytes().await?;

        self.materialize("video", "mp4", &bytes)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip_all)]
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = Prompts::render(&self.prompts.summary.user, &vars);

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                image_config: None,
            }),
        };

        let response = self
            .generate_content(&self.config.flash_model, &request)
            .await?;
        Self::first_text(response)
    }

    #[instrument(skip(self, transcript, title), fields(platform = %platform))]
    async fn platform_text(
        &self,
        platform: Platform,
        transcript: &str,
        title: &str,
    ) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("platform".to_string(), platform.tag().to_string());
        vars.insert("title".to_string(), title.to_string());
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = Prompts::render(&self.prompts.social.user, &vars);

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: Some(Content::text(platform_instruction(platform))),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.8),
                image_config: None,
            }),
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;
        Self::first_text(response)
    }

    #[instrument(skip_all)]
    async fn image_prompt(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = Prompts::render(&self.prompts.media.image_prompt, &vars);

        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.fast_model, &request)
            .await?;
        Self::first_text(response)
    }

    #[instrument(skip_all)]
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: "16:9".to_string(),
                }),
            }),
        };

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;
        let inline = Self::first_inline_data(response)?;
        let path = self.save_image(inline)?;
        info!("Materialized generated image at {}", path);
        Ok(path)
    }

    #[instrument(skip_all)]
    async fn edit_image(&self, png_base64: &str, instruction: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".to_string(),
                            data: png_base64.to_string(),
                        }),
                    },
                    Part {
                        text: Some(instruction.to_string()),
                        inline_data: None,
                    },
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;
        let inline = Self::first_inline_data(response)?;
        let path = self.save_image(inline)?;
        info!("Materialized refined image at {}", path);
        Ok(path)
    }

    #[instrument(skip_all)]
    async fn generate_video(&self, prompt: &str) -> Result<String> {
        let key = self.ensure_key()?;
        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.config.api_base, self.config.video_model
        );

        let request = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters {
                aspect_ratio: "16:9".to_string(),
                resolution: "720p".to_string(),
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&request)
            .send()
            .await?;
        let response = self.check_status(response).await?;
        let operation = response.json::<VideoOperation>().await.map_err(|e| {
            GjenbrukError::Generation(format!("Malformed video job submission: {}", e))
        })?;

        info!("Submitted video job {}", operation.name);
        let operation = self.poll_video_operation(operation).await?;

        if let Some(error) = operation.error {
            return Err(GjenbrukError::Generation(format!(
                "Video job failed: {}",
                error.message
            )));
        }

        let uri = operation
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri)
            .ok_or_else(|| {
                GjenbrukError::Generation("Video job finished without a download link".to_string())
            })?;

        let path = self.download_video(&uri).await?;
        info!("Materialized generated video at {}", path);
        Ok(path)
    }

    #[instrument(skip_all)]
    async fn transcribe_audio(&self, audio_base64: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "audio/pcm;rate=16000".to_string(),
                            data: audio_base64.to_string(),
                        }),
                    },
                    Part {
                        text: Some(self.prompts.media.audio_transcription.clone()),
                        inline_data: None,
                    },
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.flash_model, &request)
            .await?;
        Self::first_text(response)
    }
}
