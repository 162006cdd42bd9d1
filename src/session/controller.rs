//! The session controller.

use super::AppState;
use crate::config::{Prompts, Settings};
use crate::error::{GjenbrukError, Result};
use crate::generation::{ContentGenerator, GeminiClient};
use crate::platform::{Platform, PlatformKind};
use crate::store::{ContentRecord, ContentStore, NewContent, NewSession, SessionRecord, SqliteStore};
use crate::transcript::{SupadataClient, TranscriptSource};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Coordinates transcript acquisition, generation and persistence for one
/// session at a time.
///
/// Methods that kick off work take `&mut self`, so overlapping operations on
/// the same controller are rejected at compile time rather than raced at
/// runtime.
pub struct SessionController {
    store: Arc<dyn ContentStore>,
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn ContentGenerator>,
    prompts: Prompts,
    state: AppState,
    session: Option<SessionRecord>,
    contents: Vec<ContentRecord>,
}

impl SessionController {
    /// Build a controller with the production components from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let store = Arc::new(SqliteStore::new(&settings.sqlite_path())?);
        let transcripts = Arc::new(SupadataClient::new(settings));
        let generator = Arc::new(GeminiClient::new(settings, prompts.clone())?);
        Ok(Self::with_components(store, transcripts, generator, prompts))
    }

    /// Build a controller from explicit components (used by tests).
    pub fn with_components(
        store: Arc<dyn ContentStore>,
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn ContentGenerator>,
        prompts: Prompts,
    ) -> Self {
        Self {
            store,
            transcripts,
            generator,
            prompts,
            state: AppState::Home,
            session: None,
            contents: Vec::new(),
        }
    }

    /// Current view.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&SessionRecord> {
        self.session.as_ref()
    }

    /// Content feed of the active session, newest first.
    pub fn contents(&self) -> &[ContentRecord] {
        &self.contents
    }

    /// Fetch a transcript for a video URL and open a new session around it.
    ///
    /// The session is persisted before it becomes active. On any failure the
    /// controller returns Home with no session and nothing persisted.
    #[instrument(skip(self))]
    pub async fn submit_url(&mut self, url: &str) -> Result<&SessionRecord> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GjenbrukError::InvalidInput(
                "A video URL is required".to_string(),
            ));
        }

        self.state = AppState::FetchingTranscript;

        let fetched = match self.transcripts.fetch(url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.state = AppState::Home;
                return Err(e);
            }
        };

        let new_session = NewSession::new(
            url,
            &fetched.title,
            &fetched.duration,
            &fetched.thumbnail,
            &fetched.transcript,
        );
        let id = match self.store.add_session(&new_session).await {
            Ok(id) => id,
            Err(e) => {
                self.state = AppState::Home;
                return Err(e);
            }
        };

        info!("Opened session {} for \"{}\"", id, fetched.title);
        self.contents.clear();
        self.state = AppState::SessionView;

        Ok(self.session.insert(SessionRecord {
            id,
            url: new_session.url,
            title: new_session.title,
            duration: new_session.duration,
            summary: new_session.summary,
            thumbnail: new_session.thumbnail,
            transcript: new_session.transcript,
            timestamp: new_session.timestamp,
        }))
    }

    /// Generate and persist the impact summary for the active session.
    ///
    /// A missing session or empty transcript is a quiet no-op, and a model
    /// or store failure is logged but not surfaced; the summary is an
    /// enhancement, not a prerequisite for anything else.
    #[instrument(skip(self))]
    pub async fn generate_summary(&mut self) -> Result<Option<String>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if session.transcript.trim().is_empty() {
            return Ok(None);
        }

        let summary = match self.generator.summarize(&session.transcript).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                return Ok(None);
            }
        };

        if let Err(e) = self.store.update_summary(session.id, &summary).await {
            warn!("Failed to persist summary: {}", e);
            return Ok(None);
        }

        if let Some(session) = self.session.as_mut() {
            session.summary = summary.clone();
        }
        Ok(Some(summary))
    }

    /// Generate content for a platform in the active session.
    ///
    /// Text platforms take one model call; Image takes two (prompt
    /// derivation, then rendering); Video runs a polled long-running job.
    /// The result is persisted and prepended to the feed only after every
    /// step succeeds. Returns None when there is no active session.
    #[instrument(skip(self), fields(platform = %platform))]
    pub async fn select_platform(&mut self, platform: Platform) -> Result<Option<ContentRecord>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };

        let (content, media_url) = match platform.kind() {
            PlatformKind::Text => {
                let text = self
                    .generator
                    .platform_text(platform, &session.transcript, &session.title)
                    .await?;
                (text, None)
            }
            PlatformKind::Image => {
                let prompt = self.generator.image_prompt(&session.transcript).await?;
                let media = self.generator.generate_image(&prompt).await?;
                (format!("Prompt used: {}", prompt), Some(media))
            }
            PlatformKind::Video => {
                let subject = if session.summary.trim().is_empty() {
                    session.title.clone()
                } else {
                    session.summary.clone()
                };
                let mut vars = HashMap::new();
                vars.insert("subject".to_string(), subject);
                let prompt = Prompts::render(&self.prompts.media.video, &vars);
                let media = self.generator.generate_video(&prompt).await?;
                ("Viral asset successfully rendered.".to_string(), Some(media))
            }
        };

        let new_content = NewContent::new(session.id, platform, content, media_url);
        let id = self.store.add_content(&new_content).await?;

        let record = ContentRecord {
            id,
            session_id: new_content.session_id,
            platform: new_content.platform,
            content: new_content.content,
            media_url: new_content.media_url,
            timestamp: new_content.timestamp,
        };
        self.contents.insert(0, record.clone());
        info!("Generated {} content {} for session {}", platform, id, session.id);

        Ok(Some(record))
    }

    /// Refine the image of an existing Image content item.
    ///
    /// Reads the current media file, sends it with the instruction, and
    /// replaces the media handle with the refined result. The textual
    /// content (the original prompt note) is untouched.
    #[instrument(skip(self, instruction))]
    pub async fn refine_image(&mut self, content_id: i64, instruction: &str) -> Result<ContentRecord> {
        let Some(mut record) = self.store.get_content(content_id).await? else {
            return Err(GjenbrukError::InvalidInput(format!(
                "No content item with id {}",
                content_id
            )));
        };
        if record.platform != Platform::Image {
            return Err(GjenbrukError::InvalidInput(
                "Only Image content can be refined".to_string(),
            ));
        }
        let Some(media_url) = record.media_url.clone() else {
            return Err(GjenbrukError::InvalidInput(
                "Content item has no image to refine".to_string(),
            ));
        };

        let bytes = std::fs::read(&media_url)?;
        let refined = self
            .generator
            .edit_image(&BASE64.encode(&bytes), instruction)
            .await?;
        self.store.update_media_url(content_id, &refined).await?;

        record.media_url = Some(refined);
        if let Some(existing) = self.contents.iter_mut().find(|c| c.id == content_id) {
            existing.media_url = record.media_url.clone();
        }
        Ok(record)
    }

    /// Transcribe dictated audio (base64 PCM). Returns the text only; the
    /// caller decides what to do with it.
    #[instrument(skip_all)]
    pub async fn transcribe_audio(&mut self, audio_base64: &str) -> Result<String> {
        self.generator.transcribe_audio(audio_base64).await
    }

    /// Switch to the history view and return all sessions, newest first.
    pub async fn open_history(&mut self) -> Result<Vec<SessionRecord>> {
        self.state = AppState::History;
        self.store.list_sessions().await
    }

    /// Make a stored session active and load its content feed.
    pub async fn load_session(&mut self, id: i64) -> Result<&SessionRecord> {
        let Some(session) = self.store.get_session(id).await? else {
            return Err(GjenbrukError::InvalidInput(format!(
                "No session with id {}",
                id
            )));
        };
        self.contents = self.store.contents_for_session(id).await?;
        self.state = AppState::SessionView;
        Ok(self.session.insert(session))
    }

    /// Return to the landing view. The active session is kept so it can be
    /// resumed without a reload.
    pub fn go_home(&mut self) {
        self.state = AppState::Home;
    }

    /// Delete a session and all of its content. If it was the active
    /// session, the controller clears it.
    #[instrument(skip(self))]
    pub async fn delete_session(&mut self, id: i64) -> Result<bool> {
        let existed = self.store.delete_session(id).await?;
        if existed {
            info!("Deleted session {}", id);
            if self.session.as_ref().is_some_and(|s| s.id == id) {
                self.session = None;
                self.contents.clear();
                if self.state == AppState::SessionView {
                    self.state = AppState::Home;
                }
            }
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use crate::transcript::VideoTranscript;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeTranscripts {
        fail: bool,
    }

    #[async_trait]
    impl TranscriptSource for FakeTranscripts {
        async fn fetch(&self, video_url: &str) -> Result<VideoTranscript> {
            if self.fail {
                return Err(GjenbrukError::Auth(
                    "Your Supadata API key is invalid or has no credits.".to_string(),
                ));
            }
            Ok(VideoTranscript {
                transcript: format!("transcript for {}", video_url),
                title: "Test Video".to_string(),
                duration: "18:22".to_string(),
                thumbnail: "https://img.example/thumb.jpg".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct FakeGenerator {
        text_calls: AtomicU32,
        image_prompt_calls: AtomicU32,
        image_calls: AtomicU32,
        video_calls: AtomicU32,
        fail_text: bool,
        fail_summary: bool,
    }

    #[async_trait]
    impl ContentGenerator for FakeGenerator {
        async fn summarize(&self, _transcript: &str) -> Result<String> {
            if self.fail_summary {
                return Err(GjenbrukError::Generation("model down".to_string()));
            }
            Ok("A crisp impact summary.".to_string())
        }

        async fn platform_text(
            &self,
            platform: Platform,
            _transcript: &str,
            _title: &str,
        ) -> Result<String> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_text {
                return Err(GjenbrukError::Upstream {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(format!("{} post body", platform))
        }

        async fn image_prompt(&self, _transcript: &str) -> Result<String> {
            self.image_prompt_calls.fetch_add(1, Ordering::SeqCst);
            Ok("A cinematic 16:9 scene".to_string())
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            Ok("/tmp/media/image-1.png".to_string())
        }

        async fn edit_image(&self, _png_base64: &str, _instruction: &str) -> Result<String> {
            Ok("/tmp/media/image-2.png".to_string())
        }

        async fn generate_video(&self, prompt: &str) -> Result<String> {
            self.video_calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.starts_with("Futuristic visualization of:"));
            Ok("/tmp/media/video-1.mp4".to_string())
        }

        async fn transcribe_audio(&self, _audio_base64: &str) -> Result<String> {
            Ok("dictated words".to_string())
        }
    }

    async fn controller_with(
        transcripts: FakeTranscripts,
        generator: FakeGenerator,
    ) -> (SessionController, Arc<FakeGenerator>) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let generator = Arc::new(generator);
        let controller = SessionController::with_components(
            store,
            Arc::new(transcripts),
            generator.clone(),
            Prompts::default(),
        );
        (controller, generator)
    }

    #[tokio::test]
    async fn test_submit_url_opens_persisted_session() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;

        let session = controller
            .submit_url("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(session.title, "Test Video");
        assert_eq!(session.duration, "18:22");
        assert!(session.summary.is_empty());
        let id = session.id;

        assert_eq!(controller.state(), AppState::SessionView);
        // The session was written through to the store before becoming active.
        let stored = controller.store.get_session(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Test Video");
    }

    #[tokio::test]
    async fn test_empty_url_rejected_before_fetch() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: true }, FakeGenerator::default()).await;

        let result = controller.submit_url("   ").await;
        assert!(matches!(result, Err(GjenbrukError::InvalidInput(_))));
        assert_eq!(controller.state(), AppState::Home);
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_home_with_nothing_persisted() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: true }, FakeGenerator::default()).await;

        let result = controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await;
        assert!(matches!(result, Err(GjenbrukError::Auth(_))));
        assert_eq!(controller.state(), AppState::Home);
        assert!(controller.session().is_none());
        assert!(controller.store.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_persists_and_updates_active_session() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        let summary = controller.generate_summary().await.unwrap();
        assert_eq!(summary.as_deref(), Some("A crisp impact summary."));
        assert_eq!(controller.session().unwrap().summary, "A crisp impact summary.");

        let id = controller.session().unwrap().id;
        let stored = controller.store.get_session(id).await.unwrap().unwrap();
        assert_eq!(stored.summary, "A crisp impact summary.");
    }

    #[tokio::test]
    async fn test_summary_failure_is_swallowed() {
        let generator = FakeGenerator {
            fail_summary: true,
            ..FakeGenerator::default()
        };
        let (mut controller, _) = controller_with(FakeTranscripts { fail: false }, generator).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        let summary = controller.generate_summary().await.unwrap();
        assert!(summary.is_none());
        assert_eq!(controller.state(), AppState::SessionView);
        assert!(controller.session().unwrap().summary.is_empty());
    }

    #[tokio::test]
    async fn test_summary_store_failure_is_swallowed() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        let id = controller.session().unwrap().id;

        // Remove the row behind the controller's back so the summary write
        // has nothing to update. The failure stays on the log, not the
        // caller.
        controller.store.delete_session(id).await.unwrap();

        let summary = controller.generate_summary().await.unwrap();
        assert!(summary.is_none());
        assert_eq!(controller.state(), AppState::SessionView);
        // The in-memory session is not updated with an unpersisted summary.
        assert!(controller.session().unwrap().summary.is_empty());
    }

    #[tokio::test]
    async fn test_summary_without_session_is_noop() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        assert!(controller.generate_summary().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_text_platform_has_no_media() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        let record = controller
            .select_platform(Platform::LinkedIn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.platform, Platform::LinkedIn);
        assert_eq!(record.content, "LinkedIn post body");
        assert!(record.media_url.is_none());
    }

    #[tokio::test]
    async fn test_image_platform_makes_two_calls_and_keeps_prompt() {
        let (mut controller, generator) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        let record = controller
            .select_platform(Platform::Image)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.content, "Prompt used: A cinematic 16:9 scene");
        assert_eq!(record.media_url.as_deref(), Some("/tmp/media/image-1.png"));

        assert_eq!(generator.image_prompt_calls.load(Ordering::SeqCst), 1);
        assert_eq!(generator.image_calls.load(Ordering::SeqCst), 1);
        assert_eq!(generator.text_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_video_platform_uses_summary_as_subject() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        controller.generate_summary().await.unwrap();

        let record = controller
            .select_platform(Platform::Video)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.content, "Viral asset successfully rendered.");
        assert_eq!(record.media_url.as_deref(), Some("/tmp/media/video-1.mp4"));
    }

    #[tokio::test]
    async fn test_generation_failure_persists_nothing_and_keeps_view() {
        let generator = FakeGenerator {
            fail_text: true,
            ..FakeGenerator::default()
        };
        let (mut controller, _) = controller_with(FakeTranscripts { fail: false }, generator).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        let id = controller.session().unwrap().id;

        let result = controller.select_platform(Platform::TweetThread).await;
        assert!(matches!(result, Err(GjenbrukError::Upstream { .. })));
        assert_eq!(controller.state(), AppState::SessionView);
        assert!(controller.contents().is_empty());
        assert_eq!(controller.store.content_count(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_feed_is_newest_first_and_reselection_appends() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        controller.select_platform(Platform::LinkedIn).await.unwrap();
        controller.select_platform(Platform::Email).await.unwrap();
        controller.select_platform(Platform::LinkedIn).await.unwrap();

        let feed = controller.contents();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].platform, Platform::LinkedIn);
        assert_eq!(feed[1].platform, Platform::Email);
        assert_eq!(feed[2].platform, Platform::LinkedIn);
        // Newest first also holds for ids since they are monotonic.
        assert!(feed[0].id > feed[1].id && feed[1].id > feed[2].id);
    }

    #[tokio::test]
    async fn test_select_platform_without_session_is_noop() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        let record = controller.select_platform(Platform::Facebook).await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_history_load_and_go_home() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        controller.select_platform(Platform::Email).await.unwrap();
        let id = controller.session().unwrap().id;

        let sessions = controller.open_history().await.unwrap();
        assert_eq!(controller.state(), AppState::History);
        assert_eq!(sessions.len(), 1);

        controller.go_home();
        assert_eq!(controller.state(), AppState::Home);
        // The active session survives going home.
        assert!(controller.session().is_some());

        let session = controller.load_session(id).await.unwrap();
        assert_eq!(session.id, id);
        assert_eq!(controller.state(), AppState::SessionView);
        assert_eq!(controller.contents().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_active_session_clears_it() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        let id = controller.session().unwrap().id;

        assert!(controller.delete_session(id).await.unwrap());
        assert!(controller.session().is_none());
        assert!(controller.contents().is_empty());
        assert_eq!(controller.state(), AppState::Home);

        assert!(!controller.delete_session(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_refine_requires_image_platform() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        let record = controller
            .select_platform(Platform::LinkedIn)
            .await
            .unwrap()
            .unwrap();

        let result = controller.refine_image(record.id, "make it warmer").await;
        assert!(matches!(result, Err(GjenbrukError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_refine_image_replaces_media_handle() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        controller.submit_url("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        // Seed an Image content item whose media file actually exists.
        let dir = tempfile::tempdir().unwrap();
        let media_path = dir.path().join("seed.png");
        std::fs::write(&media_path, b"png-bytes").unwrap();
        let id = controller
            .store
            .add_content(&NewContent::new(
                controller.session().unwrap().id,
                Platform::Image,
                "Prompt used: seed".to_string(),
                Some(media_path.to_string_lossy().to_string()),
            ))
            .await
            .unwrap();

        let refined = controller.refine_image(id, "add contrast").await.unwrap();
        assert_eq!(refined.media_url.as_deref(), Some("/tmp/media/image-2.png"));
        assert_eq!(refined.content, "Prompt used: seed");

        let stored = controller.store.get_content(id).await.unwrap().unwrap();
        assert_eq!(stored.media_url.as_deref(), Some("/tmp/media/image-2.png"));
    }

    #[tokio::test]
    async fn test_transcribe_audio_passthrough() {
        let (mut controller, _) =
            controller_with(FakeTranscripts { fail: false }, FakeGenerator::default()).await;
        let text = controller.transcribe_audio("QUJD").await.unwrap();
        assert_eq!(text, "dictated words");
    }
}
