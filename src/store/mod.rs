//! Local persistence for sessions and generated content.
//!
//! Provides a trait-based interface so the session controller can be tested
//! against an in-memory database.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::platform::Platform;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One analyzed video/audio source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Identifier, assigned by the store on insert. Stable and never reused.
    pub id: i64,
    /// Source URL the session was created from.
    pub url: String,
    /// Video title.
    pub title: String,
    /// Human-readable duration (e.g. "18:22").
    pub duration: String,
    /// Impact summary. Empty until generated.
    pub summary: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Full transcript text. Immutable once set.
    pub transcript: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

/// A session waiting to be inserted (no identifier yet).
#[derive(Debug, Clone)]
pub struct NewSession {
    pub url: String,
    pub title: String,
    pub duration: String,
    pub summary: String,
    pub thumbnail: String,
    pub transcript: String,
    pub timestamp: i64,
}

impl NewSession {
    /// Create a session record for a freshly fetched transcript.
    ///
    /// The summary starts empty; it is filled in by the summary operation.
    pub fn new(url: &str, title: &str, duration: &str, thumbnail: &str, transcript: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            duration: duration.to_string(),
            summary: String::new(),
            thumbnail: thumbnail.to_string(),
            transcript: transcript.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// One piece of repurposed content belonging to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Identifier, assigned by the store on insert.
    pub id: i64,
    /// Owning session.
    pub session_id: i64,
    /// Target platform.
    pub platform: Platform,
    /// Textual content (or confirmation/prompt note for media platforms).
    pub content: String,
    /// Media handle for Image/Video platforms; None for text platforms.
    pub media_url: Option<String>,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

/// A content item waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub session_id: i64,
    pub platform: Platform,
    pub content: String,
    pub media_url: Option<String>,
    pub timestamp: i64,
}

impl NewContent {
    pub fn new(
        session_id: i64,
        platform: Platform,
        content: String,
        media_url: Option<String>,
    ) -> Self {
        Self {
            session_id,
            platform,
            content,
            media_url,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Trait for session/content store implementations.
///
/// Identifiers are produced only by the insert operations (auto-increment,
/// monotonic, never reused). Updates never change an identifier or a
/// foreign key.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a session and return its assigned identifier.
    async fn add_session(&self, session: &NewSession) -> Result<i64>;

    /// Fetch a session by identifier.
    async fn get_session(&self, id: i64) -> Result<Option<SessionRecord>>;

    /// All sessions, newest first.
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>>;

    /// Overwrite the summary of a session. Other fields are untouched.
    async fn update_summary(&self, id: i64, summary: &str) -> Result<()>;

    /// Delete a session and all of its content items in one transaction.
    ///
    /// Returns true if the session existed.
    async fn delete_session(&self, id: i64) -> Result<bool>;

    /// Insert a content item and return its assigned identifier.
    ///
    /// Fails if the owning session does not exist.
    async fn add_content(&self, content: &NewContent) -> Result<i64>;

    /// Fetch a content item by identifier.
    async fn get_content(&self, id: i64) -> Result<Option<ContentRecord>>;

    /// All content items for a session, newest first.
    async fn contents_for_session(&self, session_id: i64) -> Result<Vec<ContentRecord>>;

    /// Number of content items for a session.
    async fn content_count(&self, session_id: i64) -> Result<u32>;

    /// Replace the media handle of a content item (image refinement).
    async fn update_media_url(&self, id: i64, media_url: &str) -> Result<()>;
}
