//! SQLite-backed session/content store.

use super::{ContentRecord, ContentStore, NewContent, NewSession, SessionRecord};
use crate::error::{GjenbrukError, Result};
use crate::platform::Platform;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    duration TEXT NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    thumbnail TEXT NOT NULL,
    transcript TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_url ON sessions(url);
CREATE INDEX IF NOT EXISTS idx_sessions_title ON sessions(title);
CREATE INDEX IF NOT EXISTS idx_sessions_timestamp ON sessions(timestamp);

CREATE TABLE IF NOT EXISTS generated_contents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL,
    platform TEXT NOT NULL,
    content TEXT NOT NULL,
    media_url TEXT,
    timestamp INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contents_session_id ON generated_contents(session_id);
CREATE INDEX IF NOT EXISTS idx_contents_platform ON generated_contents(platform);
CREATE INDEX IF NOT EXISTS idx_contents_timestamp ON generated_contents(timestamp);
"#;

/// SQLite-based content store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrent read behavior
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::migrate(&conn)?;

        info!("Initialized SQLite store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        match version {
            0 => {
                conn.execute_batch(SCHEMA)?;
                conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))?;
                Ok(())
            }
            SCHEMA_VERSION => Ok(()),
            v => Err(GjenbrukError::Store(format!(
                "Unsupported schema version {} (expected {})",
                v, SCHEMA_VERSION
            ))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| GjenbrukError::Store(format!("Failed to acquire lock: {}", e)))
    }

    fn session_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRecord> {
        Ok(SessionRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            duration: row.get(3)?,
            summary: row.get(4)?,
            thumbnail: row.get(5)?,
            transcript: row.get(6)?,
            timestamp: row.get(7)?,
        })
    }

    fn content_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(ContentRecord, String)> {
        let platform_tag: String = row.get(2)?;
        Ok((
            ContentRecord {
                id: row.get(0)?,
                session_id: row.get(1)?,
                platform: Platform::LinkedIn, // replaced after tag resolution
                content: row.get(3)?,
                media_url: row.get(4)?,
                timestamp: row.get(5)?,
            },
            platform_tag,
        ))
    }

    fn resolve_platform(record: (ContentRecord, String)) -> Result<ContentRecord> {
        let (mut content, tag) = record;
        content.platform = Platform::from_tag(&tag)
            .ok_or_else(|| GjenbrukError::Store(format!("Unknown platform tag: {}", tag)))?;
        Ok(content)
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    #[instrument(skip(self, session), fields(url = %session.url))]
    async fn add_session(&self, session: &NewSession) -> Result<i64> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO sessions (url, title, duration, summary, thumbnail, transcript, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                session.url,
                session.title,
                session.duration,
                session.summary,
                session.thumbnail,
                session.transcript,
                session.timestamp,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted session {}", id);
        Ok(id)
    }

    async fn get_session(&self, id: i64) -> Result<Option<SessionRecord>> {
        let conn = self.lock()?;

        let session = conn
            .query_row(
                r#"
                SELECT id, url, title, duration, summary, thumbnail, transcript, timestamp
                FROM sessions WHERE id = ?1
                "#,
                params![id],
                Self::session_from_row,
            )
            .optional()?;

        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, url, title, duration, summary, thumbnail, transcript, timestamp
            FROM sessions ORDER BY timestamp DESC, id DESC
            "#,
        )?;

        let sessions = stmt
            .query_map([], Self::session_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(sessions)
    }

    #[instrument(skip(self, summary))]
    async fn update_summary(&self, id: i64, summary: &str) -> Result<()> {
        let conn = self.lock()?;

        let updated = conn.execute(
            "UPDATE sessions SET summary = ?1 WHERE id = ?2",
            params![summary, id],
        )?;

        if updated == 0 {
            return Err(GjenbrukError::Store(format!("No session with id {}", id)));
        }
        debug!("Updated summary for session {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;

        // Content cascade and session delete in one transaction so a failure
        // between the two steps cannot leave orphaned content items.
        let tx = conn.unchecked_transaction()?;
        let contents_deleted = tx.execute(
            "DELETE FROM generated_contents WHERE session_id = ?1",
            params![id],
        )?;
        let sessions_deleted = tx.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        tx.commit()?;

        info!(
            "Deleted session {} ({} content items)",
            id, contents_deleted
        );
        Ok(sessions_deleted > 0)
    }

    #[instrument(skip(self, content), fields(session_id = content.session_id, platform = %content.platform))]
    async fn add_content(&self, content: &NewContent) -> Result<i64> {
        let conn = self.lock()?;

        let session_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sessions WHERE id = ?1)",
            params![content.session_id],
            |row| row.get(0),
        )?;
        if !session_exists {
            return Err(GjenbrukError::Store(format!(
                "No session with id {}",
                content.session_id
            )));
        }

        conn.execute(
            r#"
            INSERT INTO generated_contents (session_id, platform, content, media_url, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                content.session_id,
                content.platform.tag(),
                content.content,
                content.media_url,
                content.timestamp,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted content item {}", id);
        Ok(id)
    }

    async fn get_content(&self, id: i64) -> Result<Option<ContentRecord>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                r#"
                SELECT id, session_id, platform, content, media_url, timestamp
                FROM generated_contents WHERE id = ?1
                "#,
                params![id],
                Self::content_from_row,
            )
            .optional()?;

        row.map(Self::resolve_platform).transpose()
    }

    async fn contents_for_session(&self, session_id: i64) -> Result<Vec<ContentRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, session_id, platform, content, media_url, timestamp
            FROM generated_contents
            WHERE session_id = ?1
            ORDER BY timestamp DESC, id DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![session_id], Self::content_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(Self::resolve_platform).collect()
    }

    async fn content_count(&self, session_id: i64) -> Result<u32> {
        let conn = self.lock()?;

        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM generated_contents WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    #[instrument(skip(self, media_url))]
    async fn update_media_url(&self, id: i64, media_url: &str) -> Result<()> {
        let conn = self.lock()?;

        let updated = conn.execute(
            "UPDATE generated_contents SET media_url = ?1 WHERE id = ?2",
            params![media_url, id],
        )?;

        if updated == 0 {
            return Err(GjenbrukError::Store(format!(
                "No content item with id {}",
                id
            )));
        }
        Ok(())
    }
}
