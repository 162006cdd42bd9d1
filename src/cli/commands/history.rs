//! History command - list past sessions.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{ContentStore, SqliteStore};
use anyhow::Result;

/// Run the history command.
pub async fn run_history(settings: Settings) -> Result<()> {
    let store = SqliteStore::new(&settings.sqlite_path())?;
    let sessions = store.list_sessions().await?;

    if sessions.is_empty() {
        Output::info("No sessions yet. Use 'gjenbruk analyze <url>' to open one.");
        return Ok(());
    }

    Output::header(&format!("Sessions ({})", sessions.len()));
    println!();
    for session in &sessions {
        let count = store.content_count(session.id).await?;
        Output::session_info(session, count);
    }

    Ok(())
}
