//! Delete command - remove a session and its content.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{ContentStore, SqliteStore};
use anyhow::Result;

/// Run the delete command.
pub async fn run_delete(session_id: i64, settings: Settings) -> Result<()> {
    let store = SqliteStore::new(&settings.sqlite_path())?;

    if store.delete_session(session_id).await? {
        Output::success(&format!(
            "Session #{} and its content deleted",
            session_id
        ));
    } else {
        Output::warning(&format!("No session with id {}", session_id));
    }

    Ok(())
}
