//! Show command - display a session and its content feed.

use crate::cli::Output;
use crate::config::Settings;
use crate::session::SessionController;
use anyhow::Result;

/// Run the show command.
pub async fn run_show(session_id: i64, settings: Settings) -> Result<()> {
    let mut controller = SessionController::from_settings(&settings)?;
    let session = controller.load_session(session_id).await?;

    Output::header(&session.title);
    Output::kv("Session", &format!("#{}", session.id));
    Output::kv("URL", &session.url);
    Output::kv("Duration", &session.duration);
    if !session.summary.is_empty() {
        Output::header("Impact Summary");
        println!("{}", session.summary);
    }

    let contents = controller.contents();
    if contents.is_empty() {
        println!();
        Output::info(&format!(
            "No content yet. Generate some with: gjenbruk generate {} <platform>",
            session_id
        ));
    } else {
        Output::header(&format!("Content Feed ({})", contents.len()));
        for record in contents {
            Output::content_item(record);
        }
    }

    Ok(())
}
