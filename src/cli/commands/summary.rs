//! Summary command - generate the impact summary for a session.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::session::SessionController;
use anyhow::Result;

/// Run the summary command.
pub async fn run_summary(session_id: i64, settings: Settings) -> Result<()> {
    preflight::check(preflight::Operation::Generate, &settings)?;

    let mut controller = SessionController::from_settings(&settings)?;
    controller.load_session(session_id).await?;

    let spinner = Output::spinner("Synthesizing impact summary...");
    let summary = controller.generate_summary().await?;
    spinner.finish_and_clear();

    match summary {
        Some(summary) => {
            Output::header("Impact Summary");
            println!("{}", summary);
        }
        None => Output::warning("Summary generation failed; the session is unchanged."),
    }

    Ok(())
}
