//! Analyze command - open a session from a video URL.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::session::SessionController;
use anyhow::Result;

/// Run the analyze command.
pub async fn run_analyze(url: &str, no_summary: bool, settings: Settings) -> Result<()> {
    preflight::check(preflight::Operation::Analyze, &settings)?;

    let mut controller = SessionController::from_settings(&settings)?;

    let spinner = Output::spinner("Probing video transcript...");
    let result = controller.submit_url(url).await;
    spinner.finish_and_clear();

    let session = match result {
        Ok(session) => session,
        Err(e) => {
            Output::error(&format!("Analysis failed: {}", e));
            return Err(e.into());
        }
    };

    let id = session.id;
    Output::success(&format!("Session #{} opened", id));
    Output::kv("Title", &session.title);
    Output::kv("Duration", &session.duration);
    Output::kv("Thumbnail", &session.thumbnail);

    if !no_summary {
        // The summary needs a Gemini key; without one it is skipped so the
        // session itself still lands.
        if settings.gemini_api_key().is_some() {
            let spinner = Output::spinner("Synthesizing impact summary...");
            let summary = controller.generate_summary().await?;
            spinner.finish_and_clear();

            match summary {
                Some(summary) => {
                    Output::header("Impact Summary");
                    println!("{}", summary);
                }
                None => Output::warning("Summary generation failed; session saved without one."),
            }
        } else {
            Output::warning("GEMINI_API_KEY not set; skipping the impact summary.");
        }
    }

    println!();
    Output::info(&format!(
        "Generate content with: gjenbruk generate {} <platform>",
        id
    ));

    Ok(())
}
