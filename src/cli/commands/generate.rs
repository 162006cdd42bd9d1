//! Generate command - produce platform content for a session.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::error::GjenbrukError;
use crate::platform::{Platform, PlatformKind};
use crate::session::SessionController;
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(session_id: i64, platform: &str, settings: Settings) -> Result<()> {
    preflight::check(preflight::Operation::Generate, &settings)?;

    let platform: Platform = platform.parse().map_err(GjenbrukError::InvalidInput)?;

    let mut controller = SessionController::from_settings(&settings)?;
    controller.load_session(session_id).await?;

    let spinner = Output::spinner(match platform.kind() {
        PlatformKind::Text => "Synthesizing platform narrative...",
        PlatformKind::Image => "Generating High-Fidelity Asset...",
        PlatformKind::Video => "Rendering Cinematic Video...",
    });
    let result = controller.select_platform(platform).await;
    spinner.finish_and_clear();

    match result {
        Ok(Some(record)) => {
            Output::success(&format!("{} content generated", platform));
            Output::content_item(&record);
            if record.platform == Platform::Image {
                println!();
                Output::info(&format!(
                    "Refine the image with: gjenbruk refine {} \"<instruction>\"",
                    record.id
                ));
            }
            Ok(())
        }
        Ok(None) => {
            Output::error("No active session");
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Generation failed: {}", e));
            Err(e.into())
        }
    }
}
