//! Refine command - edit a generated image.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::session::SessionController;
use anyhow::Result;

/// Run the refine command.
pub async fn run_refine(content_id: i64, instruction: &str, settings: Settings) -> Result<()> {
    preflight::check(preflight::Operation::Generate, &settings)?;

    let mut controller = SessionController::from_settings(&settings)?;

    let spinner = Output::spinner("Generating High-Fidelity Asset...");
    let result = controller.refine_image(content_id, instruction).await;
    spinner.finish_and_clear();

    match result {
        Ok(record) => {
            Output::success("Image refined");
            Output::content_item(&record);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Refinement failed: {}", e));
            Err(e.into())
        }
    }
}
