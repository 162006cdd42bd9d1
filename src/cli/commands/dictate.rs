//! Dictate command - transcribe a recorded audio file.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::session::SessionController;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Run the dictate command.
pub async fn run_dictate(input: &str, settings: Settings) -> Result<()> {
    preflight::check(preflight::Operation::Dictate, &settings)?;

    let audio = std::fs::read(input)?;
    if audio.is_empty() {
        Output::error("Audio file is empty");
        anyhow::bail!("audio file is empty: {}", input);
    }

    let mut controller = SessionController::from_settings(&settings)?;

    let spinner = Output::spinner("Transcribing audio...");
    let result = controller.transcribe_audio(&BASE64.encode(&audio)).await;
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            Output::header("Transcription");
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            Err(e.into())
        }
    }
}
