//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{GjenbrukError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcript fetch; runs in demo mode without a Supadata key.
    Analyze,
    /// Content/summary generation requires a Gemini key.
    Generate,
    /// Audio transcription requires a Gemini key.
    Dictate,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Analyze => {
            // Not blocking: a missing key means canned demo output.
            if settings.supadata_api_key().is_none() {
                crate::cli::Output::warning(
                    "SUPADATA_API_KEY not set; running in demo mode with a canned transcript.",
                );
            }
        }
        Operation::Generate | Operation::Dictate => {
            check_gemini_key(settings)?;
        }
    }
    Ok(())
}

/// Check that a Gemini API key is configured.
fn check_gemini_key(settings: &Settings) -> Result<()> {
    if settings.gemini_api_key().is_some() {
        Ok(())
    } else {
        Err(GjenbrukError::Config(
            "GEMINI_API_KEY not set. Set it with: export GEMINI_API_KEY='...'".to_string(),
        ))
    }
}
