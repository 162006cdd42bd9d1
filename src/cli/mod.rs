//! CLI module for Gjenbruk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Gjenbruk - Content Repurposing Studio
///
/// Turns a video transcript into platform-tailored marketing content.
/// The name "Gjenbruk" comes from the Norwegian word for "reuse."
#[derive(Parser, Debug)]
#[command(name = "gjenbruk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a video transcript and open a new session around it
    Analyze {
        /// YouTube video URL
        url: String,

        /// Skip the automatic impact summary
        #[arg(long)]
        no_summary: bool,
    },

    /// Generate content for a platform in a session
    Generate {
        /// Session identifier (see 'gjenbruk history')
        session_id: i64,

        /// Target platform (linkedin, post, reel, facebook, tweet, email, image, video)
        platform: String,
    },

    /// Generate (or regenerate) the impact summary of a session
    Summary {
        /// Session identifier
        session_id: i64,
    },

    /// Refine a generated image with an edit instruction
    Refine {
        /// Content item identifier (see 'gjenbruk show')
        content_id: i64,

        /// Edit instruction (e.g. "make the lighting warmer")
        instruction: String,
    },

    /// Transcribe a recorded audio file (raw 16 kHz PCM)
    Dictate {
        /// Path to the audio file
        input: String,
    },

    /// List past sessions
    History,

    /// Show a session and its content feed
    Show {
        /// Session identifier
        session_id: i64,
    },

    /// Delete a session and all of its generated content
    Delete {
        /// Session identifier
        session_id: i64,
    },

    /// Check configuration and API key availability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
