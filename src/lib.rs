//! Gjenbruk - Transcript Repurposing Engine
//!
//! A local-first CLI tool for turning video transcripts into platform-ready
//! marketing content.
//!
//! The name "Gjenbruk" comes from the Norwegian word for "reuse."
//!
//! # Overview
//!
//! Gjenbruk allows you to:
//! - Pull the transcript of a YouTube video (or transcribe raw audio)
//! - Generate an impact summary of the source material
//! - Repurpose the transcript into platform-tailored posts, images and video
//! - Keep every analyzed session and generated asset in a local database
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `platform` - Target platform enumeration
//! - `transcript` - Transcript acquisition (Supadata, demo fallback)
//! - `generation` - Content generation (Gemini text/image/video)
//! - `store` - Local session/content persistence
//! - `session` - The session controller coordinating the workflow
//!
//! # Example
//!
//! ```rust,no_run
//! use gjenbruk::config::Settings;
//! use gjenbruk::platform::Platform;
//! use gjenbruk::session::SessionController;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut controller = SessionController::from_settings(&settings)?;
//!
//!     let session = controller
//!         .submit_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("Analyzed: {}", session.title);
//!
//!     if let Some(item) = controller.select_platform(Platform::LinkedIn).await? {
//!         println!("{}", item.content);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod http;
pub mod platform;
pub mod session;
pub mod store;
pub mod transcript;

pub use error::{GjenbrukError, Result};
