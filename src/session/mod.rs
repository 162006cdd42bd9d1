//! Session lifecycle coordination.
//!
//! The controller owns which session is active, what view the application is
//! in, and the ordering of the in-memory content feed. All mutations of a
//! session flow through it.

mod controller;

pub use controller::SessionController;

/// The view the application is currently in.
///
/// Only the controller transitions between states; a failed operation leaves
/// the state where it was (except a failed fetch, which returns Home).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Landing view, ready to accept a URL or dictation.
    Home,
    /// A transcript fetch is in flight.
    FetchingTranscript,
    /// An active session with its content feed.
    SessionView,
    /// Browsing past sessions.
    History,
}
