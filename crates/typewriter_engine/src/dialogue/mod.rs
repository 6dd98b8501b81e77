//! Dialogue playback
//!
//! The [`TypewriterController`] drives a dialogue line from first character
//! to fade-out: it feeds the markup parser at the pace set by the style,
//! places glyphs, and runs every glyph's animation once per tick.

pub mod controller;

pub use controller::*;

use crate::config::ConfigError;
use crate::text::MetricsError;

/// Playback phase of the current dialogue line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogueState {
    /// Timer frozen until resumed
    Paused,
    /// Revealing characters
    Talking,
    /// Everything revealed, waiting before the fade
    Finishing,
    /// Idle; the line (if any) is fading or gone
    #[default]
    Finished,
}

/// Result type for dialogue operations
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Structural misuse of the dialogue system.
///
/// Bad markup never produces one of these; it is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// Requested a line that does not exist
    #[error("Dialogue line {index} out of range ({len} lines)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of lines available
        len: usize,
    },

    /// Glyph metrics could not be built
    #[error("Glyph metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
