//! Text system
//!
//! Glyph metrics, inline markup, style state and line layout.

pub mod metrics;
pub mod markup;
pub mod command;
pub mod style;
pub mod layout;

pub use metrics::*;
pub use markup::*;
pub use command::*;
pub use style::*;
pub use layout::*;
