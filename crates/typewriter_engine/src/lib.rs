//! # Typewriter Engine
//!
//! A rich-text typewriter dialogue engine: reveals a line one character at a
//! time, interprets inline markup to change color, size, speed and animation
//! mid-line, lays glyphs out with word wrap, and fades them out afterwards.
//!
//! ## Features
//!
//! - **Inline Markup**: `¦name=arg1,arg2¦` commands embedded in dialogue text
//! - **Incremental Layout**: Per-glyph placement with whole-word wrapping
//! - **Glyph Animation**: Wiggle, sine, shake and gravity motion plus fade-out
//! - **Bitmap Atlas Metrics**: Glyph widths measured from a fixed-cell atlas
//! - **Backend Agnostic**: Renderers only observe glyph instances
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use typewriter_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TypewriterConfig::default();
//!     let metrics = GlyphMetricsTable::load_atlas("resources/font.png", &config.atlas)?;
//!     let lines = vec!["Hello ¦col=1,0,0¦world¦n¦¦anim=wiggle¦bye".to_string()];
//!
//!     let mut controller = TypewriterController::new(config, metrics, lines)?;
//!     let mut renderer = RecordingRenderer::new();
//!     controller.generate_dialogue(0)?;
//!
//!     loop {
//!         controller.tick(1.0 / 60.0);
//!         controller.sync_renderer(&mut renderer);
//!         if controller.state() == DialogueState::Finished && controller.glyphs().is_empty() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod text;
pub mod animation;
pub mod glyph;
pub mod dialogue;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::AnimationSettings,
        core::config::{Config, ConfigError, TimingSettings, TypewriterConfig},
        dialogue::{DialogueError, DialogueState, TypewriterController},
        foundation::{
            collections::GlyphId,
            math::{Color, Vec2},
        },
        glyph::Glyph,
        render::{GlyphInstance, GlyphRenderer, RecordingRenderer},
        text::{AnimationStyle, AtlasLayout, GlyphMetric, GlyphMetricsTable, LayoutSettings, StyleState},
    };
}
