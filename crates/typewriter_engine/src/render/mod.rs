//! Rendering seam
//!
//! The engine never draws. Each tick a [`GlyphRenderer`] receives the
//! current [`GlyphInstance`] of every live glyph and the ids of glyphs that
//! were destroyed, and is responsible for putting textured quads on screen.

use std::collections::HashMap;

use crate::foundation::collections::GlyphId;
use crate::foundation::math::Vec2;
use crate::text::AnimationStyle;

/// What a renderer needs to draw one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    /// Rendered position of the glyph's cell origin
    pub position: Vec2,
    /// Uniform scale
    pub scale: f32,
    /// RGBA tint
    pub color: [f32; 4],
    /// Atlas cell to sample
    pub cell_index: usize,
    /// Animation style tag
    pub animation_style: AnimationStyle,
}

/// Backend that displays glyphs
pub trait GlyphRenderer {
    /// Create or update the visual for a glyph
    fn upsert(&mut self, id: GlyphId, instance: &GlyphInstance);

    /// Destroy the visual for a glyph that no longer exists
    fn remove(&mut self, id: GlyphId);
}

/// Renderer that just remembers the latest instance of every glyph
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    instances: HashMap<GlyphId, GlyphInstance>,
    removed: usize,
}

impl RecordingRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest instance of a glyph
    pub fn get(&self, id: GlyphId) -> Option<&GlyphInstance> {
        self.instances.get(&id)
    }

    /// Number of visuals currently alive
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no visuals are alive
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total visuals destroyed so far
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// All live visuals
    pub fn instances(&self) -> impl Iterator<Item = (&GlyphId, &GlyphInstance)> {
        self.instances.iter()
    }
}

impl GlyphRenderer for RecordingRenderer {
    fn upsert(&mut self, id: GlyphId, instance: &GlyphInstance) {
        self.instances.insert(id, *instance);
    }

    fn remove(&mut self, id: GlyphId) {
        if self.instances.remove(&id).is_some() {
            self.removed += 1;
        }
    }
}
