//! Incremental line layout with word wrap
//!
//! Glyphs arrive one at a time and are placed at a running anchor. When
//! a placement pushes the anchor past the right edge of the text box, the
//! anchor moves down a line and the word in progress is carried along as
//! one block.
//!
//! # Layout Coordinate System
//!
//! - The first line starts at `(padding, origin_y)`
//! - +X axis points right
//! - +Y axis points up, so `line_offset` is normally negative

use serde::{Deserialize, Serialize};

use crate::foundation::collections::{GlyphArena, GlyphId};
use crate::foundation::math::Vec2;
use crate::glyph::Glyph;

/// Text box geometry and spacing, in pixels at scale 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Width of the text box
    pub box_width: f32,
    /// Left margin, also kept free on the right
    pub padding: f32,
    /// Advance for a space between words
    pub space_offset: f32,
    /// Gap added after every glyph
    pub character_gap: f32,
    /// Vertical step between lines
    pub line_offset: f32,
    /// Y of the first line
    pub origin_y: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            box_width: 480.0,
            padding: 12.0,
            space_offset: 8.0,
            character_gap: 2.0,
            line_offset: -24.0,
            origin_y: 0.0,
        }
    }
}

impl LayoutSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            self.box_width,
            self.padding,
            self.space_offset,
            self.character_gap,
            self.line_offset,
            self.origin_y,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Layout settings must be finite".to_string());
        }
        if self.padding < 0.0 || self.space_offset < 0.0 {
            return Err("Padding and space offset cannot be negative".to_string());
        }
        if self.box_width <= 2.0 * self.padding {
            return Err(format!(
                "Box width {} leaves no room inside padding {}",
                self.box_width, self.padding
            ));
        }
        Ok(())
    }

    /// Anchor x at which a line overflows
    pub fn wrap_limit(&self) -> f32 {
        self.box_width - self.padding
    }
}

/// Places glyphs and tracks the line and word in progress
#[derive(Debug, Clone)]
pub struct LineLayoutEngine {
    settings: LayoutSettings,
    anchor: Vec2,
    current_line: Vec<GlyphId>,
    current_word: Vec<GlyphId>,
    word_count: usize,
    max_scale_in_line: f32,
    line_group: u32,
    word_group: u32,
}

impl LineLayoutEngine {
    /// Create a layout engine with the anchor at the start of the first line
    pub fn new(settings: LayoutSettings) -> Self {
        let anchor = Vec2::new(settings.padding, settings.origin_y);
        Self {
            settings,
            anchor,
            current_line: Vec::new(),
            current_word: Vec::new(),
            word_count: 0,
            max_scale_in_line: 0.0,
            line_group: 0,
            word_group: 0,
        }
    }

    /// Return to the start of the first line and forget all groups
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    /// Layout settings
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Insertion point for the next glyph
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Glyphs placed on the current line, in placement order
    pub fn current_line(&self) -> &[GlyphId] {
        &self.current_line
    }

    /// Glyphs of the word in progress
    pub fn current_word(&self) -> &[GlyphId] {
        &self.current_word
    }

    /// Words completed on the current line
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Largest glyph scale on the current line, 0 when empty
    pub fn max_scale_in_line(&self) -> f32 {
        self.max_scale_in_line
    }

    /// Id of the current line group
    pub fn line_group(&self) -> u32 {
        self.line_group
    }

    /// End the word in progress and leave a gap
    pub fn place_space(&mut self, scale: f32) {
        self.current_word.clear();
        self.word_group += 1;
        if !self.current_line.is_empty() {
            self.anchor.x += self.settings.space_offset * scale;
            self.word_count += 1;
        }
    }

    /// Position a glyph at the anchor, store it, and wrap if the line overflows
    #[allow(clippy::cast_precision_loss)]
    pub fn place_glyph(&mut self, arena: &mut GlyphArena, mut glyph: Glyph) -> GlyphId {
        let scale = glyph.scale;
        let advance = (self.settings.character_gap + glyph.metric.width as f32) * scale;

        glyph.base_position = Vec2::new(self.anchor.x - glyph.bearing(), self.anchor.y);
        glyph.line_group_id = self.line_group;
        glyph.word_group_id = self.word_group;
        log::trace!("Placed {:?} at {:?}", glyph.source_char, glyph.base_position);

        let id = arena.insert(glyph);
        self.current_line.push(id);
        self.current_word.push(id);
        self.anchor.x += advance;
        self.max_scale_in_line = self.max_scale_in_line.max(scale);

        if self.anchor.x >= self.settings.wrap_limit() {
            self.wrap(arena);
        }
        id
    }

    /// Move the anchor to the start of the next line
    pub fn new_line(&mut self, scale: f32) {
        let step = if self.max_scale_in_line > 0.0 {
            self.max_scale_in_line
        } else {
            scale
        };
        self.start_line(self.anchor.y + self.settings.line_offset * step);
        self.current_word.clear();
        self.word_group += 1;
    }

    fn start_line(&mut self, y: f32) {
        self.anchor = Vec2::new(self.settings.padding, y);
        self.max_scale_in_line = 0.0;
        self.current_line.clear();
        self.word_count = 0;
        self.line_group += 1;
    }

    fn wrap(&mut self, arena: &mut GlyphArena) {
        let carry_word = self.word_count > 0;
        let new_y = self.anchor.y + self.settings.line_offset * self.max_scale_in_line;
        self.start_line(new_y);

        if !carry_word {
            // A lone word that overflows stays where it is; only later glyphs
            // continue on the next line.
            log::trace!("Line overflow inside its only word, nothing to carry");
            self.current_word.clear();
            return;
        }

        let min_x = self
            .current_word
            .iter()
            .filter_map(|&id| arena.get(id))
            .map(|g| g.base_position.x)
            .fold(f32::INFINITY, f32::min);
        let Some(first_bearing) = self
            .current_word
            .iter()
            .find_map(|&id| arena.get(id))
            .map(Glyph::bearing)
        else {
            return;
        };
        let shift = -min_x + self.settings.padding - first_bearing;

        let mut right_edge = self.anchor.x;
        for &id in &self.current_word {
            let Some(glyph) = arena.get_mut(id) else {
                continue;
            };
            glyph.base_position.x += shift;
            glyph.base_position.y = new_y;
            glyph.line_group_id = self.line_group;
            right_edge = right_edge.max(glyph.trailing_edge(self.settings.character_gap));
            self.max_scale_in_line = self.max_scale_in_line.max(glyph.scale);
            self.current_line.push(id);
        }
        log::trace!("Carried {} glyphs to line {}", self.current_word.len(), self.line_group);
        self.anchor.x = right_edge;
    }
}
