//! Displayed glyph records
//!
//! A [`Glyph`] is one character instance on screen. Layout owns its base
//! position, [`GlyphMotion`] owns its offset from that position, and the
//! fade owns its alpha.

use crate::animation::{AnimationSettings, Fade, GlyphMotion};
use crate::foundation::math::{Color, Vec2};
use crate::render::GlyphInstance;
use crate::text::{AnimationStyle, GlyphMetric, StyleState};

/// One displayed character
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Character from the dialogue source
    pub source_char: char,
    /// Atlas cell used to draw it
    pub cell_index: usize,
    /// Metric of the atlas cell
    pub metric: GlyphMetric,
    /// Position assigned by layout, moved only by word wrap
    pub base_position: Vec2,
    /// Animation offset from the base position
    pub offset: Vec2,
    /// Uniform scale at placement time
    pub scale: f32,
    /// Current tint; alpha decays while fading
    pub color: Color,
    /// Animation style at placement time
    pub animation_style: AnimationStyle,
    /// Motion state driven by `animation_style`
    pub motion: GlyphMotion,
    /// Present once the glyph has started to fade out
    pub fade: Option<Fade>,
    /// Layout line this glyph belongs to
    pub line_group_id: u32,
    /// Word this glyph belongs to
    pub word_group_id: u32,
    /// Controller clock when the glyph was placed, in seconds
    pub birth_time: f32,
    /// Dialogue line that produced the glyph
    pub dialogue_id: u64,
}

impl Glyph {
    /// Create an unplaced glyph styled from `style`
    pub fn new(
        source_char: char,
        cell_index: usize,
        metric: GlyphMetric,
        style: &StyleState,
        motion: GlyphMotion,
        birth_time: f32,
        dialogue_id: u64,
    ) -> Self {
        Self {
            source_char,
            cell_index,
            metric,
            base_position: Vec2::zeros(),
            offset: Vec2::zeros(),
            scale: style.scale,
            color: style.color,
            animation_style: style.animation_style,
            motion,
            fade: None,
            line_group_id: 0,
            word_group_id: 0,
            birth_time,
            dialogue_id,
        }
    }

    /// Rendered position, layout plus animation
    pub fn position(&self) -> Vec2 {
        self.base_position + self.offset
    }

    /// Left bearing in layout units
    #[allow(clippy::cast_precision_loss)]
    pub fn bearing(&self) -> f32 {
        self.metric.start_offset as f32 * self.scale
    }

    /// Anchor x just past this glyph, given the inter-character gap
    #[allow(clippy::cast_precision_loss)]
    pub fn trailing_edge(&self, character_gap: f32) -> f32 {
        self.base_position.x + self.bearing() + (character_gap + self.metric.width as f32) * self.scale
    }

    /// Start fading out; later calls keep the original fade
    pub fn begin_fade(&mut self) {
        if self.fade.is_none() {
            self.fade = Some(Fade::new(self.color.a));
        }
    }

    /// Whether the glyph is fading out
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Advance motion and fade by one tick.
    ///
    /// Returns `true` once the fade has completed and the glyph should be
    /// destroyed.
    pub fn update(&mut self, delta_time: f32, settings: &AnimationSettings) -> bool {
        if self.motion.update(&mut self.offset, delta_time, settings) {
            self.begin_fade();
        }
        match self.fade.as_mut() {
            Some(fade) => {
                self.color.a = fade.update(delta_time, settings.fade_duration);
                fade.is_finished(settings.fade_duration)
            }
            None => false,
        }
    }

    /// Snapshot for the renderer
    pub fn instance(&self) -> GlyphInstance {
        GlyphInstance {
            position: self.position(),
            scale: self.scale,
            color: self.color.to_array(),
            cell_index: self.cell_index,
            animation_style: self.animation_style,
        }
    }
}
