//! Specialized collection types

use crate::glyph::Glyph;

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a glyph in the [`GlyphArena`]
    pub struct GlyphId;
}

/// Arena owning every live glyph, indexed by a stable id
pub type GlyphArena = SlotMap<GlyphId, Glyph>;
