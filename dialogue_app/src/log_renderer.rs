//! Console stand-in for a sprite renderer

use std::collections::HashMap;

use typewriter_engine::prelude::*;

/// Tracks live glyph visuals and logs their lifecycle
#[derive(Default)]
pub struct LogRenderer {
    visuals: HashMap<GlyphId, GlyphInstance>,
    spawned: usize,
    destroyed: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary of what is on screen
    pub fn summary(&self) -> String {
        let fading = self.visuals.values().filter(|v| v.color[3] < 1.0).count();
        format!(
            "{} visible ({} fading), {} spawned, {} destroyed",
            self.visuals.len(),
            fading,
            self.spawned,
            self.destroyed
        )
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }
}

impl GlyphRenderer for LogRenderer {
    fn upsert(&mut self, id: GlyphId, instance: &GlyphInstance) {
        if self.visuals.insert(id, *instance).is_none() {
            self.spawned += 1;
            log::debug!(
                "spawn cell {:>2} at ({:>6.1}, {:>6.1}) scale {:.2} color {:?} {:?}",
                instance.cell_index,
                instance.position.x,
                instance.position.y,
                instance.scale,
                instance.color,
                instance.animation_style
            );
        }
    }

    fn remove(&mut self, id: GlyphId) {
        if self.visuals.remove(&id).is_some() {
            self.destroyed += 1;
        }
    }
}
