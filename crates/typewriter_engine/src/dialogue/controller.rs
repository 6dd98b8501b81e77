//! Typewriter controller
//!
//! Owns the reveal timer, the markup parser, the style state, the layout
//! engine and the glyph arena. The host calls [`TypewriterController::tick`]
//! once per frame and [`TypewriterController::generate_dialogue`] whenever a
//! new line should start.

use super::{DialogueError, DialogueResult, DialogueState};
use crate::animation::{glyph_seed, GlyphMotion};
use crate::core::TypewriterConfig;
use crate::foundation::collections::{GlyphArena, GlyphId};
use crate::glyph::Glyph;
use crate::render::{GlyphInstance, GlyphRenderer};
use crate::text::{
    char_index, CommandEffect, GlyphMetricsTable, LineLayoutEngine, MarkupParser, MetricsError, ParseEvent,
    StyleState,
};

/// Top-level dialogue driver
pub struct TypewriterController {
    config: TypewriterConfig,
    metrics: GlyphMetricsTable,
    lines: Vec<String>,

    state: DialogueState,
    resume_state: DialogueState,
    current_index: Option<usize>,
    source: Vec<char>,
    cursor: usize,
    timer: f32,
    clock: f32,

    parser: MarkupParser,
    style: StyleState,
    layout: LineLayoutEngine,

    glyphs: GlyphArena,
    line_order: Vec<GlyphId>,
    // Drained by sync_renderer / drain_despawned
    despawned: Vec<GlyphId>,
    dialogue_id: u64,
    glyph_sequence: u64,
}

impl TypewriterController {
    /// Create a controller over a set of dialogue lines
    pub fn new(
        config: TypewriterConfig,
        metrics: GlyphMetricsTable,
        lines: Vec<String>,
    ) -> DialogueResult<Self> {
        config.validate()?;
        if metrics.is_empty() {
            return Err(MetricsError::Empty.into());
        }

        log::info!("Typewriter controller ready with {} dialogue lines", lines.len());
        Ok(Self {
            parser: MarkupParser::with_delimiter(config.timing.delimiter),
            layout: LineLayoutEngine::new(config.layout.clone()),
            config,
            metrics,
            lines,
            state: DialogueState::Finished,
            resume_state: DialogueState::Finished,
            current_index: None,
            source: Vec::new(),
            cursor: 0,
            timer: 0.0,
            clock: 0.0,
            style: StyleState::default(),
            glyphs: GlyphArena::with_key(),
            line_order: Vec::new(),
            despawned: Vec::new(),
            dialogue_id: 0,
            glyph_sequence: 0,
        })
    }

    /// Start revealing dialogue line `index`.
    ///
    /// Any glyphs still on screen begin fading; everything else starts over.
    /// Valid in every state.
    pub fn generate_dialogue(&mut self, index: usize) -> DialogueResult<()> {
        let Some(line) = self.lines.get(index) else {
            return Err(DialogueError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        };
        self.source = line.chars().collect();

        self.fade_all_glyphs();
        self.parser.reset();
        self.layout.reset();
        self.style.reset();
        self.line_order.clear();
        self.cursor = 0;
        self.timer = 0.0;
        self.glyph_sequence = 0;
        self.dialogue_id += 1;
        self.current_index = Some(index);
        self.state = DialogueState::Talking;
        self.resume_state = DialogueState::Talking;

        log::info!("Dialogue {} started ({} characters)", index, self.source.len());
        Ok(())
    }

    /// Advance playback and every glyph animation by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        if self.state == DialogueState::Paused {
            return;
        }
        self.clock += delta_time;

        match self.state {
            DialogueState::Talking => {
                self.timer += delta_time;
                self.reveal();
            }
            DialogueState::Finishing => {
                self.timer += delta_time;
                if self.timer >= self.config.timing.post_display_delay {
                    self.state = DialogueState::Finished;
                    self.fade_all_glyphs();
                    log::info!("Dialogue {:?} finished", self.current_index);
                }
            }
            DialogueState::Paused | DialogueState::Finished => {}
        }

        self.animate(delta_time);
    }

    /// Freeze playback. Returns `false` when there is nothing to pause.
    pub fn pause(&mut self) -> bool {
        match self.state {
            DialogueState::Talking | DialogueState::Finishing => {
                self.resume_state = self.state;
                self.state = DialogueState::Paused;
                true
            }
            DialogueState::Paused | DialogueState::Finished => false,
        }
    }

    /// Continue from where [`pause`](Self::pause) stopped
    pub fn resume(&mut self) -> bool {
        if self.state != DialogueState::Paused {
            return false;
        }
        self.state = self.resume_state;
        true
    }

    /// Reveal the rest of the current line immediately
    pub fn skip(&mut self) -> bool {
        if self.state != DialogueState::Talking {
            return false;
        }
        while self.cursor < self.source.len() {
            let ch = self.source[self.cursor];
            self.cursor += 1;
            self.consume(ch);
        }
        self.finish_reveal();
        true
    }

    /// Push every live glyph to the renderer and retire destroyed ones.
    ///
    /// Destroyed ids queue up until this or [`drain_despawned`](Self::drain_despawned)
    /// is called, so hosts should call one of them every frame.
    pub fn sync_renderer(&mut self, renderer: &mut impl GlyphRenderer) {
        for id in self.despawned.drain(..) {
            renderer.remove(id);
        }
        for (id, glyph) in &self.glyphs {
            renderer.upsert(id, &glyph.instance());
        }
    }

    /// Ids of glyphs destroyed since the last call or the last
    /// [`sync_renderer`](Self::sync_renderer)
    pub fn drain_despawned(&mut self) -> Vec<GlyphId> {
        std::mem::take(&mut self.despawned)
    }

    /// Current playback state
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Style that the next glyph will receive
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Layout engine of the current line
    pub fn layout(&self) -> &LineLayoutEngine {
        &self.layout
    }

    /// Active configuration
    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// All live glyphs, including fading ones from earlier lines
    pub fn glyphs(&self) -> &GlyphArena {
        &self.glyphs
    }

    /// Look up a live glyph
    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(id)
    }

    /// Live glyphs of the current line in placement order
    pub fn line_glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.line_order.iter().filter_map(|&id| self.glyphs.get(id))
    }

    /// Render snapshots of every live glyph
    pub fn instances(&self) -> impl Iterator<Item = (GlyphId, GlyphInstance)> + '_ {
        self.glyphs.iter().map(|(id, glyph)| (id, glyph.instance()))
    }

    /// Index of the line being shown, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Number of dialogue lines available
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Replace the dialogue lines; the line in progress keeps playing
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Source characters not yet consumed
    pub fn remaining_characters(&self) -> usize {
        self.source.len() - self.cursor
    }

    /// Consume characters while the timer covers the current interval.
    ///
    /// Each pass either stops or consumes a character, so the loop is bounded
    /// by the line length whatever the interval.
    fn reveal(&mut self) {
        loop {
            if self.cursor >= self.source.len() {
                self.finish_reveal();
                return;
            }
            let interval = self.config.timing.base_interval / self.style.speed;
            if self.timer < interval {
                return;
            }

            let ch = self.source[self.cursor];
            self.cursor += 1;
            // Only displayed glyphs cost time
            if self.consume(ch) {
                self.timer -= interval;
            }
        }
    }

    fn finish_reveal(&mut self) {
        self.timer = 0.0;
        self.state = DialogueState::Finishing;
        log::debug!("Dialogue {:?} fully revealed, {} glyphs", self.current_index, self.line_order.len());
    }

    /// Feed one source character; `true` when it placed a glyph
    fn consume(&mut self, ch: char) -> bool {
        match self.parser.feed(ch) {
            None => false,
            Some(ParseEvent::Visible(' ')) => {
                self.layout.place_space(self.style.scale);
                false
            }
            Some(ParseEvent::Visible(ch)) => self.place_character(ch),
            Some(ParseEvent::Command(command)) => {
                match CommandEffect::from_command(&command) {
                    Some(CommandEffect::NewLine) => self.layout.new_line(self.style.scale),
                    Some(effect) => {
                        self.style.apply(effect);
                    }
                    None => {}
                }
                false
            }
        }
    }

    fn place_character(&mut self, ch: char) -> bool {
        let (Some(cell_index), Some(metric)) = (char_index(ch), self.metrics.metrics_for(ch)) else {
            log::trace!("Skipping unrenderable character {:?}", ch);
            return false;
        };

        let seed = self.config.animation.seed.map(|seed| glyph_seed(u64::from(seed), self.glyph_sequence));
        self.glyph_sequence += 1;
        let motion = GlyphMotion::new(self.style.animation_style, &self.config.animation, seed);
        let glyph = Glyph::new(ch, cell_index, metric, &self.style, motion, self.clock, self.dialogue_id);

        let id = self.layout.place_glyph(&mut self.glyphs, glyph);
        self.line_order.push(id);
        true
    }

    fn fade_all_glyphs(&mut self) {
        for glyph in self.glyphs.values_mut() {
            glyph.begin_fade();
        }
    }

    fn animate(&mut self, delta_time: f32) {
        let settings = &self.config.animation;
        let mut expired = Vec::new();
        for (id, glyph) in &mut self.glyphs {
            if glyph.update(delta_time, settings) {
                expired.push(id);
            }
        }
        if expired.is_empty() {
            return;
        }

        for id in &expired {
            self.glyphs.remove(*id);
        }
        log::trace!("Destroyed {} faded glyphs", expired.len());
        self.line_order.retain(|&id| self.glyphs.contains_key(id));
        self.despawned.extend(expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimingSettings;
    use crate::foundation::math::{Color, Vec2};
    use crate::text::{AnimationStyle, LayoutSettings};

    fn controller(lines: &[&str]) -> TypewriterController {
        let config = TypewriterConfig::default()
            .with_timing(TimingSettings {
                base_interval: 0.1,
                post_display_delay: 1.0,
                ..TimingSettings::default()
            })
            .with_layout(LayoutSettings {
                box_width: 100.0,
                padding: 2.0,
                space_offset: 3.0,
                character_gap: 1.0,
                line_offset: -10.0,
                origin_y: 0.0,
            })
            .with_seed(3);
        let metrics = GlyphMetricsTable::monospace(4, 68).unwrap();
        TypewriterController::new(config, metrics, lines.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    #[test]
    fn test_initial_state_finished() {
        let c = controller(&["a"]);
        assert_eq!(c.state(), DialogueState::Finished);
        assert_eq!(c.glyphs().len(), 0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut c = controller(&["a"]);
        assert!(matches!(
            c.generate_dialogue(5),
            Err(DialogueError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert_eq!(c.state(), DialogueState::Finished);
    }

    #[test]
    fn test_glyph_count_matches_renderable_non_space() {
        let mut c = controller(&["Hello, world! `x"]);
        c.generate_dialogue(0).unwrap();
        c.tick(10.0);
        assert_eq!(c.line_glyphs().count(), 13);
        assert_eq!(c.state(), DialogueState::Finishing);
    }

    #[test]
    fn test_unrenderable_character_is_free_and_leaves_no_gap() {
        let mut plain = controller(&["ab"]);
        let mut skipped = controller(&["a`b"]);
        for c in [&mut plain, &mut skipped] {
            c.generate_dialogue(0).unwrap();
            c.tick(0.1);
            assert_eq!(c.line_glyphs().count(), 1);
            // the backtick consumes no interval, so "b" lands on the next one
            c.tick(0.1);
            assert_eq!(c.line_glyphs().count(), 2);
        }

        let x = |c: &TypewriterController| c.line_glyphs().map(|g| g.base_position.x).collect::<Vec<_>>();
        assert_eq!(x(&skipped), x(&plain));
        assert_eq!(skipped.layout().anchor(), plain.layout().anchor());
        assert_eq!(skipped.remaining_characters(), 0);
    }

    #[test]
    fn test_one_glyph_per_interval() {
        let mut c = controller(&["abc"]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.05);
        assert_eq!(c.line_glyphs().count(), 0);
        c.tick(0.05);
        assert_eq!(c.line_glyphs().count(), 1);
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 2);
    }

    #[test]
    fn test_spaces_are_free() {
        let mut c = controller(&["a b"]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 1);
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 2);
    }

    #[test]
    fn test_speed_halves_interval_and_resets() {
        let mut c = controller(&["¦sp=2¦abcd"]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 2);
        assert_eq!(c.style().speed, 2.0);
        c.tick(0.05);
        assert_eq!(c.line_glyphs().count(), 3);

        c.generate_dialogue(0).unwrap();
        assert_eq!(c.style().speed, 1.0);
    }

    #[test]
    fn test_zero_speed_is_rejected() {
        let mut c = controller(&["¦sp=0¦abc"]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.1);
        assert_eq!(c.style().speed, 1.0);
        assert_eq!(c.line_glyphs().count(), 1);
    }

    #[test]
    fn test_color_command() {
        let mut c = controller(&["¦col=1,0,0¦A"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        let glyph = c.line_glyphs().next().unwrap();
        assert_eq!(glyph.color, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_unknown_command_keeps_style() {
        let mut c = controller(&["X¦zz=1¦X"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        let glyphs: Vec<&Glyph> = c.line_glyphs().collect();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].color, glyphs[1].color);
        assert_eq!(glyphs[0].scale, glyphs[1].scale);
        assert_eq!(glyphs[0].animation_style, glyphs[1].animation_style);
        assert_eq!(*c.style(), StyleState::default());
    }

    #[test]
    fn test_explicit_newline() {
        let mut c = controller(&["Hi¦n¦Bye"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        let positions: Vec<Vec2> = c.line_glyphs().map(|g| g.base_position).collect();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], Vec2::new(2.0, 0.0));
        assert_eq!(positions[1], Vec2::new(7.0, 0.0));
        assert_eq!(positions[2], Vec2::new(2.0, -10.0));
        assert_eq!(positions[3], Vec2::new(7.0, -10.0));
        assert_eq!(positions[4], Vec2::new(12.0, -10.0));
    }

    #[test]
    fn test_animation_style_snapshot() {
        let mut c = controller(&["a¦anim=sh¦b¦a=none¦c"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        let styles: Vec<AnimationStyle> = c.line_glyphs().map(|g| g.animation_style).collect();
        assert_eq!(
            styles,
            vec![AnimationStyle::None, AnimationStyle::Shaking, AnimationStyle::None]
        );
    }

    #[test]
    fn test_finishing_then_fade_then_despawn() {
        let mut c = controller(&["ab"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        assert_eq!(c.state(), DialogueState::Finishing);
        c.tick(0.5);
        c.tick(0.25);
        assert_eq!(c.state(), DialogueState::Finishing);
        c.tick(0.25);
        assert_eq!(c.state(), DialogueState::Finished);
        assert_eq!(c.line_glyphs().count(), 2);
        for glyph in c.line_glyphs() {
            assert!(glyph.is_fading());
            assert!((glyph.color.a - 0.5).abs() < 1e-5);
        }

        c.tick(0.3);
        assert_eq!(c.glyphs().len(), 0);
        assert_eq!(c.drain_despawned().len(), 2);
        assert!(c.drain_despawned().is_empty());
    }

    #[test]
    fn test_empty_line_finishes() {
        let mut c = controller(&[""]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.0);
        assert_eq!(c.state(), DialogueState::Finishing);
    }

    #[test]
    fn test_extreme_speed_is_bounded() {
        let mut c = controller(&["¦sp=1000000¦abc def"]);
        c.generate_dialogue(0).unwrap();
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 6);
        assert_eq!(c.remaining_characters(), 0);
    }

    #[test]
    fn test_zero_interval_reveals_in_one_tick() {
        let config = TypewriterConfig::default().with_timing(TimingSettings {
            base_interval: 0.0,
            ..TimingSettings::default()
        });
        let metrics = GlyphMetricsTable::monospace(4, 68).unwrap();
        let mut c = TypewriterController::new(config, metrics, vec!["abc def".to_string()]).unwrap();
        c.generate_dialogue(0).unwrap();
        c.tick(0.0);
        assert_eq!(c.line_glyphs().count(), 6);
        assert_eq!(c.state(), DialogueState::Finishing);
    }

    #[test]
    fn test_generate_mid_line_fades_previous() {
        let mut c = controller(&["abcdef", "xy"]);
        c.generate_dialogue(0).unwrap();
        for _ in 0..3 {
            c.tick(0.1);
        }
        assert_eq!(c.line_glyphs().count(), 3);
        c.generate_dialogue(1).unwrap();
        assert_eq!(c.line_glyphs().count(), 0);
        assert_eq!(c.glyphs().len(), 3);
        assert!(c.glyphs().values().all(Glyph::is_fading));
        assert_eq!(c.state(), DialogueState::Talking);

        c.tick(0.6);
        assert_eq!(c.glyphs().len(), 2);
        assert_eq!(c.line_glyphs().count(), 2);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut c = controller(&["abc"]);
        assert!(!c.pause());
        c.generate_dialogue(0).unwrap();
        assert!(c.pause());
        c.tick(10.0);
        assert_eq!(c.line_glyphs().count(), 0);
        assert_eq!(c.state(), DialogueState::Paused);
        assert!(c.resume());
        assert_eq!(c.state(), DialogueState::Talking);
        c.tick(0.1);
        assert_eq!(c.line_glyphs().count(), 1);
    }

    #[test]
    fn test_skip_reveals_rest() {
        let mut c = controller(&["ab ¦si=2¦cd"]);
        c.generate_dialogue(0).unwrap();
        assert!(c.skip());
        assert_eq!(c.line_glyphs().count(), 4);
        assert_eq!(c.state(), DialogueState::Finishing);
        assert!(!c.skip());
    }

    #[test]
    fn test_set_lines_keeps_current_line_playing() {
        let mut c = controller(&["ab"]);
        assert_eq!(c.current_index(), None);
        c.generate_dialogue(0).unwrap();
        c.tick(0.1);
        assert_eq!(c.current_index(), Some(0));

        c.set_lines(vec!["x".to_string(), "yz".to_string()]);
        assert_eq!(c.line_count(), 2);
        c.tick(1.0);
        let chars: Vec<char> = c.line_glyphs().map(|g| g.source_char).collect();
        assert_eq!(chars, vec!['a', 'b']);

        c.generate_dialogue(1).unwrap();
        assert_eq!(c.current_index(), Some(1));
        c.tick(1.0);
        let chars: Vec<char> = c.line_glyphs().map(|g| g.source_char).collect();
        assert_eq!(chars, vec!['y', 'z']);
    }

    #[test]
    fn test_lookup_accessors_agree() {
        let mut c = controller(&["hey"]);
        assert_eq!(c.config().timing.base_interval, 0.1);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);

        assert_eq!(c.layout().current_line().len(), 3);
        for &id in c.layout().current_line() {
            let glyph = c.glyph(id).unwrap();
            let (_, instance) = c.instances().find(|(other, _)| *other == id).unwrap();
            assert_eq!(instance, glyph.instance());
        }
        assert_eq!(c.instances().count(), 3);
    }

    #[test]
    fn test_despawned_ids_queue_until_drained() {
        let mut c = controller(&["ab", "cd"]);
        c.generate_dialogue(0).unwrap();
        c.tick(1.0);
        c.generate_dialogue(1).unwrap();
        // old glyphs fade out over several frames without anyone draining
        for _ in 0..3 {
            c.tick(0.25);
        }
        let first = c.drain_despawned();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|&id| c.glyph(id).is_none()));

        let mut renderer = crate::render::RecordingRenderer::new();
        c.tick(10.0);
        c.tick(0.6);
        c.sync_renderer(&mut renderer);
        assert!(c.drain_despawned().is_empty());
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut c = controller(&["abc"]);
        c.generate_dialogue(0).unwrap();
        c.tick(f32::NAN);
        c.tick(-1.0);
        assert_eq!(c.line_glyphs().count(), 0);
        assert_eq!(c.state(), DialogueState::Talking);
    }
}
