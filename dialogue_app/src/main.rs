//! Headless dialogue demo
//!
//! Plays a short scripted conversation through the typewriter engine at a
//! fixed 60Hz frame rate and logs what a renderer would draw.
//!
//! Usage: `dialogue_demo [config.toml|config.ron] [atlas.png]`

mod log_renderer;

use log_renderer::LogRenderer;
use typewriter_engine::foundation::logging;
use typewriter_engine::prelude::*;

const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60;

const DIALOGUE: &[&str] = &[
    "Hello there! ¦col=1,0.8,0.2¦Welcome¦col¦ to the docks.",
    "¦sp=0.5¦Slowly... ¦sp=3¦then all at once! ¦anim=shake¦Careful,¦anim=none¦ it bites.",
    "¦si=1.5¦Big words¦si=1¦¦n¦and a ¦anim=sine¦wavy¦anim=none¦ second line.",
    "¦anim=g¦Everything falls apart eventually.",
];

/// Simulated key presses: frame number and key name
const KEY_PRESSES: &[(u32, &str)] = &[(0, "1"), (240, "2"), (300, "3"), (720, "4")];

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No dialogue bound to key {0:?}")]
    UnboundKey(String),
}

/// Map a number key to a dialogue index
fn dialogue_for_key(key: &str) -> Result<usize, AppError> {
    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| AppError::UnboundKey(key.to_string()))
}

fn load_config(path: Option<&str>) -> Result<TypewriterConfig, AppError> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Ok(TypewriterConfig::load_from_file(path)?)
        }
        None => Ok(TypewriterConfig::default().with_seed(0x5eed)),
    }
}

fn load_metrics(path: Option<&str>, config: &TypewriterConfig) -> Result<GlyphMetricsTable, AppError> {
    let table = match path {
        Some(path) => GlyphMetricsTable::load_atlas(path, &config.atlas),
        None => {
            log::info!("No atlas given, using monospace metrics");
            GlyphMetricsTable::monospace(10, config.atlas.total_characters)
        }
    };
    table.map_err(|e| AppError::Dialogue(e.into()))
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let metrics = load_metrics(args.get(1).map(String::as_str), &config)?;

    let lines = DIALOGUE.iter().map(|s| (*s).to_string()).collect();
    let mut controller = TypewriterController::new(config, metrics, lines)?;
    let mut renderer = LogRenderer::new();
    let mut last_state = controller.state();

    for frame in 0..MAX_FRAMES {
        for (_, key) in KEY_PRESSES.iter().filter(|(at, _)| *at == frame) {
            let index = dialogue_for_key(key)?;
            log::info!("Key {} pressed at frame {}", key, frame);
            controller.generate_dialogue(index)?;
        }

        controller.tick(FRAME_TIME);
        controller.sync_renderer(&mut renderer);

        if controller.state() != last_state {
            log::info!("Frame {}: {:?} -> {:?}, {}", frame, last_state, controller.state(), renderer.summary());
            last_state = controller.state();
        }

        let pending_keys = KEY_PRESSES.iter().any(|(at, _)| *at > frame);
        if !pending_keys && controller.state() == DialogueState::Finished && controller.glyphs().is_empty() {
            log::info!("All dialogue played after {} frames", frame + 1);
            break;
        }
    }

    log::info!("Done: {}", renderer.summary());
    log::info!("Total glyphs drawn: {}", renderer.spawned());
    Ok(())
}

fn main() {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting typewriter dialogue demo");

    if let Err(e) = run() {
        log::error!("Dialogue demo failed: {}", e);
        std::process::exit(1);
    }
}
