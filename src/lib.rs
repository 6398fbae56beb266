#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A bounded voxel world with procedural terrain, first-person block targeting
//! and face-culled rendering behind a graphics boundary trait.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input queueing and the frame loop
//! * `engine_state` - The world, camera, raycasting, mutation and rendering
//!
//! ## Architecture
//!
//! The crate follows a modular architecture with clear separation between:
//! * Block storage and terrain generation
//! * Camera-ray block targeting and mutation
//! * Visibility culling and batched geometry submission
//! * Input handling and frame timing
//!
//! No part of the crate talks to a GPU directly. A renderer implements
//! [`engine_state::rendering::GraphicsBoundary`] and receives one vertex batch per
//! material each frame.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(error) = voxel_world::run() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

use application_state::{
    config::{ApplicationConfig, ConfigError, DEFAULT_CONFIG_PATH},
    input_state::InputEvent,
    ApplicationState,
};
use engine_state::rendering::headless::HeadlessGraphics;
use log::info;
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

pub mod application_state;
pub mod engine_state;

const DEMO_FRAME_TIME: Duration = Duration::from_millis(16);

/// Loads `world.json` (or the defaults), builds the world and plays a short
/// scripted session against a headless graphics boundary.
///
/// # Errors
/// Returns the configuration error if the config file is unreadable or invalid.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = ApplicationConfig::load_or_default(DEFAULT_CONFIG_PATH)?;
    let mut state = ApplicationState::new(config, HeadlessGraphics::default())?;

    let stats = state.tick_with_duration(DEMO_FRAME_TIME);
    info!("First frame: {:?}", stats);

    for (label, events) in demo_script() {
        state.graphics.clear();
        for event in events {
            state.push_input(event);
        }
        let stats = state.tick_with_duration(DEMO_FRAME_TIME);
        info!(
            "{}: {} submissions, {} faces, remeshed {}, {} blocks",
            label,
            stats.submissions,
            stats.faces,
            stats.remeshed,
            state.engine_state.world.grid().len()
        );
    }

    Ok(())
}

fn click(button: MouseButton) -> [InputEvent; 2] {
    [
        InputEvent::MouseButton { button, pressed: true },
        InputEvent::MouseButton { button, pressed: false },
    ]
}

fn tap(key: KeyCode) -> [InputEvent; 2] {
    [
        InputEvent::Key { key, pressed: true },
        InputEvent::Key { key, pressed: false },
    ]
}

fn demo_script() -> Vec<(&'static str, Vec<InputEvent>)> {
    vec![
        (
            "Look down",
            vec![InputEvent::MouseMotion { delta_x: 0.0, delta_y: 1000.0 }],
        ),
        ("Remove", click(MouseButton::Left).to_vec()),
        ("Place grass", click(MouseButton::Right).to_vec()),
        (
            "Place log",
            [tap(KeyCode::Digit3), click(MouseButton::Right)].concat(),
        ),
        ("Toggle leaf transparency", tap(KeyCode::KeyT).to_vec()),
    ]
}
