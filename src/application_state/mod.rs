//! # Application State Management
//!
//! This module drives the frame loop, including:
//! - Configuration loading
//! - Input queueing and per-tick draining
//! - Frame timing
//! - Handing the engine a graphics boundary to render into

pub mod config;
pub mod frame_timer;
pub mod input_manager;
pub mod input_state;

use config::{ApplicationConfig, ConfigError};
use frame_timer::FrameTimer;
use input_manager::InputManager;
use input_state::InputEvent;
use log::{debug, info};
use web_time::{Duration, Instant};

use crate::engine_state::{
    rendering::{meshing::renderer::FrameStats, GraphicsBoundary},
    voxels::world::World,
    EngineState,
};

/// The main application state container.
///
/// Owns the engine, the graphics boundary it renders into and the input queue
/// feeding it. Each call to [`ApplicationState::tick`] runs one input pass
/// followed by one render pass.
pub struct ApplicationState<G: GraphicsBoundary> {
    /// The configuration the world was built from
    pub config: ApplicationConfig,

    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Where frames are submitted
    pub graphics: G,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: Instant,

    frame_timer: FrameTimer,
}

impl<G: GraphicsBoundary> ApplicationState<G> {
    /// Generates the configured world and sets up the engine around it.
    ///
    /// # Errors
    /// Any configuration error, including invalid world dimensions.
    pub fn new(config: ApplicationConfig, mut graphics: G) -> Result<Self, ConfigError> {
        let size = config.world.validate()?;
        let (world, report) = World::generate(
            size.size_x,
            size.size_y,
            size.size_z,
            config.world.terrain_settings(),
        )?;
        debug!("Trees at {:?}", report.tree_positions);

        let engine_state = EngineState::new(world, config.world.reach, &mut graphics);
        let frame_timer = config
            .fps_report_interval
            .filter(|seconds| *seconds > 0.0)
            .and_then(|seconds| Duration::try_from_secs_f32(seconds).ok())
            .map(FrameTimer::new)
            .unwrap_or_default();

        Ok(Self {
            config,
            engine_state,
            graphics,
            input_manager: InputManager::new(),
            last_wait_time: Instant::now(),
            frame_timer,
        })
    }

    /// Queues an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input_manager.push_event(event);
    }

    /// Runs one frame, timed against the wall clock.
    pub fn tick(&mut self) -> FrameStats {
        let now = Instant::now();
        let wait_dt = now - self.last_wait_time;
        self.last_wait_time = now;
        self.tick_with_duration(wait_dt)
    }

    /// Runs one frame as if `wait_dt` had elapsed since the previous one.
    pub fn tick_with_duration(&mut self, wait_dt: Duration) -> FrameStats {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(processed_input);
        self.engine_state.process_input(wait_dt);

        let stats = self.engine_state.render(&mut self.graphics);

        if let Some(fps) = self.frame_timer.record_frame(wait_dt) {
            info!("FPS: {:.2}", fps);
        }
        stats
    }

    /// The most recently reported frame rate.
    pub fn fps(&self) -> Option<f32> {
        self.frame_timer.last_fps()
    }
}
