//! # Engine State Module
//!
//! The core engine module that manages the state of the voxel world and the player.
//!
//! ## Key Components
//!
//! * `EngineState` - The context object owning the world, camera and renderer cache
//! * `camera_state` - Handles camera positioning and movement
//! * `rendering` - Face culling, material batching and the graphics boundary
//! * `voxels` - Block storage, terrain generation, raycasting and mutation
//!
//! ## Tick order
//!
//! Each tick the engine receives one `ProcessedInputState`, translates it into a
//! `PlayerAction` and applies it in a fixed order:
//!
//! 1. Hotbar selection and the leaf transparency toggle
//! 2. Camera movement and look
//! 3. Block removals and placements, in click order, each with a fresh raycast
//!
//! Rendering then observes the fully settled grid.

use cgmath::Point3;
use log::{debug, info};
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use camera_state::CameraState;
use rendering::{
    meshing::renderer::{FrameStats, WorldRenderer},
    GraphicsBoundary,
};
use voxels::{block::block_type::BlockType, world::World};

use crate::application_state::input_state::ProcessedInputState;

pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// Default distance, in blocks, at which the player can target a block
pub const DEFAULT_REACH: f32 = 10.0;

const HOTBAR_KEYS: [(KeyCode, u8); 4] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
];

/// Flags controlling engine behavior and rendering options
#[derive(Debug, Default)]
pub struct EngineFlags {
    /// Whether the leaves batch is drawn with blending
    pub transparency_enabled: bool,
}

/// A block edit requested by a mouse click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    /// Remove the targeted block
    Remove,
    /// Place the selected block against the targeted face
    Place,
}

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::{
///     rendering::headless::HeadlessGraphics, voxels::world::World, EngineState, DEFAULT_REACH,
/// };
///
/// let world = World::new(16, 8, 16).unwrap();
/// let mut graphics = HeadlessGraphics::default();
/// let mut engine_state = EngineState::new(world, DEFAULT_REACH, &mut graphics);
/// let stats = engine_state.render(&mut graphics);
/// assert_eq!(stats.submissions, 0);
/// ```
pub struct EngineState {
    /// The voxel world
    pub world: World,
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Caches culled geometry and submits it to the graphics boundary
    pub renderer: WorldRenderer,
    /// Block type placed by a right click
    pub selected_block: BlockType,
    /// Maximum targeting distance
    pub reach: f32,
    flags: EngineFlags,
}

impl EngineState {
    /// Creates the engine around an already generated world.
    ///
    /// The camera spawns above the center column and materials are resolved
    /// through `graphics` once.
    pub fn new(world: World, reach: f32, graphics: &mut dyn GraphicsBoundary) -> Self {
        let camera_state = CameraState::spawn(&world);
        let renderer = WorldRenderer::new(graphics);
        info!(
            "Engine ready, camera at {:?}",
            camera_state.camera.position
        );

        Self {
            world,
            camera_state,
            player_actions: PlayerAction::default(),
            renderer,
            selected_block: BlockType::GRASS,
            reach,
            flags: EngineFlags::default(),
        }
    }

    /// Engine configuration flags
    pub fn flags(&self) -> &EngineFlags {
        &self.flags
    }

    /// Renders the current frame
    pub fn render(&mut self, graphics: &mut dyn GraphicsBoundary) -> FrameStats {
        self.renderer
            .render(&self.world, graphics, self.flags.transparency_enabled)
    }

    /// Applies the pending player actions to the camera and the world.
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_input(&mut self, wait_duration: Duration) {
        let actions = std::mem::take(&mut self.player_actions);

        if let Some(block_type) = actions.select_block {
            debug!("Selected {:?}", block_type);
            self.selected_block = block_type;
        }

        if actions.toggle_transparency {
            self.flags.transparency_enabled = !self.flags.transparency_enabled;
            info!(
                "Leaf transparency {}",
                if self.flags.transparency_enabled { "on" } else { "off" }
            );
        }

        self.camera_state.intake_actions(&actions);
        self.camera_state.update(wait_duration, &self.world);

        for action in actions.block_actions {
            self.apply_block_action(action);
        }
    }

    /// Performs one block edit against the block under the cursor.
    ///
    /// # Returns
    /// The coordinate that changed, or `None` on a miss or a rejected edit.
    pub fn apply_block_action(&mut self, action: BlockAction) -> Option<Point3<i32>> {
        let hit = self
            .world
            .block_at_cursor(&self.camera_state.camera, self.reach)?;

        let (position, changed) = match action {
            BlockAction::Remove => (hit.target, self.world.remove_block(hit.target)),
            BlockAction::Place => {
                let position = World::placement_position(&hit);
                (position, self.world.add_block(self.selected_block, position))
            }
        };

        debug!("{:?} at {:?}: {}", action, position, changed);
        changed.then_some(position)
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(input);
    }

    /// Translates the processed input state into player actions.
    fn translate_processed_input(input: ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            pan_left: input.get_key_state(KeyCode::KeyQ).is_active(),
            pan_right: input.get_key_state(KeyCode::KeyE).is_active(),
            rotate_view: input.get_mouse_delta(),
            toggle_transparency: input.was_key_pressed(KeyCode::KeyT),
            ..PlayerAction::default()
        };

        // Last digit pressed wins
        player_action.select_block = input
            .key_presses
            .iter()
            .filter_map(|key| HOTBAR_KEYS.iter().find(|(hotbar_key, _)| hotbar_key == key))
            .filter_map(|(_, slot)| BlockType::from_hotbar_slot(*slot))
            .last();

        player_action.block_actions = input
            .mouse_clicks
            .iter()
            .filter_map(|button| match button {
                MouseButton::Left => Some(BlockAction::Remove),
                MouseButton::Right => Some(BlockAction::Place),
                _ => None,
            })
            .collect();

        player_action
    }
}

/// Represents player actions derived from input
///
/// Movement flags are level-triggered (true while the key is held); the other
/// fields are edge-triggered and consumed once.
#[derive(Debug, Default, Clone)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,

    /// Keyboard pan
    pub pan_left: bool,
    pub pan_right: bool,

    /// View rotation - Some if the mouse moved
    pub rotate_view: Option<(f64, f64)>,

    /// Block edits in click order
    pub block_actions: Vec<BlockAction>,

    /// Hotbar selection made this tick
    pub select_block: Option<BlockType>,

    pub toggle_transparency: bool,
}
