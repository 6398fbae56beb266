//! # Camera State Management
//!
//! This module handles the first-person camera:
//! - Camera position and orientation tracking
//! - Player input processing for camera control
//! - Point-in-cell collision against the world
//!
//! The rest of the engine only consumes the camera's position and forward
//! vector, which feed the block-targeting raycast.

use camera::{Camera, CameraController};
use cgmath::Point3;
use web_time::Duration;

use super::{voxels::world::World, PlayerAction};

pub mod camera;

/// Movement speed in blocks per second
pub const CAMERA_SPEED: f32 = 4.0;
/// Keyboard pan speed in radians per second
pub const CAMERA_PAN_SPEED: f32 = 1.5;
/// Radians of rotation per pixel of mouse movement
pub const CAMERA_SENSITIVITY: f32 = 0.002;

/// The camera together with the controller that drives it.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Handles player input and camera movement
    pub camera_controller: CameraController,
}

impl CameraState {
    /// Wraps `camera` with a controller using the default speeds.
    pub fn new(camera: Camera) -> Self {
        CameraState {
            camera,
            camera_controller: CameraController::new(
                CAMERA_SPEED,
                CAMERA_PAN_SPEED,
                CAMERA_SENSITIVITY,
            ),
        }
    }

    /// Places a camera above the center of the world looking along negative Z.
    pub fn spawn(world: &World) -> Self {
        let max = world.dimensions().max_exclusive();
        let height = (0..max.y)
            .rev()
            .find(|y| world.is_solid(Point3::new(0, *y, 0)))
            .map_or(0, |y| y + 1);
        let position = Point3::new(0.5, height as f32 + 1.5, 0.5);
        Self::new(Camera::new(position, cgmath::Deg(-90.0), cgmath::Deg(0.0)))
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller input to the camera.
    ///
    /// # Returns
    /// `true` if the camera position or orientation changed.
    pub fn update(&mut self, dt: Duration, world: &World) -> bool {
        if !self.camera_controller.has_updates() {
            return false;
        }

        self.camera
            .get_controller_updates_and_reset_controller(&mut self.camera_controller, dt, world)
    }
}
