//! # Camera Implementation
//!
//! This module contains the first-person camera:
//! - `Camera`: position and orientation, exposing the forward vector used for raycasts
//! - `CameraController`: accumulates player input and applies it to the camera
//!
//! Movement is subject to point-in-cell collision: a step that would put the camera
//! inside a solid block is rejected.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

use crate::engine_state::{voxels::world::World, PlayerAction};

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// A yaw of zero faces positive X; a yaw of -90 degrees faces negative Z.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_world::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.5, 2.5, 5.5), Deg(-90.0), Deg(0.0));
    /// assert!((camera.get_view_vec().z + 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// Gets the camera's normalized forward direction vector.
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Moves the camera by `offset` unless the destination is inside a solid block.
    ///
    /// # Returns
    /// `true` if the camera moved.
    pub fn try_move(&mut self, offset: Vector3<f32>, world: &World) -> bool {
        let destination = self.position + offset;
        if world.is_position_blocked(destination) {
            return false;
        }
        self.position = destination;
        true
    }

    /// Applies the input accumulated in `controller` and resets it.
    ///
    /// # Returns
    /// `true` if the position or orientation changed.
    pub fn get_controller_updates_and_reset_controller(
        &mut self,
        controller: &mut CameraController,
        dt: Duration,
        world: &World,
    ) -> bool {
        let dt = dt.as_secs_f32();
        let mut changed = false;

        // Move forward/backward and left/right in the horizontal plane
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);
        let offset = forward * (controller.amount_forward - controller.amount_backward) * dt
            + right * (controller.amount_right - controller.amount_left) * dt;
        if offset.magnitude2() > 0.0 {
            changed |= self.try_move(offset, world);
        }

        // Rotate
        let yaw_delta = controller.rotate_horizontal * controller.sensitivity
            + (controller.pan_right - controller.pan_left) * dt;
        let pitch_delta = -controller.rotate_vertical * controller.sensitivity;
        if yaw_delta != 0.0 || pitch_delta != 0.0 {
            self.yaw += Rad(yaw_delta);
            self.pitch += Rad(pitch_delta);
            self.clamp_pitch();
            changed = true;
        }

        controller.reset();
        changed
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

/// Handles camera movement and rotation based on player actions.
///
/// This struct tracks the current movement and look input, and applies it to the
/// camera when updated.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts, in blocks per second
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,

    // Keyboard pan, in radians per second
    pan_left: f32,
    pan_right: f32,

    // Mouse look deltas, in pixels
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    pan_speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in blocks per second
    /// * `pan_speed` - Keyboard pan speed in radians per second
    /// * `sensitivity` - Radians of rotation per pixel of mouse movement
    pub fn new(speed: f32, pan_speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            pan_left: 0.0,
            pan_right: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            pan_speed,
            sensitivity,
        }
    }

    /// Processes player actions and updates controller state accordingly.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        if actions.move_forward {
            self.amount_forward = self.speed;
        }
        if actions.move_backward {
            self.amount_backward = self.speed;
        }
        if actions.move_left {
            self.amount_left = self.speed;
        }
        if actions.move_right {
            self.amount_right = self.speed;
        }
        if actions.pan_left {
            self.pan_left = self.pan_speed;
        }
        if actions.pan_right {
            self.pan_right = self.pan_speed;
        }
        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal = delta_x as f32;
            self.rotate_vertical = delta_y as f32;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.pan_left > 0.0
            || self.pan_right > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    fn reset(&mut self) {
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
        self.pan_left = 0.0;
        self.pan_right = 0.0;
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(120.0));
        assert!(camera.pitch.0 < FRAC_PI_2);
        assert!(camera.get_view_vec().y > 0.99);
    }

    #[test]
    fn movement_into_solid_cell_is_rejected() {
        let mut world = World::new(8, 8, 8).unwrap();
        world.add_block(BlockType::DIRT, Point3::new(1, 1, 0));
        let mut camera = Camera::new(Point3::new(0.5, 1.5, 0.5), Deg(0.0), Deg(0.0));

        assert!(!camera.try_move(Vector3::new(1.0, 0.0, 0.0), &world));
        assert_eq!(camera.position, Point3::new(0.5, 1.5, 0.5));
        assert!(camera.try_move(Vector3::new(0.0, 0.0, 1.0), &world));
        assert_eq!(camera.position, Point3::new(0.5, 1.5, 1.5));
    }

    #[test]
    fn controller_moves_along_view_direction() {
        let world = World::new(8, 8, 8).unwrap();
        let mut camera = Camera::new(Point3::new(0.5, 1.5, 0.5), Deg(0.0), Deg(0.0));
        let mut controller = CameraController::new(2.0, 1.0, 0.01);
        controller.intake_actions(&PlayerAction {
            move_forward: true,
            ..PlayerAction::default()
        });

        assert!(controller.has_updates());
        assert!(camera.get_controller_updates_and_reset_controller(
            &mut controller,
            Duration::from_millis(500),
            &world
        ));
        assert!((camera.position.x - 1.5).abs() < 1e-5);
        assert!(!controller.has_updates());
    }
}
