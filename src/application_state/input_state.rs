//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides enums and structs for representing input events and the
//! per-tick state of input devices.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// A single input event as delivered by the windowing layer.
///
/// Events are queued by the input manager and drained once per tick in
/// arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A keyboard key changed state
    Key { key: KeyCode, pressed: bool },
    /// A mouse button changed state
    MouseButton { button: MouseButton, pressed: bool },
    /// Raw mouse movement since the previous motion event (x, y)
    MouseMotion { delta_x: f64, delta_y: f64 },
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Updates the input state based on the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
///
/// Besides the end-of-tick state of every tracked key and button, the
/// snapshot keeps the discrete presses and clicks seen during the tick in
/// the order they arrived, so that a press and release within one tick is
/// not lost.
#[derive(Debug, Default)]
pub struct ProcessedInputState {
    /// Current state of all tracked keyboard keys
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Tracked key presses in arrival order
    pub key_presses: Vec<KeyCode>,

    /// Mouse button presses in arrival order
    pub mouse_clicks: Vec<MouseButton>,

    /// Mouse movement delta accumulated during the tick (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the mouse movement delta since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }

    /// Whether `key` was pressed at least once during the tick
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.key_presses.contains(&key)
    }
}

/// Tracks the state of mouse inputs including buttons and movement.
///
/// Button state only serves to tell a fresh press from a repeated one; clicks
/// are reported through [`ProcessedInputState::mouse_clicks`].
#[derive(Debug, Default)]
pub struct MouseInput {
    /// Whether each mouse button is currently down
    pub mouse_buttons_down: HashMap<MouseButton, bool>,

    /// Mouse movement delta since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
        assert!(!RawInputState::NotPressed.is_active());
    }
}
