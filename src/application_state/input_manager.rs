//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Queueing input events as they arrive
//! - Keyboard and mouse state tracking across ticks
//! - Draining the queue into a per-tick `ProcessedInputState`

use std::collections::{HashMap, VecDeque};

use log::trace;
use winit::{event::MouseButton, keyboard::KeyCode};

use super::input_state::{InputEvent, MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 11] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyQ,
    KeyCode::KeyE,
    KeyCode::KeyT,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

const MOUSE_BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Manages the state of all input devices and the pending event queue.
///
/// Events pushed between ticks are held in arrival order and applied in one
/// pass by [`InputManager::get_and_reset_processed_input`].
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,

    pending_events: VecDeque<InputEvent>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with default state.
    ///
    /// Initializes all tracked keys and buttons to the released state with an
    /// empty event queue.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        let mouse_buttons_down: HashMap<MouseButton, bool> =
            MOUSE_BUTTONS.map(|button| (button, false)).into();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_buttons_down,
                mouse_delta: None,
            },
            pending_events: VecDeque::new(),
        }
    }

    /// Queues an input event for the next tick.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending_events.push_back(event);
    }

    /// Number of events waiting for the next tick.
    pub fn pending_len(&self) -> usize {
        self.pending_events.len()
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }
    }

    /// Drains the event queue, applying every event in arrival order.
    ///
    /// Returns the discrete key presses and mouse clicks seen while draining.
    fn drain_events(&mut self) -> (Vec<KeyCode>, Vec<MouseButton>) {
        let mut key_presses = Vec::new();
        let mut mouse_clicks = Vec::new();

        while let Some(event) = self.pending_events.pop_front() {
            trace!("Input event: {:?}", event);
            match event {
                InputEvent::Key { key, pressed } => {
                    // Untracked keys are ignored
                    if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
                        if pressed && !*key_state {
                            key_presses.push(key);
                        }
                        *key_state = pressed;
                    }
                }
                InputEvent::MouseButton { button, pressed } => {
                    if let Some(button_state) =
                        self.mouse_inputs.mouse_buttons_down.get_mut(&button)
                    {
                        if pressed && !*button_state {
                            mouse_clicks.push(button);
                        }
                        *button_state = pressed;
                    }
                }
                InputEvent::MouseMotion { delta_x, delta_y } => {
                    let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
                    self.mouse_inputs.mouse_delta = Some((x + delta_x, y + delta_y));
                }
            }
        }

        (key_presses, mouse_clicks)
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// This translates the raw boolean states into RawInputState enum values
    /// that represent the state transitions (pressed, held, released, not pressed).
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let (key_presses, mouse_clicks) = self.drain_events();

        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            key_presses,
            mouse_clicks,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns the processed input state and resets internal state.
    ///
    /// This should be called once per tick.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Rolls the current state into the previous state and clears the per-tick deltas.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }
}
