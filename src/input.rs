use std::collections::HashSet;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyboardInput, MouseButton, TouchPhase, VirtualKeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    TogglePause,
}

/// Folds raw window events into the discrete actions and the pointer state
/// the simulation consumes once per frame. Mouse and touch share one
/// pointer; an active touch wins over the mouse.
pub struct InputHandler {
    pressed_keys: HashSet<VirtualKeyCode>,
    cursor_position: Option<PhysicalPosition<f64>>,
    mouse_down: bool,
    active_touch: Option<u64>,
    touch_position: Option<PhysicalPosition<f64>>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            cursor_position: None,
            mouse_down: false,
            active_touch: None,
            touch_position: None,
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> InputAction {
        if let Some(key_code) = input.virtual_keycode {
            self.handle_key(input.state, key_code)
        } else {
            InputAction::None
        }
    }

    fn handle_key(&mut self, state: ElementState, key_code: VirtualKeyCode) -> InputAction {
        match state {
            ElementState::Pressed => {
                // Key repeat delivers Pressed again; only the first edge acts.
                if !self.pressed_keys.insert(key_code) {
                    return InputAction::None;
                }
                match key_code {
                    VirtualKeyCode::Space => InputAction::TogglePause,
                    _ => InputAction::None,
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                InputAction::None
            }
        }
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_position = Some(position);
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        if button == MouseButton::Left {
            self.mouse_down = state == ElementState::Pressed;
        }
    }

    /// Tracks the first active touch; further fingers are ignored until it
    /// ends.
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, location: PhysicalPosition<f64>) {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                    self.touch_position = Some(location);
                }
            }
            TouchPhase::Moved => {
                if self.active_touch == Some(id) {
                    self.touch_position = Some(location);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                    self.touch_position = None;
                }
            }
        }
    }

    /// Position of the pressed pointer, or `None` while nothing is held
    /// down.
    pub fn pointer_position(&self) -> Option<PhysicalPosition<f64>> {
        if self.active_touch.is_some() {
            self.touch_position
        } else if self.mouse_down {
            self.cursor_position
        } else {
            None
        }
    }
}
