use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::{Button, Controller};

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// Cursor positions received since the last frame
    cursor_samples: Vec<(f32, f32)>,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.push_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    pub fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed_keys.insert(button);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&button);
            }
        }
    }

    pub fn push_cursor(&mut self, x: f32, y: f32) {
        self.cursor_samples.push((x, y));
    }

    /// Releases are lost while unfocused, so forget everything held
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    /// Reset per-frame state (cursor samples)
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.cursor_samples.clear();
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyO => Some(Button::KeyO),
            KeyCode::KeyP => Some(Button::KeyP),
            KeyCode::KeyT => Some(Button::KeyT),
            KeyCode::KeyY => Some(Button::KeyY),
            KeyCode::KeyB => Some(Button::KeyB),
            KeyCode::KeyN => Some(Button::KeyN),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn cursor_samples(&self) -> &[(f32, f32)] {
        &self.cursor_samples
    }
}
