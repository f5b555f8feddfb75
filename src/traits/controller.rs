/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyO,
    KeyP,
    KeyT,
    KeyY,
    KeyB,
    KeyN,
    KeyM,
    Escape,
}

impl Button {
    pub const ALL: [Button; 14] = [
        Button::KeyW,
        Button::KeyA,
        Button::KeyS,
        Button::KeyD,
        Button::KeyQ,
        Button::KeyE,
        Button::KeyO,
        Button::KeyP,
        Button::KeyT,
        Button::KeyY,
        Button::KeyB,
        Button::KeyN,
        Button::KeyM,
        Button::Escape,
    ];
}

/// Controller - per-frame view of held buttons and cursor movement
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Cursor positions (window pixels) received since the last frame, oldest first
    fn cursor_samples(&self) -> &[(f32, f32)];
}
