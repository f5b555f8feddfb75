//! Maps held keys and cursor motion onto the camera and shared scene parameters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Direction};
use crate::shading::{PolygonMode, ShadingMode};
use crate::traits::{Button, Controller, WindowDimensions};
use crate::transform::SharedTransform;

/// Rates, all per viewer time unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// World units moved per time unit while a movement key is held
    pub camera_speed: f32,
    /// Degrees added to the shared rotation angle per time unit (Q/E)
    pub rotation_speed: f32,
    /// Added to the shared scale factor per time unit (O/P)
    pub scale_speed: f32,
    /// Degrees of yaw/pitch per cursor pixel, per time unit
    pub mouse_sensitivity: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            camera_speed: 0.1,
            rotation_speed: 1.0,
            scale_speed: 0.01,
            mouse_sensitivity: 0.1,
        }
    }
}

const MOVEMENT_KEYS: [(Button, Direction); 4] = [
    (Button::KeyW, Direction::Forward),
    (Button::KeyS, Direction::Backward),
    (Button::KeyA, Direction::Left),
    (Button::KeyD, Direction::Right),
];

/// Cursor tracking between samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseLook {
    last: Vec2,
    centered: bool,
}

impl MouseLook {
    pub fn new(center: (f32, f32)) -> Self {
        Self {
            last: Vec2::from(center),
            centered: true,
        }
    }

    /// Re-arm after the OS moved the cursor, so the next sample does not
    /// register as motion.
    pub fn recenter(&mut self, center: (f32, f32)) {
        self.last = Vec2::from(center);
        self.centered = true;
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    pub fn last(&self) -> Vec2 {
        self.last
    }

    /// Offset since the previous sample with y flipped so that moving the
    /// cursor up is positive. `None` when the sample only re-anchors.
    pub fn offset(&mut self, position: Vec2) -> Option<Vec2> {
        if self.centered {
            self.last = position;
            self.centered = false;
            return None;
        }

        let offset = Vec2::new(position.x - self.last.x, self.last.y - position.y);
        self.last = position;
        Some(offset)
    }
}

/// Effects of a frame's input outside of camera and shared transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameActions {
    pub shading: Option<ShadingMode>,
    pub polygon: Option<PolygonMode>,
    pub close: bool,
}

/// Turns one frame of input into camera and scene mutations
#[derive(Debug, Clone)]
pub struct InputMapper {
    settings: InputSettings,
    mouse: MouseLook,
    sensitivity: f32,
    /// Cursor samples of the current batch already fed to the camera
    applied: usize,
}

impl InputMapper {
    pub fn new(settings: InputSettings, dimensions: WindowDimensions) -> Self {
        Self {
            settings,
            mouse: MouseLook::new(dimensions.center()),
            sensitivity: 0.0,
            applied: 0,
        }
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn mouse(&self) -> &MouseLook {
        &self.mouse
    }

    /// Mouse scale for the current frame
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Apply everything the controller collected since the last frame.
    pub fn process(
        &mut self,
        controller: &dyn Controller,
        elapsed: f32,
        camera: &mut Camera,
        shared: &mut SharedTransform,
    ) -> FrameActions {
        self.sensitivity = self.settings.mouse_sensitivity * elapsed;
        self.apply_pending(controller, camera);
        // The controller starts a fresh batch after every frame
        self.applied = 0;

        self.apply_keys(controller, elapsed, camera, shared)
    }

    /// Feed the cursor samples not yet applied from the controller's
    /// current batch, at the previous frame's sensitivity.
    pub fn apply_pending(&mut self, controller: &dyn Controller, camera: &mut Camera) {
        let samples = controller.cursor_samples();
        for &(x, y) in samples.iter().skip(self.applied) {
            self.apply_cursor(Vec2::new(x, y), camera);
        }
        self.applied = self.applied.max(samples.len());
    }

    /// Held-key effects. Opposing keys both apply; diagonal movement is not normalized.
    pub fn apply_keys(
        &self,
        controller: &dyn Controller,
        elapsed: f32,
        camera: &mut Camera,
        shared: &mut SharedTransform,
    ) -> FrameActions {
        let speed = self.settings.camera_speed * elapsed;
        for (button, direction) in MOVEMENT_KEYS {
            if controller.is_down(button) {
                camera.move_in(direction, speed);
            }
        }

        if controller.is_down(Button::KeyQ) {
            shared.rotation_angle -= self.settings.rotation_speed * elapsed;
        }
        if controller.is_down(Button::KeyE) {
            shared.rotation_angle += self.settings.rotation_speed * elapsed;
        }
        if controller.is_down(Button::KeyO) {
            shared.scale_factor += self.settings.scale_speed * elapsed;
        }
        if controller.is_down(Button::KeyP) {
            shared.scale_factor -= self.settings.scale_speed * elapsed;
        }

        let mut actions = FrameActions::default();

        // Later bindings win when several are held.
        if controller.is_down(Button::KeyT) {
            actions.polygon = Some(PolygonMode::Wireframe);
        }
        if controller.is_down(Button::KeyY) {
            actions.polygon = Some(PolygonMode::Fill);
        }

        let shading_keys = [
            (Button::KeyB, ShadingMode::Solid),
            (Button::KeyN, ShadingMode::Directional),
            (Button::KeyM, ShadingMode::Point),
        ];
        for (button, mode) in shading_keys {
            if controller.is_down(button) {
                actions.shading = Some(mode);
            }
        }

        actions.close = controller.is_down(Button::Escape);
        actions
    }

    /// Feed one cursor position. Returns whether the camera was rotated.
    pub fn apply_cursor(&mut self, position: Vec2, camera: &mut Camera) -> bool {
        let Some(offset) = self.mouse.offset(position) else {
            return false;
        };

        let offset = offset * self.sensitivity;
        let state = camera.state();
        let (yaw, pitch) = (state.yaw + offset.x, state.pitch + offset.y);
        camera.rotate(pitch, yaw);
        true
    }

    /// The projection is owned elsewhere; this only re-arms cursor centering.
    pub fn on_resize(&mut self, dimensions: WindowDimensions) {
        self.mouse.recenter(dimensions.center());
        log::debug!(
            "mouse centering re-armed at {:?} after resize",
            dimensions.center()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_after_centering_is_absorbed() {
        let mut mouse = MouseLook::new((512.0, 384.0));
        assert!(mouse.is_centered());
        assert_eq!(mouse.offset(Vec2::new(900.0, 10.0)), None);
        assert!(!mouse.is_centered());
        assert_eq!(mouse.last(), Vec2::new(900.0, 10.0));
    }

    #[test]
    fn vertical_offset_is_inverted() {
        let mut mouse = MouseLook::new((0.0, 0.0));
        mouse.offset(Vec2::new(100.0, 100.0));
        assert_eq!(mouse.offset(Vec2::new(110.0, 90.0)), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn recenter_rearms() {
        let mut mouse = MouseLook::new((0.0, 0.0));
        mouse.offset(Vec2::new(5.0, 5.0));
        mouse.recenter((400.0, 300.0));
        assert!(mouse.is_centered());
        assert_eq!(mouse.last(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn default_settings_match_demo_rates() {
        let settings = InputSettings::default();
        assert_eq!(settings.camera_speed, 0.1);
        assert_eq!(settings.scale_speed, 0.01);
        assert_eq!(settings.mouse_sensitivity, 0.1);
    }
}
