use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use scene_viewer::backend::HeadlessBackend;
use scene_viewer::config::ViewerConfig;
use scene_viewer::shading::{PolygonMode, ShadingMode};
use scene_viewer::traits::{
    Button, Controller, GraphicsError, RenderBackend, UniformValue, WindowContext, WindowDimensions,
};
use scene_viewer::transform::{compose, normal_matrix};
use scene_viewer::viewer::Viewer;

#[derive(Default)]
struct MockController {
    down: Vec<Button>,
    samples: Vec<(f32, f32)>,
}

impl MockController {
    fn holding(buttons: &[Button]) -> Self {
        Self {
            down: buttons.to_vec(),
            samples: vec![],
        }
    }
}

impl Controller for MockController {
    fn is_down(&self, button: Button) -> bool {
        self.down.contains(&button)
    }

    fn cursor_samples(&self) -> &[(f32, f32)] {
        &self.samples
    }
}

struct MockWindow {
    closing: bool,
}

impl WindowContext for MockWindow {
    fn dimensions(&self) -> WindowDimensions {
        WindowDimensions::new(1024, 768)
    }

    fn should_close(&self) -> bool {
        self.closing
    }

    fn request_close(&mut self) {
        self.closing = true;
    }
}

struct Harness {
    viewer: Viewer,
    backend: HeadlessBackend,
    window: MockWindow,
}

impl Harness {
    fn new() -> Self {
        Self {
            viewer: Viewer::new(&ViewerConfig::default()),
            backend: HeadlessBackend::new(),
            window: MockWindow { closing: false },
        }
    }

    fn frame(&mut self, controller: &MockController, elapsed: f32) {
        self.viewer
            .frame(elapsed, controller, &mut self.window, &mut self.backend);
    }

    fn uniform(&self, mode: ShadingMode, name: &str) -> Option<UniformValue> {
        self.backend.program_state(mode).and_then(|p| p.uniform(name))
    }
}

#[cfg(test)]
mod frame_tests {
    use super::*;

    #[test]
    fn test_first_frame_draws_every_object_with_fresh_matrices() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);

        let state = h.viewer.state();
        let view = state.camera.view_matrix();
        let draws = h.backend.draws();
        assert_eq!(draws.len(), 5);
        assert_eq!(h.backend.frames_presented(), 1);

        for (draw, object) in draws.iter().zip(&state.objects) {
            let model = compose(&object.transform, &state.shared);
            assert_eq!(draw.mesh, object.mesh);
            assert_eq!(draw.mode, ShadingMode::Directional);
            assert_eq!(draw.model, Some(UniformValue::Mat4(model)));
            assert_eq!(
                draw.normal_matrix,
                Some(UniformValue::Mat3(normal_matrix(view, model)))
            );
        }
    }

    #[test]
    fn test_startup_uploads_lights_and_projection() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);

        let mode = ShadingMode::Directional;
        assert_eq!(h.uniform(mode, "lightDir"), Some(UniformValue::Vec3(Vec3::new(2.0, 2.0, 2.0))));
        assert_eq!(h.uniform(mode, "lightColor"), Some(UniformValue::Vec3(Vec3::ONE)));
        assert_eq!(h.uniform(mode, "quadratic"), Some(UniformValue::Float(0.20)));
        assert_eq!(
            h.uniform(mode, "projection"),
            Some(UniformValue::Mat4(h.viewer.state().projection.matrix()))
        );
        assert_eq!(h.backend.clear_color(), [0.7, 0.7, 0.7, 1.0]);
        assert_eq!(h.backend.polygon_mode(), PolygonMode::Fill);
    }

    #[test]
    fn test_camera_move_is_visible_in_same_frame() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);
        let old_view = h.viewer.state().camera.view_matrix();

        h.frame(&MockController::holding(&[Button::KeyW]), 4.0);

        let view = h.viewer.state().camera.view_matrix();
        assert_ne!(view, old_view);
        assert_eq!(
            h.uniform(ShadingMode::Directional, "view"),
            Some(UniformValue::Mat4(view))
        );

        let teapot = h.backend.draws()[0].clone();
        let Some(UniformValue::Mat4(model)) = teapot.model else {
            panic!("teapot drawn without model matrix");
        };
        assert_eq!(
            teapot.normal_matrix,
            Some(UniformValue::Mat3(normal_matrix(view, model)))
        );
    }

    #[test]
    fn test_rotation_key_spins_objects_but_not_plane() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);
        let before: Vec<_> = h.backend.draws().to_vec();

        h.frame(&MockController::holding(&[Button::KeyE]), 3.0);
        let after = h.backend.draws();

        assert_eq!(h.viewer.state().shared.rotation_angle, 3.0);
        assert_ne!(before[1].model, after[1].model);
        assert_eq!(before[4].model, after[4].model);
        assert_eq!(
            after[4].model,
            Some(UniformValue::Mat4(Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0))))
        );
    }

    #[test]
    fn test_frame_numbers_advance() {
        let mut h = Harness::new();
        for _ in 0..3 {
            h.frame(&MockController::default(), 0.5);
        }
        assert_eq!(h.viewer.frame_number(), 3);
        assert_eq!(h.backend.frames_presented(), 3);
    }

    #[test]
    fn test_idle_frames_reuse_matrices() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);
        h.frame(&MockController::default(), 1.0);
        assert_eq!(h.viewer.synchronizer().recomputations(), 1);

        h.frame(&MockController::holding(&[Button::KeyO]), 1.0);
        assert_eq!(h.viewer.synchronizer().recomputations(), 2);
    }

    #[test]
    fn test_edited_objects_are_redrawn() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);

        let offset = Vec3::new(0.0, 5.0, 0.0);
        h.viewer.state_mut().objects[1].transform[0] =
            scene_viewer::transform::TransformOp::translate(offset);
        h.frame(&MockController::default(), 1.0);

        assert_eq!(
            h.backend.draws()[1].model,
            Some(UniformValue::Mat4(Mat4::from_translation(offset)))
        );
    }
}

#[cfg(test)]
mod mode_tests {
    use super::*;

    #[test]
    fn test_shading_switch_resets_uniforms_once() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);

        let point = MockController::holding(&[Button::KeyM]);
        h.frame(&point, 1.0);
        assert_eq!(h.viewer.state().shading, ShadingMode::Point);
        assert_eq!(h.backend.clear_color(), [0.0, 0.0, 0.0, 1.0]);
        assert!(h.backend.draws().iter().all(|d| d.mode == ShadingMode::Point));
        assert_eq!(
            h.uniform(ShadingMode::Point, "lightPosition"),
            Some(UniformValue::Vec3(Vec3::new(-2.0, 10.0, -1.0)))
        );
        assert_eq!(h.uniform(ShadingMode::Point, "linear_"), Some(UniformValue::Float(0.22)));

        let uploads_after_switch = h.backend.program_state(ShadingMode::Point).unwrap().uploads;
        h.frame(&point, 1.0);
        let uploads = h.backend.program_state(ShadingMode::Point).unwrap().uploads;
        // view + projection, then model + normalMatrix per object
        assert_eq!(uploads - uploads_after_switch, 2 + 2 * 5);
    }

    #[test]
    fn test_solid_mode_keeps_previous_clear_color() {
        let mut h = Harness::new();
        h.frame(&MockController::holding(&[Button::KeyM]), 1.0);
        h.frame(&MockController::holding(&[Button::KeyB]), 1.0);
        assert_eq!(h.viewer.state().shading, ShadingMode::Solid);
        assert_eq!(h.backend.clear_color(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_polygon_mode_toggles() {
        let mut h = Harness::new();
        h.frame(&MockController::holding(&[Button::KeyT]), 1.0);
        assert_eq!(h.backend.polygon_mode(), PolygonMode::Wireframe);

        h.frame(&MockController::default(), 1.0);
        assert_eq!(h.backend.polygon_mode(), PolygonMode::Wireframe);

        h.frame(&MockController::holding(&[Button::KeyY]), 1.0);
        assert_eq!(h.backend.polygon_mode(), PolygonMode::Fill);
    }

    #[test]
    fn test_escape_requests_close() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);
        assert!(!h.window.should_close());

        h.frame(&MockController::holding(&[Button::Escape]), 1.0);
        assert!(h.window.should_close());
    }
}

#[cfg(test)]
mod resize_tests {
    use super::*;

    #[test]
    fn test_cursor_warp_after_resize_does_not_rotate() {
        let mut h = Harness::new();
        let mut controller = MockController::default();
        controller.samples.push((100.0, 100.0));
        h.frame(&controller, 1.0);
        let before = *h.viewer.state().camera.state();

        // Motion, then the resize, then the OS warp, all within one frame
        controller.samples = vec![(101.0, 100.0)];
        h.viewer
            .resize(WindowDimensions::new(800, 600), &controller, &mut h.backend);
        controller.samples.push((400.0, 300.0));
        h.frame(&controller, 1.0);

        let after = h.viewer.state().camera.state();
        // Only the 1 px before the resize turns the camera
        assert!((after.yaw - (before.yaw + 0.1)).abs() < 1e-5);
        assert_eq!(after.pitch, before.pitch);
        assert!(!h.viewer.input().mouse().is_centered());
        assert_eq!(h.viewer.input().mouse().last(), glam::Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_updates_projection_uniform() {
        let mut h = Harness::new();
        h.frame(&MockController::default(), 1.0);

        h.viewer.resize(
            WindowDimensions::new(800, 600),
            &MockController::default(),
            &mut h.backend,
        );

        assert_eq!(h.viewer.state().projection.aspect(), 800.0 / 600.0);
        assert!(h.viewer.input().mouse().is_centered());
        assert_eq!(
            h.uniform(ShadingMode::Directional, "projection"),
            Some(UniformValue::Mat4(h.viewer.state().projection.matrix()))
        );
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use super::*;

    #[test]
    fn test_diagnostic_hook_receives_errors() {
        let mut h = Harness::new();
        let seen: Rc<RefCell<Vec<(u64, GraphicsError)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        h.viewer.set_diagnostic_hook(move |frame, errors| {
            sink.borrow_mut()
                .extend(errors.iter().map(|e| (frame.number, e.clone())));
        });

        h.frame(&MockController::default(), 1.0);
        assert!(seen.borrow().is_empty());

        h.backend
            .push_error(GraphicsError::new("OUT_OF_MEMORY", "texture upload"));
        h.frame(&MockController::default(), 1.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[0].1.code, "OUT_OF_MEMORY");
        assert!(h.backend.drain_errors().is_empty());
    }
}
