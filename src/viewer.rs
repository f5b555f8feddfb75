//! Per-frame pipeline: input, then matrices, then draw calls, then diagnostics.

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::frame::FrameInfo;
use crate::input::{FrameActions, InputMapper};
use crate::projection::Projection;
use crate::scene::SceneObject;
use crate::shading::{reset_uniforms, upload_camera, LightParams, PolygonMode, ShadingMode};
use crate::traits::{Controller, GraphicsError, RenderBackend, WindowContext, WindowDimensions};
use crate::transform::{SharedTransform, TransformSynchronizer};

/// Background used until a shading mode picks its own
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];

/// Called after every frame with the graphics errors drained from the backend
pub type DiagnosticHook = Box<dyn FnMut(&FrameInfo, &[GraphicsError])>;

/// Default diagnostic hook: log and carry on
pub fn log_graphics_errors(frame: &FrameInfo, errors: &[GraphicsError]) {
    for error in errors {
        log::warn!("graphics error after frame {}: {}", frame.number, error);
    }
}

/// Everything the frame pipeline mutates
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub camera: Camera,
    pub shared: SharedTransform,
    pub projection: Projection,
    pub shading: ShadingMode,
    pub polygon: PolygonMode,
    pub lights: LightParams,
    pub objects: Vec<SceneObject>,
}

pub struct Viewer {
    state: ViewerState,
    input: InputMapper,
    sync: TransformSynchronizer,
    frame_number: u64,
    started: bool,
    uniforms_stale: bool,
    diagnostics: Option<DiagnosticHook>,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        let dimensions = WindowDimensions::new(config.window.width, config.window.height);
        let camera = Camera::with_mode(
            config.camera.position,
            config.camera.target,
            config.camera.up,
            config.camera.navigation,
        );
        let projection = Projection::new(
            config.projection.fov_y_degrees,
            config.projection.near,
            config.projection.far,
            dimensions,
        );

        Self {
            state: ViewerState {
                camera,
                shared: SharedTransform::default(),
                projection,
                shading: config.shading,
                polygon: PolygonMode::Fill,
                lights: config.lights,
                objects: config.scene.clone(),
            },
            input: InputMapper::new(config.input, dimensions),
            sync: TransformSynchronizer::new(),
            frame_number: 0,
            started: false,
            uniforms_stale: true,
            diagnostics: None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Mutable access for scripted scenes; invalidates cached matrices
    pub fn state_mut(&mut self) -> &mut ViewerState {
        self.sync.invalidate();
        &mut self.state
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    pub fn synchronizer(&self) -> &TransformSynchronizer {
        &self.sync
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn set_diagnostic_hook(&mut self, hook: impl FnMut(&FrameInfo, &[GraphicsError]) + 'static) {
        self.diagnostics = Some(Box::new(hook));
    }

    /// One-time backend setup; `frame` calls it if the caller did not.
    pub fn start(&mut self, backend: &mut dyn RenderBackend) {
        let clear = self.state.shading.clear_color().unwrap_or(DEFAULT_CLEAR_COLOR);
        backend.set_clear_color(clear);
        backend.set_polygon_mode(self.state.polygon);
        self.uniforms_stale = true;
        self.started = true;
        log::info!(
            "viewer started: {} objects, {:?} shading",
            self.state.objects.len(),
            self.state.shading
        );
    }

    /// Cursor samples that arrived before the resize are applied first, so
    /// only motion after it meets the re-armed centering.
    pub fn resize(
        &mut self,
        dimensions: WindowDimensions,
        controller: &dyn Controller,
        backend: &mut dyn RenderBackend,
    ) {
        log::info!(
            "window resized to {}x{}",
            dimensions.width,
            dimensions.height
        );
        self.input.apply_pending(controller, &mut self.state.camera);
        self.state.projection.resize(dimensions);
        self.input.on_resize(dimensions);

        let program = backend.program(self.state.shading);
        program.use_program();
        program.set_uniform("projection", self.state.projection.matrix().into());
    }

    /// Run one frame. Input mutation finishes before matrices are rebuilt,
    /// and matrices are rebuilt before anything is drawn.
    pub fn frame(
        &mut self,
        elapsed: f32,
        controller: &dyn Controller,
        window: &mut dyn WindowContext,
        backend: &mut dyn RenderBackend,
    ) -> FrameInfo {
        if !self.started {
            self.start(backend);
        }

        let actions = self.input.process(
            controller,
            elapsed,
            &mut self.state.camera,
            &mut self.state.shared,
        );
        self.apply_actions(actions, window, backend);

        let state = &self.state;
        let view = state.camera.view_matrix();
        let projection = state.projection.matrix();
        let matrices = self.sync.sync(view, &state.shared, &state.objects);

        backend.clear();
        let program = backend.program(state.shading);
        if self.uniforms_stale {
            reset_uniforms(program, view, projection, &state.lights);
            self.uniforms_stale = false;
        } else {
            program.use_program();
            upload_camera(program, view, projection);
        }

        for (object, object_matrices) in state.objects.iter().zip(matrices) {
            let program = backend.program(state.shading);
            program.set_uniform("model", object_matrices.model.into());
            program.set_uniform("normalMatrix", object_matrices.normal.into());
            backend.draw(&object.mesh, state.shading);
            log::trace!("frame {}: drew {}", self.frame_number, object.name);
        }
        backend.present();

        let info = FrameInfo::new(self.frame_number, elapsed, state.objects.len());
        let errors = backend.drain_errors();
        if !errors.is_empty() {
            match self.diagnostics.as_mut() {
                Some(hook) => hook(&info, &errors),
                None => log_graphics_errors(&info, &errors),
            }
        }

        self.frame_number += 1;
        info
    }

    fn apply_actions(
        &mut self,
        actions: FrameActions,
        window: &mut dyn WindowContext,
        backend: &mut dyn RenderBackend,
    ) {
        if let Some(polygon) = actions.polygon {
            if polygon != self.state.polygon {
                log::info!("polygon mode: {:?}", polygon);
                self.state.polygon = polygon;
                backend.set_polygon_mode(polygon);
            }
        }

        if let Some(shading) = actions.shading {
            if shading != self.state.shading {
                let (vertex, fragment) = shading.shader_paths();
                log::info!("shading mode: {:?} ({}, {})", shading, vertex, fragment);
                self.state.shading = shading;
                if let Some(color) = shading.clear_color() {
                    backend.set_clear_color(color);
                }
                self.uniforms_stale = true;
            }
        }

        if actions.close {
            log::info!("close requested");
            window.request_close();
        }
    }
}
