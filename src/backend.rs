//! Render backend that records calls instead of talking to a GPU.

use std::collections::HashMap;

use crate::shading::{PolygonMode, ShadingMode};
use crate::traits::{GraphicsError, RenderBackend, ShaderProgram, UniformValue};

/// Program state as last uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedProgram {
    pub mode: ShadingMode,
    pub uses: usize,
    pub uniforms: HashMap<String, UniformValue>,
    pub uploads: usize,
}

impl RecordedProgram {
    fn new(mode: ShadingMode) -> Self {
        Self {
            mode,
            uses: 0,
            uniforms: HashMap::new(),
            uploads: 0,
        }
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).copied()
    }
}

impl ShaderProgram for RecordedProgram {
    fn use_program(&mut self) {
        self.uses += 1;
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uploads += 1;
        self.uniforms.insert(name.to_string(), value);
    }
}

/// A draw call together with the matrices bound when it was issued
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub mesh: String,
    pub mode: ShadingMode,
    pub model: Option<UniformValue>,
    pub normal_matrix: Option<UniformValue>,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    programs: HashMap<ShadingMode, RecordedProgram>,
    polygon_mode: PolygonMode,
    clear_color: [f32; 4],
    draws: Vec<DrawCall>,
    frames_presented: u64,
    pending_errors: Vec<GraphicsError>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_state(&self, mode: ShadingMode) -> Option<&RecordedProgram> {
        self.programs.get(&mode)
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Draw calls since the last clear
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Queue an error as if the graphics API had reported it
    pub fn push_error(&mut self, error: GraphicsError) {
        self.pending_errors.push(error);
    }
}

impl RenderBackend for HeadlessBackend {
    fn program(&mut self, mode: ShadingMode) -> &mut dyn ShaderProgram {
        self.programs.entry(mode).or_insert_with(|| {
            let (vertex, fragment) = mode.shader_paths();
            log::debug!("linking {:?} program from {} + {}", mode, vertex, fragment);
            RecordedProgram::new(mode)
        })
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.polygon_mode = mode;
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.draws.clear();
    }

    fn draw(&mut self, mesh: &str, mode: ShadingMode) {
        let Some(program) = self.programs.get(&mode).filter(|p| p.uses > 0) else {
            self.pending_errors.push(GraphicsError::new(
                "INVALID_OPERATION",
                format!("draw of {} with unbound {:?} program", mesh, mode),
            ));
            return;
        };

        self.draws.push(DrawCall {
            mesh: mesh.to_string(),
            mode,
            model: program.uniform("model"),
            normal_matrix: program.uniform("normalMatrix"),
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        log::trace!(
            "presented frame {} ({} draws)",
            self.frames_presented,
            self.draws.len()
        );
    }

    fn drain_errors(&mut self) -> Vec<GraphicsError> {
        std::mem::take(&mut self.pending_errors)
    }
}
