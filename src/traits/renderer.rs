use std::fmt;

use glam::{Mat3, Mat4, Vec3};

use crate::shading::{PolygonMode, ShadingMode};

/// Value uploaded to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Mat3(Mat3),
    Vec3(Vec3),
    Float(f32),
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

/// Compiled and linked shader program
pub trait ShaderProgram {
    /// Make this the active program
    fn use_program(&mut self);

    /// Upload a uniform; unknown names are ignored by the backend
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Error reported by the graphics API's error queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsError {
    pub code: String,
    pub context: String,
}

impl GraphicsError {
    pub fn new(code: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.code, self.context)
    }
}

/// Graphics backend - owns programs, meshes and the draw surface
pub trait RenderBackend {
    /// Program for the given shading mode
    fn program(&mut self, mode: ShadingMode) -> &mut dyn ShaderProgram;

    fn set_polygon_mode(&mut self, mode: PolygonMode);

    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Clear color and depth buffers
    fn clear(&mut self);

    /// Draw a mesh with the program of the given shading mode
    fn draw(&mut self, mesh: &str, mode: ShadingMode);

    /// Swap/present the finished frame
    fn present(&mut self);

    /// Take every error queued since the last call
    fn drain_errors(&mut self) -> Vec<GraphicsError>;
}
