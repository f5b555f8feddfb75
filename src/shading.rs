use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::traits::ShaderProgram;

/// Which shader program draws the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    Solid,
    #[default]
    Directional,
    Point,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 3] = [ShadingMode::Solid, ShadingMode::Directional, ShadingMode::Point];

    /// Vertex and fragment shader sources, relative to the working directory
    pub fn shader_paths(&self) -> (&'static str, &'static str) {
        match self {
            Self::Solid => (
                "Resource/Shader/solid_vert.shader",
                "Resource/Shader/solid_frag.shader",
            ),
            Self::Directional => (
                "Resource/Shader/basic_vert_directional_light.shader",
                "Resource/Shader/basic_frag_directional_light.shader",
            ),
            Self::Point => (
                "Resource/Shader/basic_vert_point_light.shader",
                "Resource/Shader/basic_frag_point_light.shader",
            ),
        }
    }

    /// Background for this mode; `None` keeps whatever was set before
    pub fn clear_color(&self) -> Option<[f32; 4]> {
        match self {
            Self::Solid => None,
            Self::Directional => Some([0.7, 0.7, 0.7, 1.0]),
            Self::Point => Some([0.0, 0.0, 0.0, 1.0]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Wireframe,
}

/// Fixed light setup, uploaded whenever a program is (re)selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightParams {
    /// Direction towards the light
    pub direction: Vec3,
    pub color: Vec3,
    pub position: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            direction: Vec3::new(2.0, 2.0, 2.0),
            color: Vec3::ONE,
            position: Vec3::new(-2.0, 10.0, -1.0),
            constant: 1.0,
            linear: 0.22,
            quadratic: 0.20,
        }
    }
}

impl LightParams {
    pub fn upload(&self, program: &mut dyn ShaderProgram) {
        program.set_uniform("lightDir", self.direction.into());
        program.set_uniform("lightColor", self.color.into());
        program.set_uniform("lightPosition", self.position.into());
        program.set_uniform("constant", self.constant.into());
        program.set_uniform("linear_", self.linear.into());
        program.set_uniform("quadratic", self.quadratic.into());
    }
}

/// Per-frame camera uniforms
pub fn upload_camera(program: &mut dyn ShaderProgram, view: Mat4, projection: Mat4) {
    program.set_uniform("view", view.into());
    program.set_uniform("projection", projection.into());
}

/// Full uniform reset after a program switch
pub fn reset_uniforms(
    program: &mut dyn ShaderProgram,
    view: Mat4,
    projection: Mat4,
    lights: &LightParams,
) {
    program.use_program();
    upload_camera(program, view, projection);
    lights.upload(program);
}
