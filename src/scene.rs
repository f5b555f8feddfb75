use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::transform::TransformOp;

/// A drawable object: a mesh reference plus its model transform pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    /// Mesh path handed to the render backend
    pub mesh: String,
    pub transform: Vec<TransformOp>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            transform: Vec::new(),
        }
    }

    pub fn with_op(mut self, op: TransformOp) -> Self {
        self.transform.push(op);
        self
    }

    /// Object placed at `offset` that spins with the shared angle about Y
    fn spinning(name: &str, mesh: &str, offset: Vec3) -> Self {
        Self::new(name, mesh)
            .with_op(TransformOp::translate(offset))
            .with_op(TransformOp::SharedRotation { axis: Vec3::Y })
    }
}

/// Teapot, cube, sphere and monkey around the origin over a ground plane
pub fn default_scene() -> Vec<SceneObject> {
    vec![
        SceneObject::spinning("teapot", "Resource/obj/teapot20segUT.obj", Vec3::ZERO)
            .with_op(TransformOp::SharedScale),
        SceneObject::spinning("cube", "Resource/obj/cube.obj", Vec3::new(3.0, 0.0, 0.0)),
        SceneObject::spinning("sphere", "Resource/obj/sphere.obj", Vec3::new(-3.0, 0.0, 2.0)),
        SceneObject::spinning("monkey", "Resource/obj/monkey.obj", Vec3::new(-3.0, 0.0, -2.0)),
        SceneObject::new("plane", "Resource/obj/plane3.obj")
            .with_op(TransformOp::translate(Vec3::new(0.0, -1.0, 0.0))),
    ]
}
