use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::SceneObject;

/// Rotation and scale shared by every object in the scene
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SharedTransform {
    /// Degrees
    pub rotation_angle: f32,
    /// Added to (1, 1, 1) by [`TransformOp::SharedScale`]
    pub scale_factor: f32,
}

/// One step of an object's model transform. Steps compose left to right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    Translate { offset: Vec3 },
    Rotate { axis: Vec3, degrees: f32 },
    /// Rotate by the shared rotation angle
    SharedRotation { axis: Vec3 },
    Scale { factors: Vec3 },
    /// Scale by `(1, 1, 1) + shared scale factor`
    SharedScale,
}

impl TransformOp {
    pub fn translate(offset: Vec3) -> Self {
        Self::Translate { offset }
    }

    /// Post-multiply `model` by this step
    pub fn apply(&self, model: Mat4, shared: &SharedTransform) -> Mat4 {
        match *self {
            Self::Translate { offset } => model * Mat4::from_translation(offset),
            Self::Rotate { axis, degrees } => model * rotation(axis, degrees),
            Self::SharedRotation { axis } => model * rotation(axis, shared.rotation_angle),
            Self::Scale { factors } => model * Mat4::from_scale(factors),
            Self::SharedScale => model * Mat4::from_scale(Vec3::ONE + shared.scale_factor),
        }
    }
}

fn rotation(axis: Vec3, degrees: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// Fold `ops` over the identity.
pub fn compose(ops: &[TransformOp], shared: &SharedTransform) -> Mat4 {
    ops.iter()
        .fold(Mat4::IDENTITY, |model, op| op.apply(model, shared))
}

/// Inverse-transpose of the upper 3x3 of `view * model`.
pub fn normal_matrix(view: Mat4, model: Mat4) -> Mat3 {
    Mat3::from_mat4(view * model).inverse().transpose()
}

/// Matrices for one object, valid for the view they were computed against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMatrices {
    pub model: Mat4,
    pub normal: Mat3,
}

/// Recomputes model and normal matrices for every object.
///
/// Output is cached against the inputs it was derived from; a call with the
/// same view, shared parameters and object count returns the cache.
#[derive(Debug, Default)]
pub struct TransformSynchronizer {
    matrices: Vec<ObjectMatrices>,
    inputs: Option<(Mat4, SharedTransform)>,
    recomputations: u64,
}

impl TransformSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(
        &mut self,
        view: Mat4,
        shared: &SharedTransform,
        objects: &[SceneObject],
    ) -> &[ObjectMatrices] {
        let fresh = self.inputs == Some((view, *shared)) && self.matrices.len() == objects.len();
        if !fresh {
            self.matrices.clear();
            self.matrices.extend(objects.iter().map(|object| {
                let model = compose(&object.transform, shared);
                ObjectMatrices {
                    model,
                    normal: normal_matrix(view, model),
                }
            }));
            self.inputs = Some((view, *shared));
            self.recomputations += 1;
        }
        &self.matrices
    }

    /// Drop the cache, e.g. after the object list was edited in place
    pub fn invalidate(&mut self) {
        self.inputs = None;
    }

    pub fn matrices(&self) -> &[ObjectMatrices] {
        &self.matrices
    }

    /// Number of times matrices were actually rebuilt
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
