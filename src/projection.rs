use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::traits::WindowDimensions;

/// Perspective projection parameters; the aspect ratio tracks the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    #[serde(skip)]
    aspect: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 40.0,
            aspect: 1024.0 / 768.0,
        }
    }
}

impl Projection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32, dimensions: WindowDimensions) -> Self {
        let mut projection = Self {
            fov_y_degrees,
            near,
            far,
            aspect: 1.0,
        };
        projection.resize(dimensions);
        projection
    }

    /// Recompute the aspect ratio. A zero-height (minimised) window keeps the last one.
    pub fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.width > 0 && dimensions.height > 0 {
            self.aspect = dimensions.width as f32 / dimensions.height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// OpenGL-style clip space (depth in [-1, 1])
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_follows_dimensions() {
        let mut projection = Projection::new(45.0, 0.1, 40.0, WindowDimensions::new(1024, 768));
        assert_eq!(projection.aspect(), 1024.0 / 768.0);

        projection.resize(WindowDimensions::new(800, 600));
        assert_eq!(projection.aspect(), 800.0 / 600.0);
    }

    #[test]
    fn minimised_window_keeps_aspect() {
        let mut projection = Projection::new(45.0, 0.1, 40.0, WindowDimensions::new(1280, 720));
        projection.resize(WindowDimensions::new(1280, 0));
        assert_eq!(projection.aspect(), 1280.0 / 720.0);
        assert!(projection.matrix().is_finite());
    }
}
