use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::NavigationMode;
use crate::cli::Cli;
use crate::core::clock::DEFAULT_UNITS_PER_SECOND;
use crate::input::InputSettings;
use crate::projection::Projection;
use crate::scene::{default_scene, SceneObject};
use crate::shading::{LightParams, ShadingMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Scene Viewer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub navigation: NavigationMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 3.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            navigation: NavigationMode::Anchored,
        }
    }
}

/// Viewer settings; every field falls back to the demo defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub input: InputSettings,
    /// Time units per second fed to every rate in `input`
    pub time_units_per_second: f32,
    pub projection: Projection,
    pub lights: LightParams,
    pub shading: ShadingMode,
    pub scene: Vec<SceneObject>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            input: InputSettings::default(),
            time_units_per_second: DEFAULT_UNITS_PER_SECOND,
            projection: Projection::default(),
            lights: LightParams::default(),
            shading: ShadingMode::default(),
            scene: default_scene(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid viewer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(width) = cli.width {
            config.window.width = width;
        }
        if let Some(height) = cli.height {
            config.window.height = height;
        }
        if cli.free_look {
            config.camera.navigation = NavigationMode::FreeLook;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize viewer config")
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero, got {}x{}",
            self.window.width,
            self.window.height
        );
        anyhow::ensure!(
            self.time_units_per_second > 0.0,
            "time_units_per_second must be positive"
        );
        anyhow::ensure!(
            self.projection.near > 0.0 && self.projection.far > self.projection.near,
            "projection needs 0 < near < far"
        );
        let camera = &self.camera;
        let front = match camera.navigation {
            NavigationMode::Anchored => camera.target - Vec3::Z,
            NavigationMode::FreeLook => camera.target - camera.position,
        };
        anyhow::ensure!(
            front.cross(camera.up) != Vec3::ZERO,
            "camera up must not be parallel to the initial look vector"
        );
        Ok(())
    }
}
