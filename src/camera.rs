use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Vertical look limit in degrees; keeps the view from flipping over the up vector.
pub const PITCH_LIMIT: f32 = 89.0;

/// Movement direction, decoupled from any key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// How rotation feeds back into movement and the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// `front`/`right` stay at their construction values. `rotate` overwrites
    /// `target` with the unit look direction, which look-at then treats as a
    /// world-space point.
    #[default]
    Anchored,
    /// `target` is always a look direction relative to `position`, and
    /// `front`/`right` follow it on every rotation.
    FreeLook,
}

/// Raw camera state. Only [`Camera`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub front: Vec3,
    pub right: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees, always within `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub pitch: f32,
}

/// First-person camera controller
#[derive(Debug, Clone)]
pub struct Camera {
    state: CameraState,
    mode: NavigationMode,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::with_mode(position, target, up, NavigationMode::Anchored)
    }

    pub fn with_mode(position: Vec3, target: Vec3, up: Vec3, mode: NavigationMode) -> Self {
        let state = match mode {
            NavigationMode::Anchored => {
                let front = Vec3::new(target.x, target.y, target.z - 1.0);
                CameraState {
                    position,
                    target,
                    up,
                    front,
                    right: front.cross(up).normalize(),
                    yaw: 0.0,
                    pitch: 0.0,
                }
            }
            NavigationMode::FreeLook => {
                let direction = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
                let pitch = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
                CameraState {
                    position,
                    target: direction,
                    up,
                    front: direction,
                    right: direction.cross(up).normalize(),
                    yaw: direction.z.atan2(direction.x).to_degrees(),
                    pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
                }
            }
        };

        Self { state, mode }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Translate along `front`/`right`. No clamping or collision.
    pub fn move_in(&mut self, direction: Direction, speed: f32) {
        let state = &mut self.state;
        match direction {
            Direction::Forward => state.position += speed * state.front,
            Direction::Backward => state.position -= speed * state.front,
            Direction::Right => state.position += speed * state.right,
            Direction::Left => state.position -= speed * state.right,
        }
    }

    /// Point the camera at the given angles (degrees). Pitch is clamped.
    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let direction = look_direction(pitch, yaw);

        let state = &mut self.state;
        state.pitch = pitch;
        state.yaw = yaw;
        state.target = direction;

        if self.mode == NavigationMode::FreeLook {
            state.front = direction;
            state.right = direction.cross(state.up).normalize();
        }
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        let state = &self.state;
        let eye_target = match self.mode {
            NavigationMode::Anchored => state.target,
            NavigationMode::FreeLook => state.position + state.target,
        };
        Mat4::look_at_rh(state.position, eye_target, state.up)
    }
}

/// Unit vector for the given spherical angles in degrees.
pub fn look_direction(pitch: f32, yaw: f32) -> Vec3 {
    let (pitch, yaw) = (pitch.to_radians(), yaw.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}
