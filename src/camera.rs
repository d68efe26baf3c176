use crate::math::{Matrix4, Point3, Vector3};

const FOV_MIN_DEG: f32 = 1.0;
const FOV_MAX_DEG: f32 = 90.0;
const PITCH_LIMIT: f32 = 1.55;

/// Free-flying perspective camera. Orientation is tracked as yaw around the
/// world up axis and pitch around the local right axis, both in radians.
pub struct Camera {
    pub position: Point3,
    yaw: f32,
    pitch: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Point3, aspect: f32) -> Self {
        Camera {
            position,
            // Facing down -Z.
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov_y: 60f32.to_radians(),
            aspect,
            near: 0.1,
            far: 10000.0,
        }
    }

    pub fn front(&self) -> Vector3 {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vector3 {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    pub fn up(&self) -> Vector3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn move_by(&mut self, offset: Vector3) {
        self.position = self.position + offset;
    }

    /// Applies a mouse-drag rotation. The pitch clamp keeps the view matrix
    /// away from the straight-up/straight-down singularity.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scroll-wheel zoom, clamped to [1, 90] degrees of vertical FOV.
    pub fn zoom(&mut self, scroll: f32, rate: f32) {
        self.fov_y = (self.fov_y - scroll * rate)
            .clamp(FOV_MIN_DEG.to_radians(), FOV_MAX_DEG.to_radians());
    }

    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(
            self.position,
            self.position + self.front(),
            Vector3::unit_y(),
        )
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}
