use crate::math::Vector3;

/// Uniform background term applied to every fragment.
pub struct AmbientLight {
    pub color: Vector3,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        AmbientLight {
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 0.3,
        }
    }
}

/// Parallel light. The shader receives `-position` as its direction, so the
/// light always points from `position` toward the origin; the same position
/// anchors the shadow-pass view matrix.
pub struct DirectionalLight {
    pub position: Vector3,
    pub color: Vector3,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vector3 {
        -self.position
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        DirectionalLight {
            position: Vector3::new(1.0, 1.0, 1.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }
}

/// Cone light with quadratic distance attenuation.
pub struct SpotLight {
    pub position: Vector3,
    pub direction: Vector3,
    pub color: Vector3,
    pub intensity: f32,
    /// Half-angle of the cone, in radians.
    pub angle: f32,
    pub kc: f32,
    pub kl: f32,
    pub kq: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        SpotLight {
            position: Vector3::new(0.0, 0.0, -10.0),
            direction: Vector3::new(0.0, 0.0, -1.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            angle: std::f32::consts::FRAC_PI_3,
            kc: 1.0,
            kl: 0.0,
            kq: 0.5,
        }
    }
}
