//! View-side state shared with the native frontend.
//!
//! These types avoid platform-specific APIs. The frontend turns them into
//! camera matrices each frame and feeds mouse input into the orbit.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::constants::{
    AUTO_ROTATE_RAD_PER_SEC, CAMERA_DISTANCE, CAMERA_FOVY_DEG, CAMERA_MAX_DISTANCE,
    CAMERA_MAX_POLAR, CAMERA_MIN_DISTANCE, CAMERA_MIN_POLAR,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orbit around the origin with clamped zoom and polar angle.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Azimuth around +Y, 0 looks down -Z from +Z.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub distance: f32,
    pub auto_rotate_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            polar: FRAC_PI_2,
            distance: CAMERA_DISTANCE,
            auto_rotate_speed: AUTO_ROTATE_RAD_PER_SEC,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Drag by a pixel delta; a full viewport height is one full turn.
    pub fn orbit(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.azimuth -= TAU * dx_px / h;
        self.polar = (self.polar - TAU * dy_px / h).clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR);
    }

    /// Positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        self.distance =
            (self.distance * 0.95_f32.powf(steps)).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance idle rotation by `dt_sec` when `auto_rotate` is on.
    pub fn update(&mut self, dt_sec: f32, auto_rotate: bool) {
        if auto_rotate {
            self.azimuth = (self.azimuth + self.auto_rotate_speed * dt_sec) % TAU;
        }
    }
}
