use crate::input::{Input, MoveAction};
use glam::{Mat4, Vec2, Vec3, Vec4};
use winit::dpi::PhysicalSize;

const DEFAULT_UP: Vec3 = Vec3::Y;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// First-person perspective camera. Orientation is yaw/pitch, fed by the
/// pointer-lock look deltas.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, fov_y_radians: f32, near: f32, far: f32) -> Self {
        Self { position, yaw: 0.0, pitch: 0.0, up: DEFAULT_UP, fov_y_radians, near, far }
    }

    /// Looking down -Z at yaw 0, matching the scene's authored layout.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw += delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_radians, aspect.max(0.0001), self.near, self.far)
    }

    /// World-space ray from the camera through a normalized-device-coordinate
    /// point, for hit testing.
    pub fn screen_ray(&self, ndc: Vec2, viewport: PhysicalSize<u32>) -> Option<(Vec3, Vec3)> {
        if viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        let aspect = viewport.width as f32 / viewport.height as f32;
        let clip = Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let inv_view_proj = (self.projection_matrix(aspect) * self.view_matrix()).inverse();
        let world = inv_view_proj * clip;
        if world.w.abs() < f32::EPSILON {
            return None;
        }
        let toward = (world.truncate() / world.w) - self.position;
        Some((self.position, toward.normalize()))
    }
}

/// Floating first-person locomotion: instantaneous per-tick velocity, no
/// acceleration or inertia, diagonals are the plain vector sum.
#[derive(Debug, Clone)]
pub struct FloatController {
    pub speed: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl FloatController {
    pub fn new(speed: f32, y_min: f32, y_max: f32) -> Self {
        Self { speed, y_min, y_max }
    }

    pub fn integrate(&self, camera: &mut Camera, input: &Input) {
        let forward = camera.forward();
        let right = camera.right();
        if input.held(MoveAction::Forward) {
            camera.position += forward * self.speed;
        }
        if input.held(MoveAction::Back) {
            camera.position -= forward * self.speed;
        }
        if input.held(MoveAction::Left) {
            camera.position -= right * self.speed;
        }
        if input.held(MoveAction::Right) {
            camera.position += right * self.speed;
        }
        if input.held(MoveAction::Up) {
            camera.position.y += self.speed;
        }
        if input.held(MoveAction::Down) {
            camera.position.y -= self.speed;
        }
        camera.position.y = camera.position.y.clamp(self.y_min, self.y_max);
    }
}
