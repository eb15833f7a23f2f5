//! Pointer to pick-angle mapping
//!
//! Screen pixels → normalized device coordinates → ray from the camera → hit on the
//! lock's face plane (z = 0) → pick angle.

use glam::{Mat4, Vec2, Vec3};

use crate::clamp_pick_angle;
use crate::consts::*;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Zero or negative sizes are bumped to one pixel
    pub fn new(width: f32, height: f32) -> Self {
        if width < 1.0 || height < 1.0 || !width.is_finite() || !height.is_finite() {
            log::warn!("Invalid viewport {width}x{height}, clamping");
        }
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel position to NDC in `[-1, 1]`, y up
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let ndc = Vec2::new((x / self.width) * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0);
        ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

/// Perspective camera orbiting the lock, nudged by the pointer
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.01, 0.2),
            target: Vec3::ZERO,
            fov_y: CAMERA_FOV_DEG.to_radians(),
            aspect,
        }
    }

    /// Sway the camera toward the pointer, keeping it aimed at the lock
    pub fn follow(&mut self, ndc: Vec2) {
        let dir = Vec3::new(-ndc.x.sin() * CAMERA_SWAY, ndc.y.sin() * CAMERA_SWAY, 1.0);
        self.position = dir.normalize() * CAMERA_DISTANCE;
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, CAMERA_NEAR, CAMERA_FAR);
        proj * view
    }

    /// Ray (origin, direction) through an NDC point
    pub fn ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let dir = (far - self.position).normalize_or_zero();
        (self.position, dir)
    }
}

/// Where a ray crosses the z = 0 plane, if it does in front of the origin
pub fn intersect_lock_plane(origin: Vec3, dir: Vec3) -> Option<Vec3> {
    if dir.z.abs() < 1e-6 {
        return None;
    }
    let t = -origin.z / dir.z;
    if t < 0.0 {
        return None;
    }
    Some(origin + dir * t)
}

/// Pick angle for a point on the lock plane: straight up is 0, right is negative
pub fn pick_angle_for(point: Vec3) -> f32 {
    clamp_pick_angle(-point.x.atan2(point.y))
}

/// Tracks the pointer between samples
#[derive(Debug, Clone)]
pub struct PointerMapper {
    viewport: Viewport,
    pub camera: CameraRig,
    /// Latest NDC position
    pub ndc: Vec2,
    /// Summed (previous - latest) movement since the last take
    delta: Vec2,
    /// Latest hit on the lock plane
    pub intersection: Vec3,
}

impl PointerMapper {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            camera: CameraRig::new(viewport.aspect()),
            ndc: Vec2::ZERO,
            delta: Vec2::ZERO,
            intersection: Vec3::Y,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    /// Record a pointer sample in pixels. Movement adds up until the delta is taken.
    pub fn sample(&mut self, x: f32, y: f32) {
        let ndc = self.viewport.to_ndc(x, y);
        self.delta += self.ndc - ndc;
        self.ndc = ndc;

        let (origin, dir) = self.camera.ray(ndc);
        if let Some(hit) = intersect_lock_plane(origin, dir) {
            self.intersection = hit;
        }
    }

    /// Pointer left the interactive surface
    pub fn leave(&mut self) {
        self.delta = Vec2::ZERO;
    }

    /// Take the delta, leaving zero behind
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Pick angle the pointer is currently asking for
    pub fn target_angle(&self) -> f32 {
        pick_angle_for(self.intersection)
    }
}

impl Default for PointerMapper {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
