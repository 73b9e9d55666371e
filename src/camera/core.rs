use glam::{Mat4, Vec3};

use super::projection::Projectable;
use crate::options::{CameraOptions, ProjectionKind};

/// Look-at camera defined by eye position, target, projection parameters
/// and the pixel size of the viewport it renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Perspective or orthographic projection.
    pub projection: ProjectionKind,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

impl Camera {
    /// Create a camera looking from `eye` at `target` with the given
    /// options and viewport size.
    pub fn new(
        eye: Vec3,
        target: Vec3,
        options: &CameraOptions,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            projection: options.projection,
            width,
            height,
        }
    }

    /// Viewport aspect ratio (width / height), 1 for an empty viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// World-to-camera matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Camera-to-clip matrix with a [0,1] depth range.
    ///
    /// The orthographic volume matches the perspective frustum's extent at
    /// the target distance, so zooming (moving the eye) scales both alike.
    pub fn build_projection(&self) -> Mat4 {
        let fovy = self.fovy.to_radians();
        match self.projection {
            ProjectionKind::Perspective => Mat4::perspective_rh(
                fovy,
                self.aspect(),
                self.znear,
                self.zfar,
            ),
            ProjectionKind::Orthographic => {
                let half_h =
                    self.eye.distance(self.target) * (fovy * 0.5).tan();
                let half_w = half_h * self.aspect();
                Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
                )
            }
        }
    }

    /// Clip-to-pixel matrix: NDC `[-1, 1]` maps onto `[0, width]` and
    /// `[0, height]` (y up); depth passes through.
    pub fn build_viewport(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(0.5 * self.width, 0.5 * self.height, 1.0))
            * Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0))
    }

    /// Combined world-to-pixel matrix (y up, before the screen flip).
    pub fn build_world_to_screen(&self) -> Mat4 {
        self.build_viewport() * self.build_projection() * self.build_view()
    }
}

impl Projectable for Camera {
    fn project(&self, world: Vec3) -> Vec3 {
        let mut out = self.build_world_to_screen().project_point3(world);
        out.y = self.height - out.y;
        out
    }

    fn unproject(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        self.build_world_to_screen()
            .inverse()
            .project_point3(Vec3::new(x, self.height - y, depth))
    }
}
