use glam::Vec3;

/// Moves points between world space and screen space.
///
/// Screen space is in pixels with the origin at the top-left corner and `y`
/// growing downward. The third component is normalized depth, `0.0` at the
/// near plane and `1.0` at the far plane.
pub trait Projectable {
    /// Project a world-space point to `(x, y, depth)` screen coordinates.
    fn project(&self, world: Vec3) -> Vec3;

    /// Map screen coordinates at normalized `depth` back to world space.
    fn unproject(&self, x: f32, y: f32, depth: f32) -> Vec3;
}
