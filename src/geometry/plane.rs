use glam::Vec3;

/// A mirror plane given by a point on the plane and its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryPlane {
    /// Any point lying on the plane.
    pub origin: Vec3,
    /// Unit normal of the plane.
    pub normal: Vec3,
}

impl Default for SymmetryPlane {
    /// The local YZ plane, mirroring left and right.
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::X,
        }
    }
}

impl SymmetryPlane {
    /// Create a plane and normalize its normal. A zero normal falls back to
    /// the X axis.
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            normal: normal.try_normalize().unwrap_or(Vec3::X),
        }
    }

    /// Signed distance from point to plane (positive on the normal side).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.origin)
    }

    /// Reflect `point` across this plane in place.
    #[inline]
    pub fn mirror(&self, point: &mut Vec3) {
        mirror_point(point, self.origin, self.normal);
    }
}

/// Reflect `point` across the plane through `plane_origin` with unit normal
/// `plane_normal`, writing the result back into `point`.
#[inline]
pub fn mirror_point(point: &mut Vec3, plane_origin: Vec3, plane_normal: Vec3) {
    let dist = plane_normal.dot(*point - plane_origin);
    *point -= plane_normal * (2.0 * dist);
}
