use glam::Vec3;

/// Determinant threshold below which a triangle is treated as parallel to
/// the ray (or degenerate).
pub const TRIANGLE_EPSILON: f32 = 1e-10;

/// Möller–Trumbore ray/triangle intersection.
///
/// Returns the distance along `dir` from `origin` to the hit point, or
/// `None` when the ray misses, runs parallel to the triangle, or the hit
/// lies behind the origin. `dir` is expected to be normalized for the
/// distance to be metric. Both windings hit; zero-area triangles never do.
#[inline]
pub fn intersect_ray_triangle(
    origin: Vec3,
    dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < TRIANGLE_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn unit_tri(z: f32) -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        )
    }

    #[test]
    fn straight_down_hits_at_ten() {
        let (a, b, c) = unit_tri(0.0);
        let t = intersect_ray_triangle(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            a,
            b,
            c,
        )
        .unwrap();
        assert!((t - 10.0).abs() < EPSILON, "Expected 10.0, got {t}");
    }

    #[test]
    fn reversed_winding_still_hits() {
        let (a, b, c) = unit_tri(5.0);
        let t = intersect_ray_triangle(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            a,
            c,
            b,
        )
        .unwrap();
        assert!((t - 5.0).abs() < EPSILON);
    }

    #[test]
    fn hit_behind_origin_is_rejected() {
        let (a, b, c) = unit_tri(0.0);
        let hit =
            intersect_ray_triangle(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, a, b, c);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_outside_triangle_misses() {
        let (a, b, c) = unit_tri(0.0);
        let hit = intersect_ray_triangle(
            Vec3::new(3.0, 0.0, 10.0),
            Vec3::NEG_Z,
            a,
            b,
            c,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let (a, b, c) = unit_tri(0.0);
        let hit = intersect_ray_triangle(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::X,
            a,
            b,
            c,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn zero_area_triangle_misses() {
        let p = Vec3::new(0.0, 0.0, 0.0);
        let hit = intersect_ray_triangle(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::NEG_Z,
            p,
            p,
            Vec3::X,
        );
        assert!(hit.is_none());
    }
}
