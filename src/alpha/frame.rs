use glam::{Mat4, Vec3};

/// Orientation of the stencil on the surface.
///
/// A look-at frame anchored at `origin`, looking along the surface normal,
/// with its up axis following the stroke direction projected onto the
/// tangent plane. `side` is half the side of the square footprint that
/// fits inside the brush circle (`radius * sqrt(1/2)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaFrame {
    origin: Vec3,
    side: f32,
    look_at: Mat4,
}

impl Default for AlphaFrame {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            side: 0.0,
            look_at: Mat4::IDENTITY,
        }
    }
}

impl AlphaFrame {
    /// Re-orient the frame for a stroke step at `intersection`.
    ///
    /// The travel direction is `intersection - origin`. When it has no
    /// length, or no component in the tangent plane, or the normal or
    /// radius is degenerate, nothing changes and `false` is returned.
    /// With `keep_origin` the anchor stays where it is; otherwise it moves
    /// to `intersection`.
    pub fn update(
        &mut self,
        intersection: Vec3,
        normal: Vec3,
        local_radius2: f32,
        keep_origin: bool,
    ) -> bool {
        let radius = local_radius2.max(0.0).sqrt();
        let Some(normal) = normal.try_normalize() else {
            return false;
        };
        if radius <= 0.0 || !radius.is_finite() {
            return false;
        }
        let Some(travel) = (intersection - self.origin).try_normalize() else {
            return false;
        };
        let Some(up) = (travel - normal * travel.dot(normal)).try_normalize()
        else {
            return false;
        };

        if !keep_origin {
            self.origin = intersection;
        }
        self.side = radius * std::f32::consts::FRAC_1_SQRT_2;
        self.look_at =
            Mat4::look_at_rh(self.origin, self.origin + normal * radius, up);
        true
    }

    /// Anchor point of the stamp.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Half side of the square footprint.
    pub fn side(&self) -> f32 {
        self.side
    }

    /// Mesh-local to frame transform.
    pub fn look_at(&self) -> Mat4 {
        self.look_at
    }

    /// Express a mesh-local point in the frame: `x` across the stroke, `y`
    /// along it, `z` along the negated normal.
    pub fn to_frame(&self, point: Vec3) -> Vec3 {
        self.look_at.transform_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn zero_travel_leaves_frame_untouched() {
        let mut frame = AlphaFrame::default();
        assert!(frame.update(Vec3::X, Vec3::Z, 4.0, false));
        let before = frame;
        assert!(!frame.update(Vec3::X, Vec3::Z, 9.0, false));
        assert_eq!(frame, before);
        assert!(frame.look_at().is_finite());
    }

    #[test]
    fn travel_along_normal_is_skipped() {
        let mut frame = AlphaFrame::default();
        assert!(!frame.update(Vec3::Z, Vec3::Z, 1.0, false));
        assert_eq!(frame, AlphaFrame::default());
    }

    #[test]
    fn zero_radius_is_skipped() {
        let mut frame = AlphaFrame::default();
        assert!(!frame.update(Vec3::X, Vec3::Z, 0.0, false));
    }

    #[test]
    fn frame_axes_follow_stroke_and_normal() {
        let mut frame = AlphaFrame::default();
        assert!(frame.update(Vec3::new(0.0, 2.0, 0.0), Vec3::Z, 4.0, false));
        assert_eq!(frame.origin(), Vec3::new(0.0, 2.0, 0.0));
        assert!((frame.side() - 2.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < EPSILON);

        // A point further along the stroke sits on +y of the frame
        let ahead = frame.to_frame(Vec3::new(0.0, 3.0, 0.0));
        assert!((ahead - Vec3::new(0.0, 1.0, 0.0)).length() < EPSILON);
        // The anchor maps to the frame origin
        assert!(frame.to_frame(frame.origin()).length() < EPSILON);
    }

    #[test]
    fn keep_origin_pins_the_anchor() {
        let mut frame = AlphaFrame::default();
        assert!(frame.update(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 1.0, false));
        assert!(frame.update(Vec3::new(1.0, 1.0, 0.0), Vec3::Z, 1.0, true));
        assert_eq!(frame.origin(), Vec3::new(0.0, 1.0, 0.0));
        // Up axis now points from the anchor toward +x
        let ahead = frame.to_frame(Vec3::new(1.0, 1.0, 0.0));
        assert!((ahead - Vec3::new(0.0, 1.0, 0.0)).length() < EPSILON);
    }
}
