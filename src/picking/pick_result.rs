use glam::Vec3;

use crate::mesh::MeshId;
use crate::options::BrushOptions;

/// State of the most recent pick, overwritten in place by every cast.
///
/// The radii are only ever written together so that
/// `world_radius2 == local_radius2 * scale^2` holds for the picked mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickResult {
    pub(super) mesh: Option<MeshId>,
    pub(super) face: Option<u32>,
    pub(super) intersection: Vec3,
    pub(super) normal: Vec3,
    pub(super) local_radius2: f32,
    pub(super) world_radius2: f32,
    pub(super) picked_vertices: Vec<u32>,
    pub(super) eye_direction: Vec3,
}

impl PickResult {
    /// The mesh under the cursor, if any.
    pub fn mesh(&self) -> Option<MeshId> {
        self.mesh
    }

    /// Index of the picked face, `None` when nothing was hit.
    pub fn face(&self) -> Option<u32> {
        self.face
    }

    /// Hit point in the picked mesh's local space.
    pub fn intersection(&self) -> Vec3 {
        self.intersection
    }

    /// Interpolated unit normal at the hit point (see
    /// [`Picking::compute_picked_normal`](super::Picking::compute_picked_normal)).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Squared brush radius in mesh-local space.
    pub fn local_radius2(&self) -> f32 {
        self.local_radius2
    }

    /// Squared brush radius in world space.
    pub fn world_radius2(&self) -> f32 {
        self.world_radius2
    }

    /// Brush radius in mesh-local space.
    pub fn local_radius(&self) -> f32 {
        self.local_radius2.sqrt()
    }

    /// Brush radius in world space.
    pub fn world_radius(&self) -> f32 {
        self.world_radius2.sqrt()
    }

    /// Vertices found by the last sphere or flood-fill selection.
    pub fn picked_vertices(&self) -> &[u32] {
        &self.picked_vertices
    }

    /// Unit direction of the ray used by the last hit test.
    pub fn eye_direction(&self) -> Vec3 {
        self.eye_direction
    }

    pub(super) fn set_radii(&mut self, local_radius2: f32, world_radius2: f32) {
        self.local_radius2 = local_radius2;
        self.world_radius2 = world_radius2;
    }

    pub(super) fn clear_hit(&mut self) {
        self.mesh = None;
        self.face = None;
        self.set_radii(0.0, 0.0);
    }
}

/// Screen-space brush size and stylus pressure for the current stroke step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushInput {
    /// Brush radius in pixels.
    pub screen_radius: f32,
    /// Stylus pressure in `[0, 1]`; 1 for a mouse.
    pub pressure: f32,
    /// Whether `pressure` scales the radius.
    pub pressure_radius: bool,
}

impl Default for BrushInput {
    fn default() -> Self {
        Self::from(&BrushOptions::default())
    }
}

impl From<&BrushOptions> for BrushInput {
    fn from(options: &BrushOptions) -> Self {
        Self {
            screen_radius: options.screen_radius,
            pressure: 1.0,
            pressure_radius: options.pressure_radius,
        }
    }
}

impl BrushInput {
    /// Radius multiplier contributed by pressure.
    pub fn pressure_factor(&self) -> f32 {
        if self.pressure_radius {
            self.pressure
        } else {
            1.0
        }
    }

    /// Effective screen radius in pixels.
    pub fn effective_radius(&self, ignore_pressure: bool) -> f32 {
        if ignore_pressure {
            self.screen_radius
        } else {
            self.screen_radius * self.pressure_factor()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_hit_zeroes_both_radii() {
        let mut result = PickResult {
            mesh: Some(MeshId(3)),
            face: Some(7),
            ..PickResult::default()
        };
        result.set_radii(2.0, 8.0);
        result.clear_hit();
        assert_eq!(result.mesh(), None);
        assert_eq!(result.face(), None);
        assert_eq!(result.local_radius2(), 0.0);
        assert_eq!(result.world_radius2(), 0.0);
    }

    #[test]
    fn pressure_only_scales_when_enabled() {
        let mut brush = BrushInput {
            screen_radius: 40.0,
            pressure: 0.25,
            pressure_radius: true,
        };
        assert_eq!(brush.effective_radius(false), 10.0);
        assert_eq!(brush.effective_radius(true), 40.0);
        brush.pressure_radius = false;
        assert_eq!(brush.effective_radius(false), 40.0);
    }
}
