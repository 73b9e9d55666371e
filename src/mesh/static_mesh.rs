use glam::{Mat4, Quat, Vec3};

use super::{
    MeshId, PickableMesh, RayQueryable, RingAdjacency, Topology, VertexFlags,
    TRI_INDEX,
};
use crate::geometry::SymmetryPlane;

/// Bounding sphere of one face, used by the brute-force broad phase.
#[derive(Debug, Clone, Copy)]
struct FaceBounds {
    center: Vec3,
    radius: f32,
}

/// In-memory triangle/quad mesh with a brute-force broad phase.
///
/// Keeps positions, faces, derived normals and ring adjacency, its flag
/// arena, a similarity transform (translation, rotation, uniform scale) and
/// a symmetry plane. Broad-phase queries test per-face bounding spheres,
/// which over-approximates as the collaborator contract allows.
#[derive(Debug, Clone)]
pub struct StaticMesh {
    id: MeshId,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<[u32; 4]>,
    rings: RingAdjacency,
    flags: VertexFlags,
    bounds: Vec<FaceBounds>,
    translation: Vec3,
    rotation: Quat,
    scale: f32,
    symmetry: SymmetryPlane,
    visible: bool,
}

impl StaticMesh {
    /// Build a mesh from positions and faces. Triangles use [`TRI_INDEX`]
    /// as their fourth corner. Normals and rings are derived.
    pub fn new(id: MeshId, positions: Vec<Vec3>, faces: Vec<[u32; 4]>) -> Self {
        let mut mesh = Self {
            id,
            positions: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            rings: RingAdjacency::default(),
            flags: VertexFlags::default(),
            bounds: Vec::new(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            symmetry: SymmetryPlane::default(),
            visible: true,
        };
        mesh.set_topology(positions, faces);
        mesh
    }

    /// Replace the derived ring adjacency (e.g. with a nested layout).
    #[must_use]
    pub fn with_rings(mut self, rings: RingAdjacency) -> Self {
        self.rings = rings;
        self
    }

    /// Replace geometry and topology. Derived data is rebuilt and the flag
    /// arena grows to the new vertex count.
    pub fn set_topology(&mut self, positions: Vec<Vec3>, faces: Vec<[u32; 4]>) {
        self.positions = positions;
        self.faces = faces;
        self.rings =
            RingAdjacency::from_faces(self.positions.len(), &self.faces);
        self.flags.ensure_len(self.positions.len());
        self.update_geometry();
    }

    /// Move vertices without changing topology and refresh normals and
    /// bounds. Extra positions past the vertex count are ignored.
    pub fn set_positions(&mut self, positions: &[Vec3]) {
        for (dst, src) in self.positions.iter_mut().zip(positions) {
            *dst = *src;
        }
        self.update_geometry();
    }

    /// Set the model transform. The scale must be uniform.
    pub fn set_transform(&mut self, translation: Vec3, rotation: Quat, scale: f32) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// Set the mirror plane (mesh-local space).
    pub fn set_symmetry_plane(&mut self, plane: SymmetryPlane) {
        self.symmetry = plane;
    }

    /// Show or hide the mesh for multi-mesh casts.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The flag arena (read-only).
    pub fn flags(&self) -> &VertexFlags {
        &self.flags
    }

    fn corners(face: &[u32; 4]) -> &[u32] {
        if face[3] == TRI_INDEX {
            &face[..3]
        } else {
            &face[..]
        }
    }

    fn update_geometry(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        let mut bounds = Vec::with_capacity(self.faces.len());

        for face in &self.faces {
            let corners = Self::corners(face);
            let Some(points) = corners
                .iter()
                .map(|&c| self.positions.get(c as usize).copied())
                .collect::<Option<Vec<Vec3>>>()
            else {
                bounds.push(FaceBounds {
                    center: Vec3::ZERO,
                    radius: -1.0,
                });
                continue;
            };

            // Area-weighted: the cross product length is twice the area.
            // Quads use their diagonals.
            let face_normal = if points.len() == 4 {
                (points[2] - points[0]).cross(points[3] - points[1])
            } else {
                (points[1] - points[0]).cross(points[2] - points[0])
            };
            for &c in corners {
                normals[c as usize] += face_normal;
            }

            let center =
                points.iter().copied().sum::<Vec3>() / points.len() as f32;
            let radius = points
                .iter()
                .map(|p| p.distance(center))
                .fold(0.0f32, f32::max);
            bounds.push(FaceBounds { center, radius });
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
        self.bounds = bounds;
    }
}

impl RayQueryable for StaticMesh {
    fn query_ray(&self, origin: Vec3, dir: Vec3, out: &mut Vec<u32>) {
        let dir = dir.normalize_or_zero();
        for (i, b) in self.bounds.iter().enumerate() {
            if b.radius < 0.0 {
                continue;
            }
            let to_center = b.center - origin;
            let along = to_center.dot(dir);
            let closest2 = to_center.length_squared() - along * along;
            if closest2 <= b.radius * b.radius + f32::EPSILON {
                out.push(i as u32);
            }
        }
    }

    fn query_sphere(&self, center: Vec3, radius2: f32, out: &mut Vec<u32>) {
        let radius = radius2.max(0.0).sqrt();
        for (i, b) in self.bounds.iter().enumerate() {
            if b.radius < 0.0 {
                continue;
            }
            let reach = b.radius + radius;
            if b.center.distance_squared(center) <= reach * reach {
                out.push(i as u32);
            }
        }
    }
}

impl PickableMesh for StaticMesh {
    fn id(&self) -> MeshId {
        self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    fn faces(&self) -> &[[u32; 4]] {
        &self.faces
    }

    fn rings(&self) -> &RingAdjacency {
        &self.rings
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }

    fn symmetry_plane(&self) -> SymmetryPlane {
        self.symmetry
    }

    fn topology_and_flags(&mut self) -> (Topology<'_>, &mut VertexFlags) {
        (
            Topology {
                positions: &self.positions,
                faces: &self.faces,
                rings: &self.rings,
            },
            &mut self.flags,
        )
    }
}
