//! Mesh collaborator contract consumed by the picking engine.
//!
//! The engine never owns meshes or their spatial index. It talks to them
//! through [`RayQueryable`] (broad phase) and [`PickableMesh`] (buffers,
//! adjacency, transform, symmetry). [`StaticMesh`] is a small reference
//! implementation with a brute-force broad phase.

mod adjacency;
mod flags;
mod static_mesh;

pub use adjacency::RingAdjacency;
use glam::{Mat4, Vec3};
pub use flags::VertexFlags;
pub use static_mesh::StaticMesh;

use crate::geometry::SymmetryPlane;

/// Fourth face index marking a triangle (no fourth corner).
pub const TRI_INDEX: u32 = u32::MAX;

/// Stable identity of a mesh, used as a weak reference by pick results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Broad-phase spatial queries over a mesh's faces, in mesh-local space.
///
/// Results may over-approximate (extra candidates are filtered by the exact
/// tests) but must never miss a face that actually intersects.
pub trait RayQueryable {
    /// Append indices of faces possibly crossed by the ray to `out`.
    fn query_ray(&self, origin: Vec3, dir: Vec3, out: &mut Vec<u32>);

    /// Append indices of faces possibly touching the sphere of squared
    /// radius `radius2` around `center` to `out`.
    fn query_sphere(&self, center: Vec3, radius2: f32, out: &mut Vec<u32>);
}

/// Borrowed topology of a mesh, handed out together with its mutable
/// [`VertexFlags`] so flood fills can read rings while stamping flags.
#[derive(Clone, Copy)]
pub struct Topology<'a> {
    /// Vertex positions in mesh-local space.
    pub positions: &'a [Vec3],
    /// Face corners; the fourth index is [`TRI_INDEX`] for triangles.
    pub faces: &'a [[u32; 4]],
    /// Per-vertex ring neighbors.
    pub rings: &'a RingAdjacency,
}

/// A mesh the picking engine can cast against and select from.
pub trait PickableMesh: RayQueryable {
    /// Identity used by pick results to refer back to this mesh.
    fn id(&self) -> MeshId;

    /// Hidden meshes are skipped by multi-mesh casts.
    fn is_visible(&self) -> bool {
        true
    }

    /// Vertex positions in mesh-local space.
    fn positions(&self) -> &[Vec3];

    /// Per-vertex unit normals in mesh-local space.
    fn normals(&self) -> &[Vec3];

    /// Face corners; the fourth index is [`TRI_INDEX`] for triangles.
    fn faces(&self) -> &[[u32; 4]];

    /// Per-vertex ring neighbors.
    fn rings(&self) -> &RingAdjacency;

    /// Uniform scale baked into [`PickableMesh::matrix`].
    fn scale(&self) -> f32;

    /// Local-to-world model matrix.
    fn matrix(&self) -> Mat4;

    /// Mirror plane in mesh-local space.
    fn symmetry_plane(&self) -> SymmetryPlane;

    /// Topology plus the mutable per-vertex flag arena.
    fn topology_and_flags(&mut self) -> (Topology<'_>, &mut VertexFlags);

    /// Number of vertices.
    fn vertex_count(&self) -> usize {
        self.positions().len()
    }
}
