//! Meshes and projections shared by the picking tests.

use glam::Vec3;

use crate::camera::Projectable;
use crate::mesh::{MeshId, StaticMesh, TRI_INDEX};

/// Screen pixels per world unit of [`ScreenProjection`].
pub(super) const PIXELS_PER_UNIT: f32 = 100.0;

/// Orthographic view straight down the -z axis.
///
/// Screen `x` follows world `x`, screen `y` follows world `-y`, depth `0`
/// sits at `z = 10` and depth `1` at `z = -90`.
pub(super) struct ScreenProjection;

impl ScreenProjection {
    pub(super) fn to_screen(x: f32, y: f32) -> (f32, f32) {
        (x * PIXELS_PER_UNIT, -y * PIXELS_PER_UNIT)
    }
}

impl Projectable for ScreenProjection {
    fn project(&self, world: Vec3) -> Vec3 {
        Vec3::new(
            world.x * PIXELS_PER_UNIT,
            -world.y * PIXELS_PER_UNIT,
            (10.0 - world.z) / 100.0,
        )
    }

    fn unproject(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        Vec3::new(
            x / PIXELS_PER_UNIT,
            -y / PIXELS_PER_UNIT,
            10.0 - 100.0 * depth,
        )
    }
}

/// One triangle around the origin in the plane `z`.
pub(super) fn single_triangle(id: MeshId, z: f32) -> StaticMesh {
    StaticMesh::new(
        id,
        vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ],
        vec![[0, 1, 2, TRI_INDEX]],
    )
}

/// `n` x `n` quads covering `[-0.5, 0.5]^2` at `z = 0`, facing +z.
pub(super) fn unit_grid(id: MeshId, n: u32) -> StaticMesh {
    let (positions, faces) = grid_buffers(n, 0.0, 0);
    StaticMesh::new(id, positions, faces)
}

/// Two disconnected 4x4 grids, the top one `gap` above the bottom one.
pub(super) fn stacked_sheets(id: MeshId, gap: f32) -> StaticMesh {
    let (mut positions, mut faces) = grid_buffers(4, 0.0, 0);
    let (top_positions, top_faces) =
        grid_buffers(4, gap, positions.len() as u32);
    positions.extend(top_positions);
    faces.extend(top_faces);
    StaticMesh::new(id, positions, faces)
}

fn grid_buffers(n: u32, z: f32, base: u32) -> (Vec<Vec3>, Vec<[u32; 4]>) {
    let step = 1.0 / n as f32;
    let positions = (0..=n)
        .flat_map(|j| {
            (0..=n).map(move |i| {
                Vec3::new(i as f32 * step - 0.5, j as f32 * step - 0.5, z)
            })
        })
        .collect();
    let row = n + 1;
    let faces = (0..n)
        .flat_map(|j| {
            (0..n).map(move |i| {
                let v = base + j * row + i;
                [v, v + 1, v + 1 + row, v + row]
            })
        })
        .collect();
    (positions, faces)
}
