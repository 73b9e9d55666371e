//! Ray casting, brush radius and surface interpolation.
//!
//! Casting works in mesh-local space: the two cursor probe points are
//! unprojected once, moved into each mesh's frame by its inverse model
//! matrix, optionally mirrored across the mesh's symmetry plane, and tested
//! against the broad-phase candidates with the triangle kernel. Distances of
//! hits on different meshes are made comparable by the mesh scale.

use std::sync::Arc;

use glam::Vec3;

use super::pick_result::{BrushInput, PickResult};
use crate::alpha::{AlphaFrame, AlphaRegistry, AlphaStencil};
use crate::camera::Projectable;
use crate::geometry::intersect_ray_triangle;
use crate::mesh::{MeshId, PickableMesh, TRI_INDEX};
use crate::options::Options;

/// Normalized depth of the near cursor probe.
pub(super) const NEAR_PROBE_DEPTH: f32 = 0.0;
/// Normalized depth of the far cursor probe.
pub(super) const FAR_PROBE_DEPTH: f32 = 0.1;

/// Closest hit of one ray against one mesh, in that mesh's local space.
#[derive(Debug, Clone, Copy)]
struct LocalHit {
    face: u32,
    point: Vec3,
    distance: f32,
}

/// Picking engine for one brush (a symmetric twin uses its own instance).
///
/// Owns the single [`PickResult`], the brush input, the active stencil with
/// its surface frame, and scratch buffers reused across calls. Meshes and
/// the camera are passed in per call; the hit mesh is remembered by
/// [`MeshId`] only.
#[derive(Debug, Default)]
pub struct Picking {
    pub(super) symmetric: bool,
    pub(super) topological: bool,
    pub(super) result: PickResult,
    pub(super) brush: BrushInput,
    pub(super) alpha: Option<Arc<AlphaStencil>>,
    pub(super) alpha_frame: AlphaFrame,
    /// Whether stroke steps keep the stencil anchored at its first origin.
    pub(super) keep_origin: bool,
    /// Broad-phase face candidates.
    pub(super) candidates: Vec<u32>,
    /// Vertex superset gathered from candidate faces.
    pub(super) scratch_vertices: Vec<u32>,
}

impl Picking {
    /// Create an engine. A `symmetric` engine picks through each mesh's
    /// mirror plane, selecting the mirrored counterpart of what is under
    /// the cursor.
    pub fn new(symmetric: bool) -> Self {
        Self {
            symmetric,
            ..Self::default()
        }
    }

    /// Create an engine configured from options.
    ///
    /// The active stencil named by `options.alpha.active` is looked up in
    /// `registry`; an unknown name leaves the engine without a stencil (see
    /// [`set_active_alpha`](Self::set_active_alpha)).
    pub fn from_options(
        options: &Options,
        registry: &AlphaRegistry,
        symmetric: bool,
    ) -> Self {
        let mut picking = Self {
            symmetric,
            topological: options.picking.topological,
            brush: BrushInput::from(&options.brush),
            keep_origin: options.alpha.keep_origin,
            ..Self::default()
        };
        let _ = picking.set_active_alpha(registry, options.alpha.active.as_deref());
        picking
    }

    /// Whether this engine picks through the mirror plane.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Whether brush selections flood through connectivity.
    pub fn is_topological(&self) -> bool {
        self.topological
    }

    /// Switch between spatial and topological brush selection.
    pub fn set_topological(&mut self, topological: bool) {
        self.topological = topological;
    }

    /// Current brush input.
    pub fn brush(&self) -> BrushInput {
        self.brush
    }

    /// Replace the brush input. Call
    /// [`update_local_and_world_radius2`](Self::update_local_and_world_radius2)
    /// afterwards to refresh the radii.
    pub fn set_brush(&mut self, brush: BrushInput) {
        self.brush = brush;
    }

    /// Set the brush radius in pixels.
    pub fn set_screen_radius(&mut self, pixels: f32) {
        self.brush.screen_radius = pixels.max(0.0);
    }

    /// Set the stylus pressure, clamped to `[0, 1]`.
    pub fn set_pressure(&mut self, pressure: f32) {
        self.brush.pressure = pressure.clamp(0.0, 1.0);
    }

    /// The full pick state.
    pub fn result(&self) -> &PickResult {
        &self.result
    }

    /// The mesh under the cursor, if any.
    pub fn mesh(&self) -> Option<MeshId> {
        self.result.mesh
    }

    /// Index of the picked face.
    pub fn picked_face(&self) -> Option<u32> {
        self.result.face
    }

    /// Hit point in the picked mesh's local space.
    pub fn intersection_point(&self) -> Vec3 {
        self.result.intersection
    }

    /// Interpolated normal at the hit point.
    pub fn picked_normal(&self) -> Vec3 {
        self.result.normal
    }

    /// Squared local brush radius.
    pub fn local_radius2(&self) -> f32 {
        self.result.local_radius2
    }

    /// Squared world brush radius.
    pub fn world_radius2(&self) -> f32 {
        self.result.world_radius2
    }

    /// Vertices of the last selection.
    pub fn picked_vertices(&self) -> &[u32] {
        &self.result.picked_vertices
    }

    /// Direction of the ray used by the last hit test.
    pub fn eye_direction(&self) -> Vec3 {
        self.result.eye_direction
    }

    /// Whether `mesh` is the currently picked mesh.
    pub(super) fn is_picked<M: PickableMesh + ?Sized>(&self, mesh: &M) -> bool {
        self.result.mesh == Some(mesh.id())
    }

    /// Cast the cursor ray against every visible mesh and keep the closest
    /// hit. Returns whether anything was hit; on a miss the mesh and face
    /// are cleared and both radii reset to 0. Ties keep the first mesh.
    pub fn cast_against_all<'a, M, I>(
        &mut self,
        camera: &impl Projectable,
        meshes: I,
        mouse_x: f32,
        mouse_y: f32,
    ) -> bool
    where
        M: PickableMesh + ?Sized + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let near = camera.unproject(mouse_x, mouse_y, NEAR_PROBE_DEPTH);
        let far = camera.unproject(mouse_x, mouse_y, FAR_PROBE_DEPTH);

        let mut best: Option<(f32, &M, LocalHit, Vec3)> = None;
        for mesh in meshes {
            if !mesh.is_visible() {
                continue;
            }
            let inverse = mesh.matrix().inverse();
            if !inverse.is_finite() {
                log::warn!("Skipping mesh {:?}: singular model matrix", mesh.id());
                continue;
            }
            let near_local = inverse.transform_point3(near);
            let far_local = inverse.transform_point3(far);
            let (eye, hit) = self.intersect_local(mesh, near_local, far_local);
            let Some(hit) = hit else {
                continue;
            };
            let scaled = hit.distance * mesh.scale();
            if best.is_none_or(|(d, ..)| scaled < d) {
                best = Some((scaled, mesh, hit, eye));
            }
        }

        match best {
            Some((distance, mesh, hit, eye)) => {
                log::debug!(
                    "Cursor hit mesh {:?} face {} at distance {distance}",
                    mesh.id(),
                    hit.face
                );
                self.commit_hit(mesh, hit, eye);
                self.update_local_and_world_radius2(camera, mesh);
                true
            }
            None => {
                self.result.clear_hit();
                self.result.eye_direction =
                    (far - near).try_normalize().unwrap_or(Vec3::ZERO);
                false
            }
        }
    }

    /// Cast the cursor ray against a single mesh.
    pub fn cast_mouse_against_one<M: PickableMesh + ?Sized>(
        &mut self,
        camera: &impl Projectable,
        mesh: &M,
        mouse_x: f32,
        mouse_y: f32,
    ) -> bool {
        let inverse = mesh.matrix().inverse();
        if !inverse.is_finite() {
            log::warn!("Cannot cast against mesh {:?}: singular model matrix", mesh.id());
            self.result.clear_hit();
            return false;
        }
        let near = camera.unproject(mouse_x, mouse_y, NEAR_PROBE_DEPTH);
        let far = camera.unproject(mouse_x, mouse_y, FAR_PROBE_DEPTH);
        self.cast_against_one(
            camera,
            mesh,
            inverse.transform_point3(near),
            inverse.transform_point3(far),
        )
    }

    /// Cast the ray through the mesh-local probe points `near_local` and
    /// `far_local` against `mesh`. On a hit the mesh, face and intersection
    /// are recorded and the radii refreshed; on a miss the face is cleared
    /// and both radii reset to 0.
    pub fn cast_against_one<M: PickableMesh + ?Sized>(
        &mut self,
        camera: &impl Projectable,
        mesh: &M,
        near_local: Vec3,
        far_local: Vec3,
    ) -> bool {
        self.result.mesh = None;
        self.result.face = None;

        let (eye, hit) = self.intersect_local(mesh, near_local, far_local);
        self.result.eye_direction = eye;
        match hit {
            Some(hit) => {
                self.commit_hit(mesh, hit, eye);
                self.update_local_and_world_radius2(camera, mesh);
                true
            }
            None => {
                self.result.clear_hit();
                false
            }
        }
    }

    fn commit_hit<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &M,
        hit: LocalHit,
        eye: Vec3,
    ) {
        self.result.mesh = Some(mesh.id());
        self.result.face = Some(hit.face);
        self.result.intersection = hit.point;
        self.result.eye_direction = eye;
    }

    /// Closest hit of the probe ray against `mesh`, mirrored first when the
    /// engine is symmetric. Also returns the ray direction used.
    fn intersect_local<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &M,
        mut near: Vec3,
        mut far: Vec3,
    ) -> (Vec3, Option<LocalHit>) {
        if self.symmetric {
            let plane = mesh.symmetry_plane();
            plane.mirror(&mut near);
            plane.mirror(&mut far);
        }
        let Some(dir) = (far - near).try_normalize() else {
            return (Vec3::ZERO, None);
        };

        self.candidates.clear();
        mesh.query_ray(near, dir, &mut self.candidates);

        let positions = mesh.positions();
        let faces = mesh.faces();
        let corner = |i: u32| positions.get(i as usize).copied();

        let mut best: Option<LocalHit> = None;
        for &face_idx in &self.candidates {
            let Some(face) = faces.get(face_idx as usize) else {
                continue;
            };
            let (Some(v1), Some(v2), Some(v3)) =
                (corner(face[0]), corner(face[1]), corner(face[2]))
            else {
                continue;
            };

            let mut hit = intersect_ray_triangle(near, dir, v1, v2, v3);
            if hit.is_none() && face[3] != TRI_INDEX {
                if let Some(v4) = corner(face[3]) {
                    hit = intersect_ray_triangle(near, dir, v1, v3, v4);
                }
            }

            if let Some(distance) = hit {
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(LocalHit {
                        face: face_idx,
                        point: near + dir * distance,
                        distance,
                    });
                }
            }
        }
        (dir, best)
    }

    /// Squared world-space length of the screen-space brush radius at the
    /// hit point.
    ///
    /// The hit point is projected to the screen, shifted horizontally by the
    /// brush radius (scaled by pressure unless `ignore_pressure`), and
    /// unprojected at the same depth. This accounts for perspective
    /// foreshortening and orthographic zoom, so it must be recomputed after
    /// any camera or brush change. Returns 0 when `mesh` is not the picked
    /// mesh.
    pub fn compute_world_radius2<M: PickableMesh + ?Sized>(
        &self,
        camera: &impl Projectable,
        mesh: &M,
        ignore_pressure: bool,
    ) -> f32 {
        if !self.is_picked(mesh) {
            return 0.0;
        }
        let world = mesh.matrix().transform_point3(self.result.intersection);
        let offset = self.brush.effective_radius(ignore_pressure);
        let screen = camera.project(world);
        let edge = camera.unproject(screen.x + offset, screen.y, screen.z);
        let radius2 = world.distance_squared(edge);
        if radius2.is_finite() {
            radius2
        } else {
            0.0
        }
    }

    /// Refresh both radii for the picked mesh. The only writer of the
    /// radius pair, keeping `world = local * scale^2`. Does nothing unless
    /// `mesh` is the picked mesh.
    pub fn update_local_and_world_radius2<M: PickableMesh + ?Sized>(
        &mut self,
        camera: &impl Projectable,
        mesh: &M,
    ) {
        if !self.is_picked(mesh) {
            return;
        }
        let scale = mesh.scale();
        if !(scale > 0.0 && scale.is_finite()) {
            log::warn!("Mesh {:?} has non-positive scale {scale}", mesh.id());
            self.result.set_radii(0.0, 0.0);
            return;
        }
        let world2 = self.compute_world_radius2(camera, mesh, false);
        self.result.set_radii(world2 / (scale * scale), world2);
    }

    /// Interpolate the vertex normals over the picked face and store the
    /// normalized result as the picked normal. A degenerate (zero) blend
    /// keeps the previous normal. `None` when `mesh` is not picked.
    pub fn compute_picked_normal<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &M,
    ) -> Option<Vec3> {
        let blended = self.poly_lerp(mesh, mesh.normals())?;
        if let Some(normal) = blended.try_normalize() {
            self.result.normal = normal;
        }
        Some(self.result.normal)
    }

    /// Inverse-distance blend of a per-vertex field over the picked face.
    ///
    /// Each corner weighs `1 / distance(intersection, corner)`, normalized
    /// to sum to one; quads blend all four corners at once rather than the
    /// hit triangle's barycentric coordinates. A hit exactly on a corner
    /// returns that corner's value. `None` when `mesh` is not picked or the
    /// face or field do not cover the face's corners.
    pub fn poly_lerp<M: PickableMesh + ?Sized>(
        &self,
        mesh: &M,
        field: &[Vec3],
    ) -> Option<Vec3> {
        if !self.is_picked(mesh) {
            return None;
        }
        let face = mesh.faces().get(self.result.face? as usize)?;
        let corners = if face[3] == TRI_INDEX {
            &face[..3]
        } else {
            &face[..]
        };
        let positions = mesh.positions();
        let inter = self.result.intersection;

        let mut weights = [0.0f32; 4];
        for (w, &c) in weights.iter_mut().zip(corners) {
            let dist = inter.distance(*positions.get(c as usize)?);
            if dist <= f32::MIN_POSITIVE {
                return field.get(c as usize).copied();
            }
            *w = 1.0 / dist;
        }

        let inv_sum = 1.0 / weights.iter().sum::<f32>();
        let mut out = Vec3::ZERO;
        for (w, &c) in weights.iter().zip(corners) {
            out += *field.get(c as usize)? * (w * inv_sum);
        }
        Some(out)
    }
}
