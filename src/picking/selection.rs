//! Brush vertex selection around the picked point.

use glam::Vec3;

use super::picking::Picking;
use crate::mesh::{PickableMesh, TRI_INDEX};

impl Picking {
    /// Select the vertices strictly inside the sphere of squared radius
    /// `radius2` around the intersection point.
    ///
    /// Candidate faces come from the mesh's broad phase; their corners are
    /// gathered once each (deduplicated with the tag stamp) and filtered by
    /// exact distance. Every selected vertex gets the fresh sculpt stamp.
    /// Yields nothing when `mesh` is not the picked mesh.
    pub fn pick_vertices_in_sphere<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &mut M,
        radius2: f32,
    ) -> &[u32] {
        self.result.picked_vertices.clear();
        if !self.is_picked(mesh) {
            return &self.result.picked_vertices;
        }
        let center = self.result.intersection;

        self.candidates.clear();
        mesh.query_sphere(center, radius2, &mut self.candidates);

        let (topo, flags) = mesh.topology_and_flags();
        flags.ensure_len(topo.positions.len());

        let tag = flags.next_tag_flag();
        self.scratch_vertices.clear();
        for &face_idx in &self.candidates {
            let Some(face) = topo.faces.get(face_idx as usize) else {
                continue;
            };
            for &v in face {
                if v != TRI_INDEX && flags.visit(v, tag) {
                    self.scratch_vertices.push(v);
                }
            }
        }

        let sculpt = flags.next_sculpt_flag();
        for &v in &self.scratch_vertices {
            let inside = topo
                .positions
                .get(v as usize)
                .is_some_and(|p| p.distance_squared(center) < radius2);
            if inside {
                flags.mark_sculpt(v, sculpt);
                self.result.picked_vertices.push(v);
            }
        }

        log::debug!(
            "Sphere pick: {} of {} candidate vertices",
            self.result.picked_vertices.len(),
            self.scratch_vertices.len()
        );
        &self.result.picked_vertices
    }

    /// Select the vertices within squared radius `radius2` (inclusive) that
    /// are connected to the picked face through vertices also within it.
    ///
    /// The flood starts from the picked face's corners inside the sphere
    /// and walks ring neighbors, so disjoint sheets crossing the sphere are
    /// left out. Yields nothing when no corner of the picked face is inside
    /// or `mesh` is not the picked mesh.
    pub fn pick_vertices_in_sphere_topological<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &mut M,
        radius2: f32,
    ) -> &[u32] {
        self.result.picked_vertices.clear();
        if !self.is_picked(mesh) {
            return &self.result.picked_vertices;
        }
        let Some(face_idx) = self.result.face else {
            return &self.result.picked_vertices;
        };
        let center = self.result.intersection;

        let (topo, flags) = mesh.topology_and_flags();
        flags.ensure_len(topo.positions.len());
        let Some(face) = topo.faces.get(face_idx as usize) else {
            return &self.result.picked_vertices;
        };

        let within = |p: Option<&Vec3>| {
            p.is_some_and(|p| p.distance_squared(center) <= radius2)
        };

        let tag = flags.next_tag_flag();
        let sculpt = flags.next_sculpt_flag();
        let queue = &mut self.result.picked_vertices;
        for &v in face {
            if v == TRI_INDEX || !flags.visit(v, tag) {
                continue;
            }
            if within(topo.positions.get(v as usize)) {
                flags.mark_sculpt(v, sculpt);
                queue.push(v);
            }
        }

        // The selection doubles as the breadth-first queue
        let mut head = 0;
        while let Some(&v) = queue.get(head) {
            head += 1;
            for &n in topo.rings.ring(v) {
                if !flags.visit(n, tag) {
                    continue;
                }
                if within(topo.positions.get(n as usize)) {
                    flags.mark_sculpt(n, sculpt);
                    queue.push(n);
                }
            }
        }

        log::debug!("Topological pick: {} vertices", queue.len());
        &self.result.picked_vertices
    }

    /// Select the brush footprint on `mesh` using the current local radius
    /// and selection mode.
    pub fn pick_brush_vertices<M: PickableMesh + ?Sized>(
        &mut self,
        mesh: &mut M,
    ) -> &[u32] {
        let radius2 = self.result.local_radius2;
        if self.topological {
            self.pick_vertices_in_sphere_topological(mesh, radius2)
        } else {
            self.pick_vertices_in_sphere(mesh, radius2)
        }
    }
}
