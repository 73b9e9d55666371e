use super::TRI_INDEX;

/// Vertex-to-vertex ring adjacency.
///
/// Both layouts meshes commonly keep are supported: one list per vertex, or
/// a flattened neighbor array addressed by per-vertex `(start, count)`
/// pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingAdjacency {
    /// One neighbor list per vertex.
    Nested(Vec<Vec<u32>>),
    /// Shared neighbor array; `start_count[2 * v]` is the first slot of
    /// vertex `v` and `start_count[2 * v + 1]` its neighbor count.
    Flattened {
        /// Interleaved `(start, count)` pairs, two entries per vertex.
        start_count: Vec<u32>,
        /// Concatenated neighbor lists.
        ring: Vec<u32>,
    },
}

impl Default for RingAdjacency {
    fn default() -> Self {
        Self::Nested(Vec::new())
    }
}

impl RingAdjacency {
    /// Neighbors of `vertex`. Out-of-range vertices (and malformed
    /// flattened ranges) have no neighbors.
    pub fn ring(&self, vertex: u32) -> &[u32] {
        let v = vertex as usize;
        match self {
            Self::Nested(rings) => {
                rings.get(v).map(Vec::as_slice).unwrap_or_default()
            }
            Self::Flattened { start_count, ring } => {
                let (Some(&start), Some(&count)) =
                    (start_count.get(2 * v), start_count.get(2 * v + 1))
                else {
                    return &[];
                };
                let start = start as usize;
                ring.get(start..start + count as usize).unwrap_or(&[])
            }
        }
    }

    /// Number of vertices the adjacency covers.
    pub fn len(&self) -> usize {
        match self {
            Self::Nested(rings) => rings.len(),
            Self::Flattened { start_count, .. } => start_count.len() / 2,
        }
    }

    /// Whether the adjacency covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build flattened edge adjacency from triangle/quad faces. Quads
    /// connect along their four edges only, never across the diagonal.
    /// Faces referencing vertices past `vertex_count` are ignored.
    pub fn from_faces(vertex_count: usize, faces: &[[u32; 4]]) -> Self {
        let mut nested: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for face in faces {
            let corners = if face[3] == TRI_INDEX {
                &face[..3]
            } else {
                &face[..]
            };
            if corners.iter().any(|&c| c as usize >= vertex_count) {
                continue;
            }
            for (i, &a) in corners.iter().enumerate() {
                let b = corners[(i + 1) % corners.len()];
                nested[a as usize].push(b);
                nested[b as usize].push(a);
            }
        }

        let mut start_count = Vec::with_capacity(vertex_count * 2);
        let mut ring = Vec::new();
        for mut neighbors in nested {
            neighbors.sort_unstable();
            neighbors.dedup();
            start_count.push(ring.len() as u32);
            start_count.push(neighbors.len() as u32);
            ring.extend_from_slice(&neighbors);
        }
        Self::Flattened { start_count, ring }
    }

    /// Convert to the nested layout.
    #[must_use]
    pub fn to_nested(&self) -> Self {
        match self {
            Self::Nested(_) => self.clone(),
            Self::Flattened { .. } => Self::Nested(
                (0..self.len() as u32)
                    .map(|v| self.ring(v).to_vec())
                    .collect(),
            ),
        }
    }
}
