/// Per-vertex generation-tagged flag arena.
///
/// Instead of clearing a membership set before every query, each query takes
/// a fresh generation number and stamps it into the vertices it touches. A
/// vertex belongs to the current query iff its stamp equals the current
/// generation. Two independent stamps are kept:
///
/// - **sculpt** marks membership in the last selection, readable by other
///   subsystems in O(1);
/// - **tag** marks "already visited" during a traversal.
///
/// The buffers only ever grow; [`VertexFlags::ensure_len`] must be called
/// whenever the vertex count may have changed.
#[derive(Debug, Clone, Default)]
pub struct VertexFlags {
    sculpt: Vec<u32>,
    tag: Vec<u32>,
    sculpt_generation: u32,
    tag_generation: u32,
}

impl VertexFlags {
    /// Create an arena sized for `len` vertices, with no vertex stamped.
    pub fn new(len: usize) -> Self {
        Self {
            sculpt: vec![0; len],
            tag: vec![0; len],
            sculpt_generation: 0,
            tag_generation: 0,
        }
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.sculpt.len()
    }

    /// Whether the arena covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.sculpt.is_empty()
    }

    /// Grow both buffers to cover at least `len` vertices. New slots start
    /// unstamped. Never shrinks.
    pub fn ensure_len(&mut self, len: usize) {
        if len > self.sculpt.len() {
            self.sculpt.resize(len, 0);
            self.tag.resize(len, 0);
        }
    }

    /// Start a new selection and return its sculpt generation.
    pub fn next_sculpt_flag(&mut self) -> u32 {
        self.sculpt_generation =
            advance(self.sculpt_generation, &mut self.sculpt);
        self.sculpt_generation
    }

    /// Start a new traversal and return its tag generation.
    pub fn next_tag_flag(&mut self) -> u32 {
        self.tag_generation = advance(self.tag_generation, &mut self.tag);
        self.tag_generation
    }

    /// Generation of the most recent selection (0 before any).
    pub fn sculpt_flag(&self) -> u32 {
        self.sculpt_generation
    }

    /// Generation of the most recent traversal (0 before any).
    pub fn tag_flag(&self) -> u32 {
        self.tag_generation
    }

    /// Raw sculpt stamps, one per vertex.
    pub fn sculpt_flags(&self) -> &[u32] {
        &self.sculpt
    }

    /// Raw tag stamps, one per vertex.
    pub fn tag_flags(&self) -> &[u32] {
        &self.tag
    }

    /// Mutable sculpt stamps for callers writing through directly.
    pub fn sculpt_flags_mut(&mut self) -> &mut [u32] {
        &mut self.sculpt
    }

    /// Mutable tag stamps for callers writing through directly.
    pub fn tag_flags_mut(&mut self) -> &mut [u32] {
        &mut self.tag
    }

    /// Whether `vertex` belongs to the most recent selection.
    pub fn is_selected(&self, vertex: u32) -> bool {
        self.sculpt_generation != 0
            && self.sculpt.get(vertex as usize) == Some(&self.sculpt_generation)
    }

    /// Stamp `vertex` into the selection of generation `flag`.
    #[inline]
    pub fn mark_sculpt(&mut self, vertex: u32, flag: u32) {
        if let Some(slot) = self.sculpt.get_mut(vertex as usize) {
            *slot = flag;
        }
    }

    /// Tag `vertex` with generation `flag`. Returns `false` when it already
    /// carried that tag (or is out of range), `true` when newly tagged.
    #[inline]
    pub fn visit(&mut self, vertex: u32, flag: u32) -> bool {
        match self.tag.get_mut(vertex as usize) {
            Some(slot) if *slot != flag => {
                *slot = flag;
                true
            }
            _ => false,
        }
    }
}

/// Next generation after `current`. On wrap-around the stamps are wiped so
/// stale entries from a previous cycle cannot alias the new generation.
fn advance(current: u32, stamps: &mut [u32]) -> u32 {
    match current.checked_add(1) {
        Some(next) => next,
        None => {
            stamps.fill(0);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_monotonically() {
        let mut flags = VertexFlags::new(4);
        let a = flags.next_sculpt_flag();
        let b = flags.next_sculpt_flag();
        assert!(b > a);
        assert_eq!(flags.next_tag_flag(), 1);
    }

    #[test]
    fn visit_reports_first_touch_only() {
        let mut flags = VertexFlags::new(3);
        let tag = flags.next_tag_flag();
        assert!(flags.visit(1, tag));
        assert!(!flags.visit(1, tag));
        let tag = flags.next_tag_flag();
        assert!(flags.visit(1, tag));
        assert!(!flags.visit(7, tag));
    }

    #[test]
    fn selection_membership_follows_latest_generation() {
        let mut flags = VertexFlags::new(3);
        assert!(!flags.is_selected(0));
        let first = flags.next_sculpt_flag();
        flags.mark_sculpt(0, first);
        assert!(flags.is_selected(0));
        let _ = flags.next_sculpt_flag();
        assert!(!flags.is_selected(0));
    }

    #[test]
    fn ensure_len_grows_without_disturbing_stamps() {
        let mut flags = VertexFlags::new(2);
        let tag = flags.next_tag_flag();
        assert!(flags.visit(1, tag));
        flags.ensure_len(10);
        assert_eq!(flags.len(), 10);
        assert_eq!(flags.tag_flags()[1], tag);
        assert_eq!(flags.tag_flags()[9], 0);
        flags.ensure_len(4);
        assert_eq!(flags.len(), 10);
    }

    #[test]
    fn wrap_around_clears_stale_stamps() {
        let mut flags = VertexFlags::new(2);
        flags.tag_generation = u32::MAX;
        flags.tag_flags_mut()[0] = 1;
        assert_eq!(flags.next_tag_flag(), 1);
        assert!(flags.visit(0, 1));
    }
}
