//! Alpha stencil selection, orientation and sampling.

use std::sync::Arc;

use glam::Vec3;

use super::picking::Picking;
use crate::alpha::{AlphaFrame, AlphaRegistry, AlphaStencil};
use crate::mesh::PickableMesh;

impl Picking {
    /// Use `alpha` as the brush stencil, or none.
    pub fn set_alpha(&mut self, alpha: Option<Arc<AlphaStencil>>) {
        self.alpha = alpha;
    }

    /// Select the registered stencil called `name`, or clear it with
    /// `None`. An unknown name clears the stencil and returns `false`.
    pub fn set_active_alpha(
        &mut self,
        registry: &AlphaRegistry,
        name: Option<&str>,
    ) -> bool {
        let Some(name) = name else {
            self.alpha = None;
            return true;
        };
        self.alpha = registry.get(name);
        if self.alpha.is_none() {
            log::warn!("Unknown alpha '{name}', brush stencil cleared");
        }
        self.alpha.is_some()
    }

    /// The active stencil.
    pub fn active_alpha(&self) -> Option<&Arc<AlphaStencil>> {
        self.alpha.as_ref()
    }

    /// Current stencil frame.
    pub fn alpha_frame(&self) -> &AlphaFrame {
        &self.alpha_frame
    }

    /// Re-orient the stencil for the current intersection, normal and local
    /// radius. See [`AlphaFrame::update`].
    pub fn update_alpha_frame(&mut self, keep_origin: bool) -> bool {
        self.alpha_frame.update(
            self.result.intersection,
            self.result.normal,
            self.result.local_radius2,
            keep_origin,
        )
    }

    /// Whether stroke steps keep the stencil anchored at its first origin.
    pub fn keep_origin(&self) -> bool {
        self.keep_origin
    }

    /// Anchor the stencil for the whole stroke instead of following the
    /// intersection.
    pub fn set_keep_origin(&mut self, keep_origin: bool) {
        self.keep_origin = keep_origin;
    }

    /// Advance the stencil frame for one stroke step, honoring
    /// [`keep_origin`](Self::keep_origin).
    pub fn step_alpha_frame(&mut self) -> bool {
        self.update_alpha_frame(self.keep_origin)
    }

    /// Start a stroke: refresh the picked normal from `mesh` and orient the
    /// stencil at the intersection.
    pub fn init_alpha_frame<M: PickableMesh + ?Sized>(&mut self, mesh: &M) -> bool {
        let _ = self.compute_picked_normal(mesh);
        self.update_alpha_frame(false)
    }

    /// Stencil intensity in `[0, 1]` at a mesh-local point.
    ///
    /// Without an active stencil every point samples `1.0`. Points off the
    /// square footprint sample `0.0`. A symmetric engine reads the stencil
    /// mirrored across its vertical axis so both sides of a stroke match.
    pub fn sample_alpha(&self, point: Vec3) -> f32 {
        let Some(alpha) = &self.alpha else {
            return 1.0;
        };
        let side = self.alpha_frame.side();
        if side <= 0.0 {
            return 0.0;
        }
        let local = self.alpha_frame.to_frame(point);
        let x_side = if self.symmetric { -side } else { side };
        let xn = alpha.ratio_y() * local.x / x_side;
        let yn = alpha.ratio_x() * local.y / side;
        alpha.sample_normalized(xn, yn)
    }
}
