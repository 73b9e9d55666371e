//! Cursor picking and brush footprint selection.
//!
//! Casts the cursor ray against meshes, keeps the closest hit, derives the
//! brush radius in local and world space, selects the vertices under the
//! brush (spatially or by flood fill through mesh connectivity) and samples
//! the active alpha stencil over the surface.

#[cfg(test)]
mod fixtures;
#[allow(clippy::module_inception)]
mod picking;
mod pick_result;
mod selection;
mod stencil;

pub use pick_result::{BrushInput, PickResult};
pub use picking::Picking;
