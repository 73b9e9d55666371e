//! Stateless geometric kernels used by picking.
//!
//! Every function here is allocation-free and frame-agnostic: callers pass
//! all arguments in one consistent coordinate space (world or mesh-local).

/// Ray/triangle intersection.
pub mod intersect;
/// Mirror planes for bilateral symmetry.
pub mod plane;

pub use intersect::{intersect_ray_triangle, TRIANGLE_EPSILON};
pub use plane::{mirror_point, SymmetryPlane};
