//! Camera projection for cursor picking.
//!
//! Picking only needs to move points between screen and world space; the
//! [`Projectable`] trait is that seam. [`Camera`] is a look-at camera with
//! perspective or orthographic projection and a pixel viewport.

/// Core camera struct and projection matrices.
pub mod core;
/// Screen/world projection trait.
pub mod projection;

pub use self::core::Camera;
pub use projection::Projectable;
