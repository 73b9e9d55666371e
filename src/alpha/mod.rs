//! Alpha stencils: grayscale stamps modulating brush strength.
//!
//! A [`Luminance`] image is decoded off the interaction thread by
//! [`load_alpha_path`] / [`load_alpha_bytes`], registered under a unique
//! display name in the [`AlphaRegistry`], and sampled through an
//! [`AlphaFrame`] oriented to the surface under the brush.

mod frame;
mod loader;
mod registry;
mod stencil;

pub use frame::AlphaFrame;
pub use loader::{load_alpha_bytes, load_alpha_path, AlphaPoll, PendingAlpha};
pub use registry::{AlphaRegistry, BUILTIN_DISC, BUILTIN_SQUARE};
pub use stencil::{AlphaStencil, Luminance};
