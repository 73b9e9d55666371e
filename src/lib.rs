// -- Lint policy ---------------------------------------------------------
// Lint groups and their allowances live in Cargo.toml; these are the
// library-only guarantees.

// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]

//! Cursor picking and brush footprint selection for mesh sculpting.
//!
//! Given a camera, a set of meshes and a cursor position, the engine finds
//! the closest face under the cursor, converts the brush's pixel radius
//! into local and world radii at the hit point, selects the vertices under
//! the brush (by distance or by connectivity), and samples a grayscale
//! stencil oriented on the surface.
//!
//! # Key entry points
//!
//! - [`picking::Picking`] - the picking engine, one per brush (a symmetric
//!   twin mirrors every pick across the mesh's symmetry plane)
//! - [`mesh::PickableMesh`] - what a mesh must provide to be picked
//! - [`camera::Projectable`] - world/screen conversion used by casts
//! - [`alpha::AlphaRegistry`] - named stencils, with background loading
//! - [`options::Options`] - brush/picking presets stored as TOML
//!
//! # Spaces
//!
//! Hit points, normals, local radii and selections are expressed in the
//! picked mesh's local space. World radii use world units. Cursor
//! coordinates are pixels with `y` growing downward.

pub mod alpha;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod options;
pub mod picking;

pub use error::PickError;
