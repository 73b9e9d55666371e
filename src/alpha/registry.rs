use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::stencil::{AlphaStencil, Luminance};
use crate::error::PickError;

/// Name of the built-in all-white stamp.
pub const BUILTIN_SQUARE: &str = "Square";
/// Name of the built-in soft round stamp.
pub const BUILTIN_DISC: &str = "Disc";

const BUILTIN_SIZE: u32 = 64;

/// Append-only registry of stencils keyed by display name.
///
/// Created explicitly with [`AlphaRegistry::init`] at startup and released
/// with [`AlphaRegistry::teardown`]. Entries are shared as
/// `Arc<AlphaStencil>` so picking engines keep using a stencil they hold
/// without borrowing the registry.
#[derive(Debug, Default)]
pub struct AlphaRegistry {
    entries: Vec<Arc<AlphaStencil>>,
    by_name: FxHashMap<String, usize>,
}

impl AlphaRegistry {
    /// A registry with no stencils.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in stencils.
    pub fn init() -> Self {
        let mut registry = Self::empty();
        for (name, image) in builtins() {
            let _ = registry.add_alpha(name, image);
        }
        log::info!("Alpha registry initialized with {} built-ins", registry.len());
        registry
    }

    /// Release every stencil. Engines still holding an `Arc` keep theirs.
    pub fn teardown(self) {
        log::info!("Alpha registry torn down ({} stencils)", self.len());
    }

    /// Register `image` under `name`, suffixing a counter (`name1`,
    /// `name2`, ...) when the name is taken. Returns the registered stencil,
    /// whose [`AlphaStencil::name`] is the final name.
    pub fn add_alpha(&mut self, name: &str, image: Luminance) -> Arc<AlphaStencil> {
        let mut unique = name.to_owned();
        let mut suffix = 1u32;
        while self.by_name.contains_key(&unique) {
            unique = format!("{name}{suffix}");
            suffix += 1;
        }
        if unique != name {
            log::warn!("Alpha '{name}' already registered, renamed to '{unique}'");
        }

        let stencil = Arc::new(AlphaStencil::new(unique.clone(), image));
        let _ = self.by_name.insert(unique, self.entries.len());
        self.entries.push(Arc::clone(&stencil));
        log::info!(
            "Registered alpha '{}' ({}x{})",
            stencil.name(),
            stencil.width(),
            stencil.height()
        );
        stencil
    }

    /// Validate a raw luminance buffer and register it.
    ///
    /// # Errors
    ///
    /// Propagates [`Luminance::new`] validation failures; nothing is
    /// registered in that case.
    pub fn add_luminance(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Arc<AlphaStencil>, PickError> {
        let image = Luminance::new(width, height, pixels)?;
        Ok(self.add_alpha(name, image))
    }

    /// Look up a stencil by its registered name.
    pub fn get(&self, name: &str) -> Option<Arc<AlphaStencil>> {
        self.by_name
            .get(name)
            .and_then(|&i| self.entries.get(i))
            .cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name())
    }

    /// Number of registered stencils.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no stencil is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Procedural built-in stamps.
fn builtins() -> Vec<(&'static str, Luminance)> {
    let n = BUILTIN_SIZE;
    let square = Luminance {
        width: n,
        height: n,
        pixels: vec![u8::MAX; (n * n) as usize],
    };

    let half = n as f32 * 0.5;
    let disc_pixels = (0..n * n)
        .map(|i| {
            let x = (i % n) as f32 + 0.5 - half;
            let y = (i / n) as f32 + 0.5 - half;
            let r = ((x * x + y * y).sqrt() / half).min(1.0);
            // smoothstep falloff from the center to the rim
            let t = 1.0 - r;
            let v = t * t * (3.0 - 2.0 * t);
            (v * 255.0).round() as u8
        })
        .collect();
    let disc = Luminance {
        width: n,
        height: n,
        pixels: disc_pixels,
    };

    vec![(BUILTIN_SQUARE, square), (BUILTIN_DISC, disc)]
}
