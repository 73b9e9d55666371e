use std::path::PathBuf;
use std::sync::mpsc;

use super::registry::AlphaRegistry;
use super::stencil::Luminance;
use crate::error::PickError;

/// Where the decoder thread reads the encoded image from.
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A stencil being decoded on a background thread.
///
/// Decoding never touches the registry; the stencil is registered on the
/// polling thread once the decoded image arrives, so it is either fully
/// registered or absent.
pub struct PendingAlpha {
    name: String,
    result_rx: mpsc::Receiver<Result<Luminance, PickError>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

/// Outcome of polling a [`PendingAlpha`].
pub enum AlphaPoll {
    /// Still decoding; poll the returned handle again later.
    Pending(PendingAlpha),
    /// Finished: the registered name, or why nothing was registered.
    Done(Result<String, PickError>),
}

/// Start decoding the image file at `path` into a stencil named `name`.
///
/// # Errors
///
/// [`PickError::ThreadSpawn`] if the decoder thread cannot be started.
pub fn load_alpha_path(
    name: &str,
    path: impl Into<PathBuf>,
) -> Result<PendingAlpha, PickError> {
    PendingAlpha::spawn(name, Source::Path(path.into()))
}

/// Start decoding an in-memory encoded image into a stencil named `name`.
///
/// # Errors
///
/// [`PickError::ThreadSpawn`] if the decoder thread cannot be started.
pub fn load_alpha_bytes(
    name: &str,
    bytes: Vec<u8>,
) -> Result<PendingAlpha, PickError> {
    PendingAlpha::spawn(name, Source::Bytes(bytes))
}

impl PendingAlpha {
    fn spawn(name: &str, source: Source) -> Result<Self, PickError> {
        let (result_tx, result_rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("alpha-decode".into())
            .spawn(move || {
                let decoded = match source {
                    Source::Path(path) => Luminance::open(&path),
                    Source::Bytes(bytes) => Luminance::decode(&bytes),
                };
                let _ = result_tx.send(decoded);
            })
            .map_err(PickError::ThreadSpawn)?;

        log::debug!("Decoding alpha '{name}' in the background");
        Ok(Self {
            name: name.to_owned(),
            result_rx,
            thread: Some(thread),
        })
    }

    /// Requested display name (the registered one may carry a suffix).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking check for the decoded image; registers it when ready.
    pub fn try_finish(self, registry: &mut AlphaRegistry) -> AlphaPoll {
        match self.result_rx.try_recv() {
            Ok(decoded) => AlphaPoll::Done(self.finish(registry, decoded)),
            Err(mpsc::TryRecvError::Empty) => AlphaPoll::Pending(self),
            Err(mpsc::TryRecvError::Disconnected) => {
                AlphaPoll::Done(Err(self.backend_lost()))
            }
        }
    }

    /// Block until decoding finishes and register the result.
    ///
    /// # Errors
    ///
    /// The decode failure ([`PickError::Io`], [`PickError::AlphaDecode`],
    /// [`PickError::EmptyAlpha`]) or [`PickError::ImageBackend`] if the
    /// decoder thread died without reporting.
    pub fn wait(self, registry: &mut AlphaRegistry) -> Result<String, PickError> {
        match self.result_rx.recv() {
            Ok(decoded) => self.finish(registry, decoded),
            Err(mpsc::RecvError) => Err(self.backend_lost()),
        }
    }

    fn finish(
        mut self,
        registry: &mut AlphaRegistry,
        decoded: Result<Luminance, PickError>,
    ) -> Result<String, PickError> {
        self.join();
        match decoded {
            Ok(image) => {
                Ok(registry.add_alpha(&self.name, image).name().to_owned())
            }
            Err(e) => {
                log::debug!("Alpha '{}' failed to load: {e}", self.name);
                Err(e)
            }
        }
    }

    fn backend_lost(mut self) -> PickError {
        self.join();
        PickError::ImageBackend(format!(
            "decoder thread for '{}' exited without a result",
            self.name
        ))
    }

    fn join(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, value: u8) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([value, value, value]),
        );
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn loaded_alpha_is_registered_under_its_name() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut registry = AlphaRegistry::init();
        let pending = load_alpha_bytes("Clay", png_bytes(4, 2, 200)).unwrap();
        assert_eq!(pending.name(), "Clay");
        let name = pending.wait(&mut registry).unwrap();
        assert_eq!(name, "Clay");
        let stencil = registry.get("Clay").unwrap();
        assert_eq!((stencil.width(), stencil.height()), (4, 2));
        assert!(stencil.luminance().iter().all(|&v| v == 200));
    }

    #[test]
    fn second_load_with_same_name_is_suffixed() {
        let mut registry = AlphaRegistry::empty();
        let first = load_alpha_bytes("Clay", png_bytes(1, 1, 10)).unwrap();
        let second = load_alpha_bytes("Clay", png_bytes(1, 1, 20)).unwrap();
        assert_eq!(first.wait(&mut registry).unwrap(), "Clay");
        assert_eq!(second.wait(&mut registry).unwrap(), "Clay1");
    }

    #[test]
    fn undecodable_image_registers_nothing() {
        let mut registry = AlphaRegistry::empty();
        let pending = load_alpha_bytes("Junk", b"nope".to_vec()).unwrap();
        let err = pending.wait(&mut registry).unwrap_err();
        assert!(matches!(err, PickError::AlphaDecode(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut registry = AlphaRegistry::empty();
        let pending = load_alpha_path(
            "Missing",
            std::env::temp_dir().join("sculpt_pick_no_such_alpha.png"),
        )
        .unwrap();
        let err = pending.wait(&mut registry).unwrap_err();
        assert!(matches!(err, PickError::Io(_)));
        assert!(!registry.contains("Missing"));
    }

    #[test]
    fn polling_eventually_completes() {
        let mut registry = AlphaRegistry::empty();
        let mut pending = load_alpha_bytes("Poll", png_bytes(2, 2, 255)).unwrap();
        let name = loop {
            match pending.try_finish(&mut registry) {
                AlphaPoll::Pending(again) => {
                    pending = again;
                    std::thread::yield_now();
                }
                AlphaPoll::Done(result) => break result.unwrap(),
            }
        };
        assert_eq!(name, "Poll");
        assert!(registry.contains("Poll"));
    }
}
