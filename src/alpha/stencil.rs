use std::path::Path;

use crate::error::PickError;

/// Row-major 8-bit grayscale image, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Luminance {
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) pixels: Vec<u8>,
}

impl Luminance {
    /// Wrap an existing luminance buffer.
    ///
    /// # Errors
    ///
    /// [`PickError::EmptyAlpha`] for a zero dimension,
    /// [`PickError::LuminanceSize`] when `pixels` is not `width * height`
    /// bytes long.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PickError> {
        if width == 0 || height == 0 {
            return Err(PickError::EmptyAlpha);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PickError::LuminanceSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert RGBA8 pixels by averaging the color channels (alpha is
    /// ignored), rounding to the nearest integer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Luminance::new`], checked against
    /// `width * height * 4` bytes of input.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, PickError> {
        if width == 0 || height == 0 {
            return Err(PickError::EmptyAlpha);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PickError::LuminanceSize {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| {
                let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
                // round(sum / 3) without going through floats
                ((sum + 1) / 3) as u8
            })
            .collect();
        Self::new(width, height, pixels)
    }

    /// Convert any decoded image.
    ///
    /// # Errors
    ///
    /// [`PickError::EmptyAlpha`] for an image without pixels.
    pub fn from_image(image: &image::DynamicImage) -> Result<Self, PickError> {
        let rgba = image.to_rgba8();
        Self::from_rgba(rgba.width(), rgba.height(), rgba.as_raw())
    }

    /// Decode an encoded image (PNG or JPEG) from memory.
    ///
    /// # Errors
    ///
    /// [`PickError::AlphaDecode`] when the bytes are not a supported image.
    pub fn decode(bytes: &[u8]) -> Result<Self, PickError> {
        let image = image::load_from_memory(bytes)?;
        Self::from_image(&image)
    }

    /// Decode an image file.
    ///
    /// # Errors
    ///
    /// [`PickError::Io`] when the file cannot be read,
    /// [`PickError::AlphaDecode`] when it is not a supported image.
    pub fn open(path: &Path) -> Result<Self, PickError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A registered, immutable stencil.
///
/// The aspect ratios stretch the stamp onto a square footprint: the longer
/// image axis spans the whole footprint and the shorter one is compressed,
/// so non-square images keep their proportions.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaStencil {
    name: String,
    image: Luminance,
    ratio_x: f32,
    ratio_y: f32,
}

impl AlphaStencil {
    pub(super) fn new(name: String, image: Luminance) -> Self {
        let w = image.width as f32;
        let h = image.height as f32;
        Self {
            name,
            ratio_x: (w / h).max(1.0),
            ratio_y: (h / w).max(1.0),
            image,
        }
    }

    /// Unique display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Luminance bytes, row-major.
    pub fn luminance(&self) -> &[u8] {
        &self.image.pixels
    }

    /// `max(1, width / height)`.
    pub fn ratio_x(&self) -> f32 {
        self.ratio_x
    }

    /// `max(1, height / width)`.
    pub fn ratio_y(&self) -> f32 {
        self.ratio_y
    }

    /// Nearest-pixel intensity in `[0, 1]` at stencil-normalized
    /// coordinates. Coordinates outside `[-1, 1]` on either axis are off the
    /// stamp and sample `0.0`. Both axes run from `+1` at the first
    /// column/row to `-1` at the last.
    pub fn sample_normalized(&self, xn: f32, yn: f32) -> f32 {
        if !(xn.abs() <= 1.0 && yn.abs() <= 1.0) {
            return 0.0;
        }
        let w = self.image.width;
        let h = self.image.height;
        let px = (((0.5 - xn * 0.5) * w as f32) as u32).min(w - 1);
        let py = (((0.5 - yn * 0.5) * h as f32) as u32).min(h - 1);
        f32::from(self.image.pixels[(px + w * py) as usize]) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_averages_and_rounds() {
        let lum = Luminance::from_rgba(
            2,
            1,
            &[255, 255, 255, 0, 10, 11, 11, 255],
        )
        .unwrap();
        // (10 + 11 + 11) / 3 = 10.67 -> 11
        assert_eq!(lum.pixels(), &[255, 11]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = Luminance::new(4, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PickError::LuminanceSize {
                expected: 16,
                actual: 15
            }
        ));
        assert!(matches!(
            Luminance::new(0, 4, Vec::new()),
            Err(PickError::EmptyAlpha)
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = Luminance::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, PickError::AlphaDecode(_)));
    }

    #[test]
    fn decoded_png_matches_source_pixels() {
        let mut img = image::RgbaImage::new(3, 2);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let v = (x * 40 + y * 100) as u8;
            *px = image::Rgba([v, v, v, 255]);
        }
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        let lum = Luminance::decode(&bytes).unwrap();
        assert_eq!((lum.width(), lum.height()), (3, 2));
        assert_eq!(lum.pixels(), &[0, 40, 80, 100, 140, 180]);
    }

    #[test]
    fn aspect_ratios_favor_the_long_axis() {
        let wide = AlphaStencil::new(
            "wide".to_owned(),
            Luminance::new(4, 2, vec![0; 8]).unwrap(),
        );
        assert_eq!(wide.ratio_x(), 2.0);
        assert_eq!(wide.ratio_y(), 1.0);
    }

    #[test]
    fn nearest_sample_flips_both_axes() {
        let stencil = AlphaStencil::new(
            "ramp".to_owned(),
            Luminance::new(2, 2, vec![0, 51, 102, 255]).unwrap(),
        );
        // +1 maps to the first column/row, -1 to the last
        assert_eq!(stencil.sample_normalized(0.9, 0.9), 0.0);
        assert!((stencil.sample_normalized(-0.9, 0.9) - 0.2).abs() < 1e-6);
        assert!((stencil.sample_normalized(0.9, -0.9) - 0.4).abs() < 1e-6);
        assert_eq!(stencil.sample_normalized(-1.0, -1.0), 1.0);
        assert_eq!(stencil.sample_normalized(1.01, 0.0), 0.0);
        assert_eq!(stencil.sample_normalized(0.0, f32::NAN), 0.0);
    }
}
