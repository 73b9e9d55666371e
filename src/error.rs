//! Crate-level error types.

use std::fmt;

/// Errors produced by the sculpt_pick crate.
///
/// Missing a mesh under the cursor is not an error; picking reports it
/// through `bool` / `Option` returns.
#[derive(Debug)]
pub enum PickError {
    /// The stencil image could not be decoded. Nothing was registered.
    AlphaDecode(String),
    /// A stencil was submitted with a zero width or height.
    EmptyAlpha,
    /// A luminance buffer does not match its stated dimensions.
    LuminanceSize {
        /// Expected byte count (`width * height`).
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
    /// The image decoding backend is unavailable (worker died).
    ImageBackend(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlphaDecode(msg) => {
                write!(f, "alpha decode error: {msg}")
            }
            Self::EmptyAlpha => write!(f, "alpha stencil has no pixels"),
            Self::LuminanceSize { expected, actual } => write!(
                f,
                "luminance buffer holds {actual} bytes, expected {expected}"
            ),
            Self::ImageBackend(msg) => {
                write!(f, "image backend unavailable: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for PickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for PickError {
    fn from(e: image::ImageError) -> Self {
        Self::AlphaDecode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_expose_their_source() {
        let err = PickError::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: disk gone");
    }

    #[test]
    fn luminance_size_message_names_both_counts() {
        let err = PickError::LuminanceSize {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "luminance buffer holds 12 bytes, expected 16"
        );
        assert!(err.source().is_none());
    }
}
