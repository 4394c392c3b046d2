//! The signature image loaded into an editing session

use crate::constants::DEFAULT_ASPECT_RATIO;
use crate::types::*;
use std::io::Cursor;

/// Outcome of loading a signature image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignatureLoad {
    /// Dimensions were read; the aspect ratio now matches the image
    Ready { width: u32, height: u32 },
    /// Bytes were kept but the dimensions could not be read, so the
    /// previous aspect ratio is still in effect
    ProbeFailed,
    /// Empty input; any previous signature was dropped
    Cleared,
}

#[derive(Debug, Clone)]
pub struct SignatureState {
    bytes: Option<Vec<u8>>,
    aspect_ratio: f32,
}

impl Default for SignatureState {
    fn default() -> Self {
        Self {
            bytes: None,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl SignatureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.bytes.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Width / height of the loaded image
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Store new signature bytes and probe their dimensions.
    ///
    /// A failed probe is not an error: the image is still attached and the
    /// previous aspect ratio stays in effect. Empty bytes clear the signature.
    pub async fn load(&mut self, bytes: Vec<u8>) -> Result<SignatureLoad> {
        if bytes.is_empty() {
            self.clear();
            return Ok(SignatureLoad::Cleared);
        }

        let probe_input = bytes.clone();
        self.bytes = Some(bytes);

        let probed = tokio::task::spawn_blocking(move || probe_dimensions(&probe_input)).await?;
        match probed {
            Ok((width, height)) => {
                self.aspect_ratio = width as f32 / height as f32;
                log::info!(
                    "Signature image {}x{} loaded (aspect ratio {:.3})",
                    width,
                    height,
                    self.aspect_ratio
                );
                Ok(SignatureLoad::Ready { width, height })
            }
            Err(e) => {
                log::warn!(
                    "{}; keeping aspect ratio {:.3}",
                    e,
                    self.aspect_ratio
                );
                Ok(SignatureLoad::ProbeFailed)
            }
        }
    }

    /// Drop the image and forget its proportions
    pub fn clear(&mut self) {
        self.bytes = None;
        self.aspect_ratio = DEFAULT_ASPECT_RATIO;
    }
}

/// Read an encoded image's pixel dimensions without decoding the pixels.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SignError::ImageProbe(e.to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| SignError::ImageProbe(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(SignError::ImageProbe(format!(
            "image has no area ({}x{})",
            width, height
        )));
    }
    Ok((width, height))
}
