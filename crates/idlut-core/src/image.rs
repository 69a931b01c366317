//! 8-bit grayscale image representation and LUT application.

use std::path::Path;

use crate::error::LutError;
use crate::lut::ByteLut;

/// Single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Intensities, `width × height` bytes.
    pub pixels: Vec<u8>,
}

impl GrayImage {
    /// Wrap a pixel buffer, checking it holds exactly `width × height` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, LutError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(LutError::Dimensions {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an image from disk and reduce it to 8-bit luma.
    ///
    /// Supports common formats via the `image` crate (PNG, JPEG, TIFF, ...).
    pub fn load(path: &Path) -> Result<Self, LutError> {
        let img = ::image::open(path)?;
        tracing::debug!("loaded {} ({:?})", path.display(), img.color());
        Ok(img.to_luma8().into())
    }

    /// Save as an 8-bit grayscale image; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), LutError> {
        let buf = ::image::GrayImage::try_from(self.clone())?;
        buf.save(path)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl From<::image::GrayImage> for GrayImage {
    fn from(img: ::image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

impl TryFrom<GrayImage> for ::image::GrayImage {
    type Error = LutError;

    fn try_from(img: GrayImage) -> Result<Self, Self::Error> {
        let (width, height, actual) = (img.width, img.height, img.pixels.len());
        ::image::GrayImage::from_raw(width, height, img.pixels).ok_or(LutError::Dimensions {
            width,
            height,
            actual,
        })
    }
}

impl ByteLut {
    /// Remap every pixel of `image` through this table into a new image.
    pub fn apply(&self, image: &GrayImage) -> GrayImage {
        let mut out = image.clone();
        self.apply_in_place(&mut out.pixels);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::Lut;

    #[test]
    fn test_new_rejects_mismatched_buffer() {
        let err = GrayImage::new(4, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            LutError::Dimensions {
                width: 4,
                height: 4,
                actual: 15
            }
        ));
        assert!(GrayImage::new(0, 0, vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_apply_window_lut() {
        let image = GrayImage::new(2, 2, vec![0, 50, 100, 200]).unwrap();
        let lut = Lut::linear(50, 100, 0, 255).unwrap().to_byte_lut();
        let out = lut.apply(&image);
        assert_eq!(out.pixels, vec![0, 0, 255, 255]);
        assert_eq!((out.width, out.height), (2, 2));
        // Source is untouched.
        assert_eq!(image.pixels, vec![0, 50, 100, 200]);
    }

    #[test]
    fn test_image_crate_conversion_preserves_layout() {
        let image = GrayImage::new(3, 1, vec![1, 2, 3]).unwrap();
        let buf = ::image::GrayImage::try_from(image.clone()).unwrap();
        assert_eq!(buf.get_pixel(2, 0).0, [3]);
        assert_eq!(GrayImage::from(buf), image);
    }
}
