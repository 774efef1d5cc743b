//! Pixel extraction: raw image bytes to a flat sequence of color vectors.
//!
//! A [`PixelBuffer`] is the only input the clusterer understands. It keeps the
//! bytes row-major (raster scan order) so per-pixel results can be written back
//! into an image with the same dimensions.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Channel layout of a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Channels {
    /// Map a channel count to a layout. Anything other than 3 or 4 is rejected.
    pub fn from_count(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(Error::UnsupportedFormat { channels: other }),
        }
    }

    /// Components per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Row-major RGB(A) pixels with a fixed width per vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout shared by every pixel.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len() / self.channels.count()
    }

    /// Whether the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Components of pixel `i` in raster order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn pixel(&self, i: usize) -> &[u8] {
        let c = self.channels.count();
        &self.data[i * c..(i + 1) * c]
    }

    /// Iterate pixels in raster order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels.count())
    }

    /// The underlying bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the underlying bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixels as `f32` vectors, the representation the clusterer works on.
    pub fn to_points(&self) -> Vec<Vec<f32>> {
        self.iter()
            .map(|px| px.iter().map(|&v| f32::from(v)).collect())
            .collect()
    }

    /// Number of distinct colors present.
    pub fn count_distinct(&self) -> usize {
        self.iter().collect::<HashSet<_>>().len()
    }

    /// Build a buffer of the same shape from per-pixel colors.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Result<Self> {
        if data.len() != self.data.len() {
            return Err(Error::DimensionMismatch {
                expected: self.data.len(),
                found: data.len(),
            });
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        })
    }

    /// Rebuild an image with this buffer's dimensions and layout.
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> Result<image::DynamicImage> {
        use image::{DynamicImage, RgbImage, RgbaImage};

        let mismatch = || Error::DimensionMismatch {
            expected: self.width as usize * self.height as usize * self.channels.count(),
            found: self.data.len(),
        };
        match self.channels {
            Channels::Rgb => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(mismatch),
            Channels::Rgba => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(mismatch),
        }
    }
}

/// Validates and flattens image data into a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelExtractor;

impl PixelExtractor {
    /// Flatten `raw` (row-major, `channels` bytes per pixel) into a buffer.
    ///
    /// Fails with [`Error::UnsupportedFormat`] unless `channels` is 3 or 4, and
    /// with [`Error::DimensionMismatch`] if `raw` is not exactly
    /// `width * height * channels` bytes long.
    pub fn extract(raw: &[u8], width: u32, height: u32, channels: usize) -> Result<PixelBuffer> {
        let layout = Channels::from_count(channels)?;
        let expected = width as usize * height as usize * layout.count();
        if raw.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: raw.len(),
            });
        }

        Ok(PixelBuffer {
            width,
            height,
            channels: layout,
            data: raw.to_vec(),
        })
    }

    /// Flatten a decoded image.
    ///
    /// RGB and RGBA images of any bit depth are narrowed to 8 bits per channel.
    /// Grayscale images (with or without alpha) are rejected.
    #[cfg(feature = "image")]
    pub fn from_image(img: &image::DynamicImage) -> Result<PixelBuffer> {
        let channels = usize::from(img.color().channel_count());
        let (width, height) = (img.width(), img.height());
        match Channels::from_count(channels)? {
            Channels::Rgb => Self::extract(img.to_rgb8().as_raw(), width, height, 3),
            Channels::Rgba => Self::extract(img.to_rgba8().as_raw(), width, height, 4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_rgb_keeps_raster_order() {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buf = PixelExtractor::extract(&raw, 2, 2, 3).unwrap();

        assert_eq!(buf.len(), 4);
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.pixel(0), &[1, 2, 3]);
        assert_eq!(buf.pixel(3), &[10, 11, 12]);
        assert_eq!(buf.iter().count(), 4);
    }

    #[test]
    fn extract_rgba() {
        let raw = [0u8; 2 * 3 * 4];
        let buf = PixelExtractor::extract(&raw, 2, 3, 4).unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.pixel(5).len(), 4);
        assert_eq!(buf.to_points()[0], vec![0.0; 4]);
    }

    #[test]
    fn grayscale_is_unsupported() {
        let raw = [0u8; 4];
        let err = PixelExtractor::extract(&raw, 2, 2, 1).unwrap_err();
        assert_eq!(err, Error::UnsupportedFormat { channels: 1 });

        let err = PixelExtractor::extract(&raw, 1, 2, 2).unwrap_err();
        assert_eq!(err, Error::UnsupportedFormat { channels: 2 });
    }

    #[test]
    fn short_buffer_is_rejected() {
        let raw = [0u8; 11];
        let err = PixelExtractor::extract(&raw, 2, 2, 3).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 12,
                found: 11
            }
        );
    }

    #[test]
    fn zero_sized_image_is_empty() {
        let buf = PixelExtractor::extract(&[], 0, 5, 3).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn distinct_colors() {
        let raw = [0, 0, 0, 0, 0, 0, 255, 255, 255, 0, 0, 1];
        let buf = PixelExtractor::extract(&raw, 4, 1, 3).unwrap();
        assert_eq!(buf.count_distinct(), 3);
    }

    #[cfg(feature = "image")]
    #[test]
    fn image_round_trip_keeps_shape() {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            3,
            2,
            image::Rgba([10, 20, 30, 255]),
        ));
        let buf = PixelExtractor::from_image(&img).unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.channels(), Channels::Rgba);

        let back = buf.to_image().unwrap();
        assert_eq!((back.width(), back.height()), (3, 2));
    }

    #[cfg(feature = "image")]
    #[test]
    fn luma_image_is_unsupported() {
        let img = image::DynamicImage::ImageLuma8(image::GrayImage::new(2, 2));
        let err = PixelExtractor::from_image(&img).unwrap_err();
        assert_eq!(err, Error::UnsupportedFormat { channels: 1 });
    }
}
