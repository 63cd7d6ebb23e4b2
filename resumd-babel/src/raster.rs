//! Raster images used by the degraded export path.

use crate::error::ExportError;
use image::{ImageFormat, RgbImage};

/// Channel value at or above which a pixel counts as white when trimming.
const WHITE_THRESHOLD: u8 = 250;

/// An RGB8 bitmap of the rendered presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    image: RgbImage,
}

impl RasterImage {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decode PNG bytes, flattening any alpha channel.
    pub fn from_png(bytes: &[u8]) -> Result<Self, ExportError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| ExportError::Raster(format!("invalid PNG screenshot: {e}")))?;
        Ok(Self::new(decoded.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Raw RGB bytes of rows `top..top + rows`.
    pub fn rows(&self, top: u32, rows: u32) -> Vec<u8> {
        let stride = self.image.width() as usize * 3;
        let start = top as usize * stride;
        let end = (top + rows).min(self.image.height()) as usize * stride;
        self.image.as_raw()[start..end].to_vec()
    }

    /// Drop white rows from the bottom, keeping at least one row.
    pub fn trim_trailing_white(self) -> Self {
        let width = self.image.width();
        let mut height = self.image.height();
        while height > 1 {
            let row = height - 1;
            let blank = (0..width).all(|x| {
                self.image
                    .get_pixel(x, row)
                    .0
                    .iter()
                    .all(|&channel| channel >= WHITE_THRESHOLD)
            });
            if !blank {
                break;
            }
            height -= 1;
        }
        if height == self.image.height() {
            return self;
        }
        let cropped = image::imageops::crop_imm(&self.image, 0, 0, width, height).to_image();
        Self::new(cropped)
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        self.image
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| ExportError::Raster(format!("PNG encoding failed: {e}")))?;
        Ok(bytes.into_inner())
    }
}
