//! The raster type shared by backgrounds and exports.

use super::types::{ExportFormat, RasterError};
use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::io::Cursor;

/// A decoded bitmap held as a Cairo ARGB32 image surface.
///
/// Cloning is cheap and shares the pixels; rasters are treated as immutable
/// once built.
#[derive(Clone)]
pub struct Raster {
    surface: cairo::ImageSurface,
}

impl Raster {
    /// Creates a fully transparent raster.
    pub fn new(width: i32, height: i32) -> Result<Self, RasterError> {
        if width <= 0 || height <= 0 {
            return Err(RasterError::Empty { width, height });
        }
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { surface })
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Converts straight-alpha RGBA pixels into a raster.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self, RasterError> {
        let width = image.width() as i32;
        let height = image.height() as i32;
        if width <= 0 || height <= 0 {
            return Err(RasterError::Empty { width, height });
        }

        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let stride = surface.stride() as usize;
        {
            let mut data = surface.data()?;
            for (y, row) in image.rows().enumerate() {
                let row_start = y * stride;
                for (x, pixel) in row.enumerate() {
                    let offset = row_start + x * 4;
                    data[offset..offset + 4].copy_from_slice(&pack_argb(pixel.0).to_ne_bytes());
                }
            }
        }

        Ok(Self { surface })
    }

    /// Converts the raster back into straight-alpha RGBA pixels.
    pub fn to_rgba(&self) -> Result<RgbaImage, RasterError> {
        let width = self.width().max(0) as u32;
        let height = self.height().max(0) as u32;
        let stride = self.surface.stride() as usize;
        let mut image = RgbaImage::new(width, height);

        self.surface.with_data(|data| {
            for (x, y, pixel) in image.enumerate_pixels_mut() {
                let offset = y as usize * stride + x as usize * 4;
                let mut word = [0u8; 4];
                word.copy_from_slice(&data[offset..offset + 4]);
                pixel.0 = unpack_argb(u32::from_ne_bytes(word));
            }
        })?;

        Ok(image)
    }

    /// Raw premultiplied ARGB32 rows, for exact pixel comparisons.
    pub fn pixels(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Vec::new();
        self.surface
            .with_data(|data| bytes.extend_from_slice(data))?;
        Ok(bytes)
    }

    /// Encodes the raster in memory.
    ///
    /// JPEG has no alpha channel, so the alpha is dropped for that format.
    pub fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, RasterError> {
        let rgba = self.to_rgba()?;
        let image = match format {
            ExportFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
            ExportFormat::Png | ExportFormat::Bmp => DynamicImage::ImageRgba8(rgba),
        };

        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, format.image_format())
            .map_err(|err| RasterError::Encode {
                format,
                message: err.to_string(),
            })?;
        Ok(bytes.into_inner())
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Packs straight RGBA into Cairo's premultiplied native-endian ARGB word.
fn pack_argb([r, g, b, a]: [u8; 4]) -> u32 {
    let premultiply = |c: u8| (c as u32 * a as u32 + 127) / 255;
    (a as u32) << 24 | premultiply(r) << 16 | premultiply(g) << 8 | premultiply(b)
}

fn unpack_argb(word: u32) -> [u8; 4] {
    let a = (word >> 24) & 0xff;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let unpremultiply = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
    [
        unpremultiply((word >> 16) & 0xff),
        unpremultiply((word >> 8) & 0xff),
        unpremultiply(word & 0xff),
        a as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn opaque_pixels_survive_conversion() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(2, 1, Rgba([10, 200, 30, 255]));

        let raster = Raster::from_rgba(&image).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        let back = raster.to_rgba().unwrap();
        assert_eq!(back.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(back.get_pixel(2, 1), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn premultiplication_handles_transparency() {
        assert_eq!(pack_argb([255, 255, 255, 0]), 0);
        assert_eq!(unpack_argb(0), [0, 0, 0, 0]);
        let half = pack_argb([255, 0, 0, 128]);
        assert_eq!(half >> 24, 128);
        assert_eq!((half >> 16) & 0xff, 128);
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            Raster::new(0, 10),
            Err(RasterError::Empty { width: 0, height: 10 })
        ));
    }

    #[test]
    fn encode_emits_format_signatures() {
        let raster = Raster::from_rgba(&RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))).unwrap();

        let png = raster.encode(ExportFormat::Png).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let jpeg = raster.encode(ExportFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[0..2], &[0xff, 0xd8]);

        let bmp = raster.encode(ExportFormat::Bmp).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }
}
