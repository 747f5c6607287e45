//! Image matrix decoder
//!
//! Decodes the base64, row-major, MSB-first 1bpp bitmap embedded in an
//! `Image` shape and resamples it onto a destination rectangle with
//! nearest-neighbor scaling. Any ratio between source and destination size
//! is accepted; there is no interpolation.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use papr_protocol::ImageMatrix;

use crate::backend::{Color, DisplayError, DisplaySurface};

/// Reasons an image cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// The shape carries no `ImageMatrix` object
    MissingMatrix,
    /// Non-positive size, unsupported bit depth, or no data
    InvalidMetadata,
    /// Data is not valid base64
    DecodeFailure,
    /// Fewer packed bytes than `ceil(width * height / 8)`
    TruncatedData,
}

/// Destination rectangle on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DestRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DestRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A validated, decoded 1bpp bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: usize,
    height: usize,
    black_is_one: bool,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Validate metadata and decode the packed data
    pub fn decode(matrix: &ImageMatrix) -> Result<Self, ImageError> {
        if matrix.width <= 0 || matrix.height <= 0 || matrix.bpp != 1 || matrix.data.is_empty() {
            warn!(
                "ImageMatrix: invalid metadata W={} H={} Bpp={} DataLen={}",
                matrix.width,
                matrix.height,
                matrix.bpp,
                matrix.data.len()
            );
            return Err(ImageError::InvalidMetadata);
        }

        let encoded = matrix.data.as_bytes();
        let mut bytes = vec![0u8; encoded.len().div_ceil(4) * 3];
        let decoded_len = STANDARD.decode_slice(encoded, &mut bytes).map_err(|_| {
            warn!("ImageMatrix: base64 decode failed DataLen={}", encoded.len());
            ImageError::DecodeFailure
        })?;
        bytes.truncate(decoded_len);

        let width = matrix.width as usize;
        let height = matrix.height as usize;
        let Some(expected) = packed_len(width, height) else {
            warn!("ImageMatrix: {}x{} is too large", width, height);
            return Err(ImageError::InvalidMetadata);
        };
        if bytes.len() < expected {
            warn!(
                "ImageMatrix: decoded bytes too small ({} < {})",
                bytes.len(),
                expected
            );
            return Err(ImageError::TruncatedData);
        }

        debug!(
            "ImageMatrix: W={} H={} BlackIsOne={}",
            width, height, matrix.black_is_one
        );
        Ok(Self {
            width,
            height,
            black_is_one: matrix.black_is_one,
            bytes,
        })
    }

    /// Raw bit at source pixel (x, y); out-of-range reads are 0
    pub fn bit(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        let mask = 0x80u8 >> (index % 8);
        self.bytes
            .get(index / 8)
            .is_some_and(|byte| byte & mask != 0)
    }

    /// Whether source pixel (x, y) is black under the image's polarity
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        self.bit(x, y) == self.black_is_one
    }

    /// Resample the bitmap into `dest`, writing both black and white pixels
    ///
    /// Only the part of `dest` that overlaps the surface is visited.
    pub fn blit<S: DisplaySurface + ?Sized>(
        &self,
        surface: &mut S,
        dest: DestRect,
    ) -> Result<(), DisplayError> {
        if dest.width <= 0 || dest.height <= 0 {
            return Ok(());
        }

        let (surface_width, surface_height) = surface.dimensions();
        let cols = visible_span(dest.x, dest.width, surface_width);
        let rows = visible_span(dest.y, dest.height, surface_height);
        let (src_w, src_h) = (self.width as i64, self.height as i64);
        let (dest_w, dest_h) = (dest.width as i64, dest.height as i64);

        for dy in rows {
            let py = (dest.y as i64 + dy) as i32;
            let src_y = (dy * src_h / dest_h) as usize;
            for dx in cols.clone() {
                let px = (dest.x as i64 + dx) as i32;
                let src_x = (dx * src_w / dest_w) as usize;
                let color = if self.is_black(src_x, src_y) {
                    Color::Black
                } else {
                    Color::White
                };
                surface.draw_pixel(px, py, color)?;
            }
        }
        Ok(())
    }
}

/// Bytes needed for `width * height` packed bits, `None` on overflow
fn packed_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).map(|bits| bits.div_ceil(8))
}

/// Offsets into a destination span `[start, start + len)` that land on
/// `[0, limit)`
fn visible_span(start: i32, len: i32, limit: i32) -> Range<i64> {
    let start = i64::from(start);
    let first = (-start).max(0);
    let end = (i64::from(limit) - start).min(i64::from(len));
    first..end.max(first)
}

/// Frame with a crossed "X", drawn where an image could not be decoded
pub fn draw_placeholder<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    dest: DestRect,
) -> Result<(), DisplayError> {
    let right = dest.x + dest.width;
    let bottom = dest.y + dest.height;
    surface.draw_rect(dest.x, dest.y, dest.width, dest.height)?;
    surface.draw_line(dest.x, dest.y, right, bottom)?;
    surface.draw_line(right, dest.y, dest.x, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::graphics::GraphicsSurface;
    use crate::testing::{Op, RecordingSurface};
    use alloc::string::ToString;

    fn matrix(width: i32, height: i32, data: &str) -> ImageMatrix {
        ImageMatrix {
            width,
            height,
            bpp: 1,
            black_is_one: true,
            data: data.to_string(),
        }
    }

    /// 4x4 checkerboard, top-left pixel set: 0xA5 0xA5
    const CHECKERBOARD: &str = "paU=";

    #[test]
    fn test_decode_checkerboard() {
        let bitmap = PackedBitmap::decode(&matrix(4, 4, CHECKERBOARD)).unwrap();
        assert!(bitmap.is_black(0, 0));
        assert!(!bitmap.is_black(1, 0));
        assert!(!bitmap.is_black(0, 1));
        assert!(bitmap.is_black(1, 1));
        assert!(bitmap.is_black(3, 3));
    }

    #[test]
    fn test_checkerboard_scaled_to_2x2_blocks() {
        let bitmap = PackedBitmap::decode(&matrix(4, 4, CHECKERBOARD)).unwrap();
        let mut surface = GraphicsSurface::new(FrameBuffer::new(16, 16));
        bitmap.blit(&mut surface, DestRect::new(4, 4, 8, 8)).unwrap();

        let fb = surface.target();
        for dy in 0..8 {
            for dx in 0..8 {
                let expected = ((dx / 2) + (dy / 2)) % 2 == 0;
                assert_eq!(fb.is_black(4 + dx, 4 + dy), expected, "pixel ({dx}, {dy})");
            }
        }
        assert_eq!(fb.count_black(), 32);
    }

    #[test]
    fn test_inverted_polarity() {
        let mut m = matrix(4, 4, CHECKERBOARD);
        m.black_is_one = false;
        let bitmap = PackedBitmap::decode(&m).unwrap();
        assert!(!bitmap.is_black(0, 0));
        assert!(bitmap.is_black(1, 0));
    }

    #[test]
    fn test_non_integer_ratio() {
        // 2x1 source: black, white
        let bitmap = PackedBitmap::decode(&matrix(2, 1, "gA==")).unwrap();
        let mut surface = RecordingSurface::new(10, 10);
        bitmap.blit(&mut surface, DestRect::new(0, 0, 3, 1)).unwrap();
        assert_eq!(
            surface.ops,
            [
                Op::Pixel(0, 0, Color::Black),
                Op::Pixel(1, 0, Color::Black),
                Op::Pixel(2, 0, Color::White),
            ]
        );
    }

    #[test]
    fn test_truncated_data() {
        // 16x16 needs 32 bytes, only 2 supplied
        assert_eq!(
            PackedBitmap::decode(&matrix(16, 16, CHECKERBOARD)),
            Err(ImageError::TruncatedData)
        );
    }

    #[test]
    fn test_invalid_metadata() {
        assert_eq!(
            PackedBitmap::decode(&matrix(0, 4, CHECKERBOARD)),
            Err(ImageError::InvalidMetadata)
        );
        assert_eq!(
            PackedBitmap::decode(&matrix(4, -1, CHECKERBOARD)),
            Err(ImageError::InvalidMetadata)
        );
        assert_eq!(
            PackedBitmap::decode(&matrix(4, 4, "")),
            Err(ImageError::InvalidMetadata)
        );
        let mut m = matrix(4, 4, CHECKERBOARD);
        m.bpp = 8;
        assert_eq!(PackedBitmap::decode(&m), Err(ImageError::InvalidMetadata));
    }

    #[test]
    fn test_bad_base64() {
        assert_eq!(
            PackedBitmap::decode(&matrix(4, 4, "!!not base64!!")),
            Err(ImageError::DecodeFailure)
        );
    }

    #[test]
    fn test_clipped_at_surface_edge() {
        let bitmap = PackedBitmap::decode(&matrix(4, 4, CHECKERBOARD)).unwrap();
        let mut surface = RecordingSurface::new(4, 4);
        bitmap.blit(&mut surface, DestRect::new(-2, 2, 4, 4)).unwrap();
        // only columns 0..2 and rows 2..4 land on the surface
        assert_eq!(surface.ops.len(), 4);
        assert!(surface
            .ops
            .iter()
            .all(|op| matches!(op, Op::Pixel(x, y, _) if (0..2).contains(x) && (2..4).contains(y))));
    }

    #[test]
    fn test_destination_larger_than_surface() {
        // 1x1 black source stretched far past every edge
        let bitmap = PackedBitmap::decode(&matrix(1, 1, "gA==")).unwrap();
        let mut surface = RecordingSurface::new(8, 6);
        bitmap
            .blit(&mut surface, DestRect::new(-100_000, -100_000, 200_000, 200_000))
            .unwrap();
        assert_eq!(surface.ops.len(), 48);
        assert_eq!(surface.ops.first(), Some(&Op::Pixel(0, 0, Color::Black)));
        assert_eq!(surface.ops.last(), Some(&Op::Pixel(7, 5, Color::Black)));

        let mut surface = RecordingSurface::new(8, 6);
        bitmap
            .blit(&mut surface, DestRect::new(0, 0, i32::MAX, i32::MAX))
            .unwrap();
        assert_eq!(surface.ops.len(), 48);
    }

    #[test]
    fn test_destination_off_surface() {
        let bitmap = PackedBitmap::decode(&matrix(1, 1, "gA==")).unwrap();
        let mut surface = RecordingSurface::new(8, 6);
        bitmap.blit(&mut surface, DestRect::new(8, 0, 4, 4)).unwrap();
        bitmap.blit(&mut surface, DestRect::new(0, -4, 4, 4)).unwrap();
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_packed_len_overflow() {
        assert_eq!(packed_len(4, 4), Some(2));
        assert_eq!(packed_len(3, 3), Some(2));
        assert_eq!(packed_len(usize::MAX, 2), None);
    }

    #[test]
    fn test_huge_metadata_is_truncated_not_panic() {
        assert_eq!(
            PackedBitmap::decode(&matrix(65_536, 65_536, CHECKERBOARD)),
            Err(ImageError::TruncatedData)
        );
    }

    #[test]
    fn test_placeholder() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_placeholder(&mut surface, DestRect::new(10, 20, 30, 40)).unwrap();
        assert_eq!(
            surface.ops,
            [
                Op::Rect(10, 20, 30, 40),
                Op::Line(10, 20, 40, 60),
                Op::Line(40, 20, 10, 60),
            ]
        );
    }

    #[test]
    fn test_bit_out_of_range() {
        let bitmap = PackedBitmap::decode(&matrix(4, 4, CHECKERBOARD)).unwrap();
        assert!(!bitmap.bit(4, 0));
        assert!(!bitmap.bit(0, 4));
    }
}
