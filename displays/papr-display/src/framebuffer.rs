//! In-memory 1-bit frame buffer
//!
//! Row-major, one bit per pixel, MSB-first within each byte. A set bit is a
//! black pixel ([`BinaryColor::On`]). This is the layout e-paper controllers
//! expect in their RAM, so the buffer can be streamed to a panel unchanged.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Monochrome frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl FrameBuffer {
    /// Create a white buffer of the given size
    pub fn new(width: u32, height: u32) -> Self {
        let stride = Self::stride_for(width);
        Self {
            width,
            height,
            bits: vec![0; stride * height as usize],
        }
    }

    fn stride_for(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        Self::stride_for(self.width)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let byte = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80 >> (x as usize % 8);
        Some((byte, mask))
    }

    /// Whether the pixel at (x, y) is black; out-of-bounds reads are white
    pub fn is_black(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some((byte, mask)) => self.bits[byte] & mask != 0,
            None => false,
        }
    }

    /// Set one pixel; out-of-bounds writes are ignored
    pub fn set(&mut self, x: i32, y: i32, black: bool) {
        if let Some((byte, mask)) = self.index(x, y) {
            if black {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Fill every pixel with one color
    pub fn fill(&mut self, black: bool) {
        let value = if black { 0xFF } else { 0x00 };
        self.bits.iter_mut().for_each(|b| *b = value);
    }

    /// Packed pixel data
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Number of black pixels
    pub fn count_black(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.is_black(x, y) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}
