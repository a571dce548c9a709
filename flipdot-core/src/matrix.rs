//! Logical dot matrix
//!
//! One bit per dot, packed row-major into a fixed-capacity buffer that is
//! sized from the sign geometry at construction. `true` means the dot is
//! flipped to its visible side.

use heapless::Vec;

use crate::traits::PixelSink;

/// Largest number of dots any profile may declare
pub const MAX_DOTS: usize = 4096;

const MAX_MATRIX_BYTES: usize = MAX_DOTS / 8;

/// Geometry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Width is zero
    ZeroWidth,
    /// Height is zero or not a multiple of 8
    HeightNotByteAligned,
    /// More than [`MAX_DOTS`] dots
    TooLarge,
}

/// Check that a geometry can be packed into whole-byte columns
pub fn check_geometry(width: u16, height: u16) -> Result<(), GeometryError> {
    if width == 0 {
        return Err(GeometryError::ZeroWidth);
    }
    if height == 0 || height % 8 != 0 {
        return Err(GeometryError::HeightNotByteAligned);
    }
    if usize::from(width) * usize::from(height) > MAX_DOTS {
        return Err(GeometryError::TooLarge);
    }
    Ok(())
}

/// W×H grid of dot states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: u16,
    height: u16,
    bits: Vec<u8, MAX_MATRIX_BYTES>,
}

impl PixelMatrix {
    /// Create an all-off matrix
    pub fn new(width: u16, height: u16) -> Result<Self, GeometryError> {
        check_geometry(width, height)?;

        let mut bits = Vec::new();
        let len = usize::from(width) * usize::from(height) / 8;
        bits.resize(len, 0).map_err(|_| GeometryError::TooLarge)?;

        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Width in dots
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in dots
    pub const fn height(&self) -> u16 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..i32::from(self.width)).contains(&x) && (0..i32::from(self.height)).contains(&y)
    }

    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        let bit = y * usize::from(self.width) + x;
        (bit / 8, 1 << (bit % 8))
    }

    /// Read a dot; coordinates outside the matrix read as off
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.dot(x as usize, y as usize)
    }

    /// Write a dot; coordinates outside the matrix are ignored
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if self.in_bounds(x, y) {
            self.write(x as usize, y as usize, on);
        }
    }

    /// Read a dot without bounds checking
    ///
    /// The caller must keep `x < width` and `y < height`. Coordinates past
    /// the end of a row alias into the next row; past the last row, this
    /// panics.
    pub fn dot(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = self.locate(x, y);
        self.bits[byte] & mask != 0
    }

    /// Turn a dot on without bounds checking
    ///
    /// Same precondition as [`PixelMatrix::dot`].
    pub fn dot_on(&mut self, x: usize, y: usize) {
        self.write(x, y, true);
    }

    /// Turn a dot off without bounds checking
    ///
    /// Same precondition as [`PixelMatrix::dot`].
    pub fn dot_off(&mut self, x: usize, y: usize) {
        self.write(x, y, false);
    }

    fn write(&mut self, x: usize, y: usize, on: bool) {
        let (byte, mask) = self.locate(x, y);
        if on {
            self.bits[byte] |= mask;
        } else {
            self.bits[byte] &= !mask;
        }
    }

    /// Set every dot to `on`
    pub fn clear(&mut self, on: bool) {
        self.bits.fill(if on { 0xFF } else { 0x00 });
    }

    /// Flip every dot
    pub fn invert(&mut self) {
        for byte in self.bits.iter_mut() {
            *byte = !*byte;
        }
    }

    /// Number of dots currently on
    pub fn count_on(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl PixelSink for PixelMatrix {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.set(x, y, on);
    }
}

#[cfg(feature = "embedded-graphics")]
mod graphics {
    use core::convert::Infallible;

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

    use super::PixelMatrix;

    impl OriginDimensions for PixelMatrix {
        fn size(&self) -> Size {
            Size::new(u32::from(self.width), u32::from(self.height))
        }
    }

    impl DrawTarget for PixelMatrix {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(coord, color) in pixels {
                self.set(coord.x, coord.y, color.is_on());
            }
            Ok(())
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PixelMatrix {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "PixelMatrix[{}x{}, {} on]",
            self.width,
            self.height,
            self.count_on()
        );
    }
}
