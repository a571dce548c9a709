//! Pixel sink capability

/// Anything that accepts on/off dots by coordinate
///
/// Implementations must ignore coordinates outside `0..width` /
/// `0..height` without mutating anything. Shapes and text come from
/// `embedded-graphics` drawing on [`crate::PixelMatrix`] directly.
pub trait PixelSink {
    /// Width in dots
    fn width(&self) -> u16;

    /// Height in dots
    fn height(&self) -> u16;

    /// Set one dot; out-of-range coordinates are ignored
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);
}
