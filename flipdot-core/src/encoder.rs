//! Dot matrix to sign bytestream packing
//!
//! The sign controller takes its image column by column, left to right.
//! Each column is `height / 8` bytes; within byte `j` of a column, bit `k`
//! is the dot at row `8 * j + k`. For a 16-row sign that gives two bytes
//! per column: rows 0-7 (bit 0 = row 0) then rows 8-15 (bit 7 = row 15).

use heapless::Vec;

use crate::matrix::{PixelMatrix, MAX_DOTS};

/// Largest bytestream any profile may produce
pub const MAX_BYTESTREAM_LEN: usize = MAX_DOTS / 8;

/// Packed image, regenerated on every update
pub type Bytestream = Vec<u8, MAX_BYTESTREAM_LEN>;

/// Bytestream length for a geometry
pub const fn stream_len(width: u16, height: u16) -> usize {
    width as usize * height as usize / 8
}

/// Pack one column into `out`, which must hold `height / 8` bytes
pub fn encode_column(matrix: &PixelMatrix, x: usize, out: &mut [u8]) {
    for (j, byte) in out.iter_mut().enumerate() {
        *byte = (0..8).fold(0u8, |acc, k| {
            if matrix.dot(x, 8 * j + k) {
                acc | (1 << k)
            } else {
                acc
            }
        });
    }
}

/// Rebuild the whole bytestream from the matrix
pub fn encode(matrix: &PixelMatrix, stream: &mut Bytestream) {
    let column_len = usize::from(matrix.height()) / 8;
    stream.clear();
    // PixelMatrix::new caps the matrix at MAX_DOTS, so this always fits
    let resized = stream.resize(stream_len(matrix.width(), matrix.height()), 0);
    debug_assert!(resized.is_ok(), "matrix larger than MAX_BYTESTREAM_LEN");

    for (x, column) in stream.chunks_exact_mut(column_len).enumerate() {
        encode_column(matrix, x, column);
    }
}
