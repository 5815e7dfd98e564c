//! Fixed-width binary pixel indices and intensity codes.
//!
//! Every encoder assigns each pixel position a fixed-width binary control
//! pattern. The bookkeeping lives here as integer bitmasks rather than
//! binary strings; `bitstring()` renders the conventional MSB-first form
//! where a textual view is needed.

use crate::error::{EncodeError, EncodeResult};

/// Minimal number of index qubits needed to address `count` positions.
///
/// Computed as `bit_length(count - 1)`, clamped to at least 1 so a
/// single-pixel image still gets an addressable register.
pub fn index_width(count: usize) -> u32 {
    if count <= 2 {
        1
    } else {
        usize::BITS - (count - 1).leading_zeros()
    }
}

/// A pixel position rendered as a fixed-width binary control pattern.
///
/// Bit positions are LSB-first: `bit(0)` is the least significant bit and
/// controls index qubit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryIndex {
    value: usize,
    width: u32,
}

impl BinaryIndex {
    /// Build an index pattern of the given width.
    pub fn new(value: usize, width: u32) -> Self {
        Self { value, width }
    }

    /// The numeric index value.
    pub fn value(&self) -> usize {
        self.value
    }

    /// The pattern width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bit at `pos`, LSB-first.
    pub fn bit(&self, pos: u32) -> bool {
        self.value >> pos & 1 == 1
    }

    /// Positions of zero bits, least significant first.
    ///
    /// These are the qubits that get the X-sandwich when this pattern is
    /// used as an open control.
    pub fn zero_bits(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.width).filter(|&pos| !self.bit(pos))
    }

    /// Positions of one bits, least significant first.
    pub fn one_bits(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.width).filter(|&pos| self.bit(pos))
    }

    /// Number of zero bits in the pattern.
    pub fn count_zeros(&self) -> u32 {
        self.width - (self.value.count_ones().min(self.width))
    }

    /// The pattern as a zero-padded MSB-first bitstring.
    pub fn bitstring(&self) -> String {
        (0..self.width)
            .rev()
            .map(|pos| if self.bit(pos) { '1' } else { '0' })
            .collect()
    }
}

/// Binary index patterns for every position `0..count`, in numeric order,
/// all at the uniform minimal width for `count`.
pub fn binarize_indices(count: usize) -> EncodeResult<Vec<BinaryIndex>> {
    if count == 0 {
        return Err(EncodeError::InvalidInput(
            "pixel count must be positive".into(),
        ));
    }
    let width = index_width(count);
    Ok((0..count).map(|value| BinaryIndex::new(value, width)).collect())
}

/// An 8-bit NEQR intensity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityCode(pub u8);

impl IntensityCode {
    /// Quantize a `[0, 1]` intensity to 8 bits: `round(255 * v)`, clamped.
    pub fn from_value(value: f64) -> Self {
        Self((value * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Whether the code is exactly zero (the pixel costs no gates).
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Positions of set bits, least significant first.
    ///
    /// Each set bit becomes one multi-controlled NOT onto the corresponding
    /// intensity qubit.
    pub fn one_bits(&self) -> impl Iterator<Item = u32> + '_ {
        (0..8).filter(|&pos| self.0 >> pos & 1 == 1)
    }

    /// Recover the normalized intensity, `code / 255`.
    pub fn to_value(&self) -> f64 {
        self.0 as f64 / 255.0
    }
}
