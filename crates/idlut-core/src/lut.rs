//! Fixed-size grayscale lookup tables.
//!
//! A [`Lut`] maps each of the 256 input intensities to an arbitrary signed
//! output value. A [`ByteLut`] is its display-ready form, every entry a `u8`.
//!
//! # Linear windowing
//! [`Lut::linear`] builds the classic window/level ramp:
//! ```text
//! i <= in_min            -> out_min
//! i >= in_max            -> out_max
//! in_min < i < in_max    -> out_min + round((i - in_min) × (out_max - out_min) / (in_max - in_min))
//! ```
//! Arithmetic is exact integer math, rounding half away from zero,
//! so `linear(0, 255, 0, 255)` is the identity.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::LutError;
use crate::params::NarrowingPolicy;

/// Number of entries in every LUT.
pub const LUT_SIZE: usize = 256;

/// Largest value representable in a [`ByteLut`] entry.
const BYTE_MAX: i64 = u8::MAX as i64;

/// A 256-entry lookup table with signed, arbitrary-range outputs.
///
/// Serializes as a flat array of 256 numbers. Deserialization rejects
/// arrays of any other length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Lut {
    entries: [i64; LUT_SIZE],
}

impl Lut {
    /// The identity mapping, `table[i] == i`.
    pub fn identity() -> Self {
        Self {
            entries: std::array::from_fn(|i| i as i64),
        }
    }

    /// Build a piecewise-linear window LUT.
    ///
    /// Indices at or below `input_min` map to `output_min`, indices at or
    /// above `input_max` map to `output_max`, and indices in between are
    /// interpolated. `output_min > output_max` yields a descending ramp.
    ///
    /// When `input_min == input_max` the ramp collapses into a step:
    /// indices below the threshold map to `output_min`, the rest to
    /// `output_max`.
    ///
    /// Returns [`LutError::InvertedInputRange`] if `input_min > input_max`.
    pub fn linear(
        input_min: i32,
        input_max: i32,
        output_min: i32,
        output_max: i32,
    ) -> Result<Self, LutError> {
        if input_min > input_max {
            return Err(LutError::InvertedInputRange {
                input_min,
                input_max,
            });
        }

        let in_lo = i64::from(input_min);
        let in_hi = i64::from(input_max);
        let out_lo = i64::from(output_min);
        let out_hi = i64::from(output_max);
        let span = in_hi - in_lo;
        let rise = out_hi - out_lo;

        if span == 0 {
            tracing::debug!(threshold = input_min, "degenerate input window, building step LUT");
        }

        let entries = std::array::from_fn(|i| {
            let x = i as i64;
            if span == 0 {
                if x < in_lo { out_lo } else { out_hi }
            } else if x <= in_lo {
                out_lo
            } else if x >= in_hi {
                out_hi
            } else {
                let num = i128::from(x - in_lo) * i128::from(rise);
                out_lo + div_round(num, i128::from(span)) as i64
            }
        });

        tracing::debug!(
            input_min,
            input_max,
            output_min,
            output_max,
            "computed linear LUT"
        );

        Ok(Self { entries })
    }

    /// Build a LUT from a slice, which must hold exactly [`LUT_SIZE`] entries.
    pub fn from_slice(values: &[i64]) -> Result<Self, LutError> {
        let entries = <[i64; LUT_SIZE]>::try_from(values).map_err(|_| LutError::Length {
            expected: LUT_SIZE,
            actual: values.len(),
        })?;
        Ok(Self { entries })
    }

    /// Output value for an input intensity.
    #[inline]
    pub fn get(&self, index: u8) -> i64 {
        self.entries[usize::from(index)]
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.entries
    }

    pub fn as_array(&self) -> &[i64; LUT_SIZE] {
        &self.entries
    }

    /// Smallest and largest entry, as `(min, max)`.
    pub fn range(&self) -> (i64, i64) {
        self.entries
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// True if every entry lies in `0..=255`. Negative entries fail.
    pub fn is_8bit(&self) -> bool {
        self.entries.iter().all(|v| (0..=BYTE_MAX).contains(v))
    }

    /// Narrow to a [`ByteLut`], clamping each entry to `0..=255`.
    ///
    /// The source table is left untouched. Logs a warning when any entry
    /// had to be clamped.
    pub fn to_byte_lut(&self) -> ByteLut {
        let mut clamped = 0usize;
        let entries = std::array::from_fn(|i| {
            let v = self.entries[i];
            let c = v.clamp(0, BYTE_MAX);
            if c != v {
                clamped += 1;
            }
            c as u8
        });

        if clamped > 0 {
            let (lo, hi) = self.range();
            tracing::warn!(clamped, lo, hi, "LUT entries outside 0..=255 were clamped");
        }

        ByteLut { entries }
    }

    /// Narrow to a [`ByteLut`], failing on the first entry outside `0..=255`.
    pub fn try_to_byte_lut(&self) -> Result<ByteLut, LutError> {
        let mut entries = [0u8; LUT_SIZE];
        for (index, (dst, &value)) in entries.iter_mut().zip(&self.entries).enumerate() {
            *dst = u8::try_from(value).map_err(|_| LutError::OutOfRange { index, value })?;
        }
        Ok(ByteLut { entries })
    }

    /// Narrow to a [`ByteLut`] using the given policy.
    pub fn narrow(&self, policy: NarrowingPolicy) -> Result<ByteLut, LutError> {
        match policy {
            NarrowingPolicy::Clamp => Ok(self.to_byte_lut()),
            NarrowingPolicy::Reject => self.try_to_byte_lut(),
        }
    }
}

impl Index<u8> for Lut {
    type Output = i64;

    fn index(&self, index: u8) -> &i64 {
        &self.entries[usize::from(index)]
    }
}

impl From<[i64; LUT_SIZE]> for Lut {
    fn from(entries: [i64; LUT_SIZE]) -> Self {
        Self { entries }
    }
}

impl TryFrom<&[i64]> for Lut {
    type Error = LutError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl TryFrom<Vec<i64>> for Lut {
    type Error = LutError;

    fn try_from(values: Vec<i64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<Lut> for Vec<i64> {
    fn from(lut: Lut) -> Self {
        lut.entries.to_vec()
    }
}

impl From<ByteLut> for Lut {
    fn from(lut: ByteLut) -> Self {
        lut.to_lut()
    }
}

/// A 256-entry lookup table with 8-bit outputs, ready for display.
///
/// Serializes as a flat array of 256 numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct ByteLut {
    entries: [u8; LUT_SIZE],
}

impl ByteLut {
    pub fn identity() -> Self {
        Self {
            entries: std::array::from_fn(|i| i as u8),
        }
    }

    /// Build a LUT from a slice, which must hold exactly [`LUT_SIZE`] entries.
    pub fn from_slice(values: &[u8]) -> Result<Self, LutError> {
        let entries = <[u8; LUT_SIZE]>::try_from(values).map_err(|_| LutError::Length {
            expected: LUT_SIZE,
            actual: values.len(),
        })?;
        Ok(Self { entries })
    }

    #[inline]
    pub fn get(&self, index: u8) -> u8 {
        self.entries[usize::from(index)]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.entries
    }

    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.entries
    }

    /// Negative-image LUT: every output `v` becomes `255 - v`.
    pub fn invert(&self) -> Self {
        Self {
            entries: self.entries.map(|v| u8::MAX - v),
        }
    }

    /// Widen back to a [`Lut`]. Lossless.
    pub fn to_lut(&self) -> Lut {
        Lut {
            entries: self.entries.map(i64::from),
        }
    }

    /// Remap every pixel through this table.
    pub fn apply_in_place(&self, pixels: &mut [u8]) {
        for px in pixels {
            *px = self.entries[usize::from(*px)];
        }
    }
}

impl Index<u8> for ByteLut {
    type Output = u8;

    fn index(&self, index: u8) -> &u8 {
        &self.entries[usize::from(index)]
    }
}

impl From<[u8; LUT_SIZE]> for ByteLut {
    fn from(entries: [u8; LUT_SIZE]) -> Self {
        Self { entries }
    }
}

impl TryFrom<&[u8]> for ByteLut {
    type Error = LutError;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl TryFrom<Vec<u8>> for ByteLut {
    type Error = LutError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<ByteLut> for Vec<u8> {
    fn from(lut: ByteLut) -> Self {
        lut.entries.to_vec()
    }
}

/// Procedural alias for [`Lut::linear`].
pub fn compute_linear(
    input_min: i32,
    input_max: i32,
    output_min: i32,
    output_max: i32,
) -> Result<Lut, LutError> {
    Lut::linear(input_min, input_max, output_min, output_max)
}

/// Procedural alias for [`Lut::to_byte_lut`].
pub fn to_byte_lut(lut: &Lut) -> ByteLut {
    lut.to_byte_lut()
}

/// Procedural alias for [`Lut::is_8bit`].
pub fn check_is_8bit(lut: &Lut) -> bool {
    lut.is_8bit()
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round(num: i128, den: i128) -> i128 {
    let half = den / 2;
    if num >= 0 {
        (num + half) / den
    } else {
        -((-num + half) / den)
    }
}
