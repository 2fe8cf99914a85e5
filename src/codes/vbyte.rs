/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Variable-byte codes with a configurable block size.
//!
//! The integer to be encoded is split into blocks of `b` bits, least
//! significant block first. Every block is preceded by a flag bit telling
//! the decoder whether the block is the last one: zero for continuation,
//! one for the block containing the integer's highest set bit (or the
//! single all-zero block when encoding zero). With `b = 7` and a
//! byte-packed transport this is the classical byte-aligned vbyte code.

use super::{BinaryRead, BinaryWrite};
use crate::traits::{BitSink, BitSource};
use crate::universe::Universe;

/// Returns the length of the vbyte code for `x` with block size `b`.
#[must_use]
#[inline(always)]
pub fn len_vbyte(x: u64, b: usize) -> usize {
    debug_assert!(b >= 1);
    let blocks = 1 + (64 - x.leading_zeros() as usize).saturating_sub(b).div_ceil(b);
    blocks * (b + 1)
}

/// Trait for writing vbyte codes.
pub trait VbyteWrite: BitSink {
    /// Writes `x` in vbyte code with block size `b`.
    #[inline]
    fn write_vbyte(&mut self, x: u64, b: usize) -> Result<usize, Self::Error> {
        debug_assert!(b >= 1);
        let mut bits = 64 - x.leading_zeros() as usize;
        let mut x = x;
        let mut written = 0;
        while bits > b {
            written += self.write_bit(false)?;
            written += self.write_binary(x, b)?;
            x >>= b;
            bits -= b;
        }
        written += self.write_bit(true)?;
        written += self.write_binary(x, b)?;
        Ok(written)
    }

    /// Writes `x - u.min()` in vbyte code with block size `b`.
    #[inline(always)]
    fn write_vbyte_in(&mut self, x: u64, b: usize, u: Universe) -> Result<usize, Self::Error> {
        self.write_vbyte(u.rel(x), b)
    }
}

/// Trait for reading vbyte codes.
pub trait VbyteRead: BitSource {
    /// Reads a vbyte code with block size `b`.
    #[inline]
    fn read_vbyte(&mut self, b: usize) -> Result<u64, Self::Error> {
        let mut x = 0;
        let mut shift = 0;
        while !self.read_bit()? {
            x |= self.read_binary(b)? << shift;
            shift += b;
        }
        Ok(x | self.read_binary(b)? << shift)
    }

    /// Reads a vbyte code with block size `b` and adds the minimum of
    /// `u`.
    #[inline(always)]
    fn read_vbyte_in(&mut self, b: usize, u: Universe) -> Result<u64, Self::Error> {
        Ok(u.abs(self.read_vbyte(b)?))
    }
}

impl<S: ?Sized + BitSink> VbyteWrite for S {}
impl<B: ?Sized + BitSource> VbyteRead for B {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::{SliceBitSource, VecBitSink};

    #[test]
    fn test_bit_layout() -> anyhow::Result<()> {
        // codewords packed first-bit-first into the low bits
        for (x, b, word, len) in [
            (0, 3, 0b000_1, 4),
            (7, 3, 0b111_1, 4),
            (8, 3, 0b001_1_000_0, 8),
            (63, 3, 0b111_1_111_0, 8),
            (64, 3, 0b001_1_000_0_000_0, 12),
            (511, 3, 0b111_1_111_0_111_0, 12),
            (512, 3, 0b001_1_000_0_000_0_000_0, 16),
            (0, 5, 0b00000_1, 6),
            (31, 5, 0b11111_1, 6),
            (32, 5, 0b00001_1_00000_0, 12),
            (63, 5, 0b00001_1_11111_0, 12),
            (64, 5, 0b00010_1_00000_0, 12),
            (1023, 5, 0b11111_1_11111_0, 12),
            (1024, 5, 0b00001_1_00000_0_00000_0, 18),
        ] {
            let mut sink = VecBitSink::new();
            assert_eq!(sink.write_vbyte(x, b)?, len);
            assert_eq!(len, len_vbyte(x, b));
            assert_eq!(sink.into_vec(), vec![word]);

            let words = [word];
            let mut src = SliceBitSource::new(&words);
            assert_eq!(src.read_vbyte(b)?, x);
        }
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> anyhow::Result<()> {
        for b in [1, 3, 7, 8, 16] {
            let mut sink = VecBitSink::new();
            for x in 0..500 {
                assert_eq!(sink.write_vbyte(x, b)?, len_vbyte(x, b));
            }
            sink.write_vbyte(u64::MAX, b)?;
            let words = sink.into_vec();

            let mut src = SliceBitSource::new(&words);
            for x in 0..500 {
                assert_eq!(src.read_vbyte(b)?, x);
            }
            assert_eq!(src.read_vbyte(b)?, u64::MAX);
        }
        Ok(())
    }

    #[test]
    fn test_universe() -> anyhow::Result<()> {
        let u = Universe::new(10, 20);
        let mut sink = VecBitSink::new();
        sink.write_vbyte_in(18, 8, u)?;
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        assert_eq!(src.read_vbyte_in(8, u)?, 18);
        Ok(())
    }
}
