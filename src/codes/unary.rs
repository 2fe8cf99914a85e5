/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary codes.
//!
//! The unary code of a natural number `x` is `x` one-bits followed by a
//! zero bit. It is the optimal code for the geometric distribution of
//! ratio 1/2, and the building block of the [γ](crate::codes::gamma) code.

use crate::traits::{BitSink, BitSource};
use crate::universe::Universe;

/// Returns the length of the unary code for `x`.
#[must_use]
#[inline(always)]
pub fn len_unary(x: u64) -> usize {
    x as usize + 1
}

/// Trait for writing unary codes.
pub trait UnaryWrite: BitSink {
    /// Writes `x` in unary.
    #[inline]
    fn write_unary(&mut self, x: u64) -> Result<usize, Self::Error> {
        debug_assert_ne!(x, u64::MAX);
        let mut remaining = x;
        while remaining >= 64 {
            self.write_bits(u64::MAX, 64)?;
            remaining -= 64;
        }
        if remaining > 0 {
            self.write_bits(u64::MAX >> (64 - remaining), remaining as usize)?;
        }
        self.write_bit(false)?;
        Ok(x as usize + 1)
    }

    /// Writes `x` relative to the minimum of `u` in unary.
    #[inline(always)]
    fn write_unary_in(&mut self, x: u64, u: Universe) -> Result<usize, Self::Error> {
        self.write_unary(u.rel(x))
    }
}

/// Trait for reading unary codes.
pub trait UnaryRead: BitSource {
    /// Reads a unary code.
    #[inline]
    fn read_unary(&mut self) -> Result<u64, Self::Error> {
        let mut x = 0;
        while self.read_bit()? {
            x += 1;
        }
        Ok(x)
    }

    /// Reads a unary code and adds the minimum of `u`.
    #[inline(always)]
    fn read_unary_in(&mut self, u: Universe) -> Result<u64, Self::Error> {
        Ok(u.abs(self.read_unary()?))
    }
}

impl<S: ?Sized + BitSink> UnaryWrite for S {}
impl<B: ?Sized + BitSource> UnaryRead for B {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::{SliceBitSource, VecBitSink};
    use crate::traits::BitSink;

    #[test]
    fn test_bit_layout() -> anyhow::Result<()> {
        let mut sink = VecBitSink::new();
        assert_eq!(sink.write_unary(3)?, 4);
        assert_eq!(sink.num_bits_written(), 4);
        // 1110 first-bit-first
        assert_eq!(sink.into_vec(), vec![0b0111]);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> anyhow::Result<()> {
        let mut sink = VecBitSink::new();
        for x in 0..300 {
            assert_eq!(sink.write_unary(x)?, len_unary(x));
        }
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        for x in 0..300 {
            assert_eq!(src.read_unary()?, x);
        }
        Ok(())
    }

    #[test]
    fn test_universe() -> anyhow::Result<()> {
        let u = Universe::new(10, 20);
        let mut sink = VecBitSink::new();
        assert_eq!(sink.write_unary_in(11, u)?, 2);
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        assert_eq!(src.read_unary_in(u)?, 11);
        Ok(())
    }
}
