/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-width binary codes.
//!
//! The binary code of an integer with a given number of bits is simply its
//! binary representation, transported as a single unit by the sink. The
//! universe-relative form uses the universe's worst-case entropy as the
//! width, so any value of the universe fits.

use crate::traits::{BitSink, BitSource};
use crate::universe::Universe;

/// Trait for writing binary codes.
pub trait BinaryWrite: BitSink {
    /// Writes the lowest `bits` bits of `x`.
    #[inline(always)]
    fn write_binary(&mut self, x: u64, bits: usize) -> Result<usize, Self::Error> {
        debug_assert!(bits <= 64);
        self.write_bits(x & (1_u128 << bits).wrapping_sub(1) as u64, bits)
    }

    /// Writes `x` relative to the minimum of `u`, using
    /// [`u.entropy()`](Universe::entropy) bits.
    #[inline(always)]
    fn write_binary_in(&mut self, x: u64, u: Universe) -> Result<usize, Self::Error> {
        self.write_binary(u.rel(x), u.entropy())
    }
}

/// Trait for reading binary codes.
pub trait BinaryRead: BitSource {
    /// Reads a `bits`-bit binary code.
    #[inline(always)]
    fn read_binary(&mut self, bits: usize) -> Result<u64, Self::Error> {
        self.read_bits(bits)
    }

    /// Reads an [`u.entropy()`](Universe::entropy)-bit binary code and
    /// adds the minimum of `u`.
    #[inline(always)]
    fn read_binary_in(&mut self, u: Universe) -> Result<u64, Self::Error> {
        Ok(u.abs(self.read_bits(u.entropy())?))
    }
}

impl<S: ?Sized + BitSink> BinaryWrite for S {}
impl<B: ?Sized + BitSource> BinaryRead for B {}
