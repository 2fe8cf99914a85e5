/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias γ codes.
//!
//! The γ code of a positive integer `x` is the concatenation of the unary
//! code of `⌊log₂ x⌋` and the binary representation of `x` with its most
//! significant bit removed. The code is *not defined for zero*: callers
//! encoding natural numbers must shift them by one.
//!
//! The universe-relative form performs that shift itself, encoding
//! `x - min + 1`; it therefore cannot encode a relative value of
//! [`u64::MAX`].

use super::{BinaryRead, BinaryWrite, UnaryRead, UnaryWrite};
use crate::traits::{BitSink, BitSource};
use crate::universe::Universe;

/// Returns the length of the γ code for `x`.
///
/// `x` must be positive.
#[must_use]
#[inline(always)]
pub fn len_gamma(x: u64) -> usize {
    debug_assert!(x > 0);
    2 * x.ilog2() as usize + 1
}

/// Trait for writing γ codes.
pub trait GammaWrite: BitSink {
    /// Writes `x` in γ code.
    ///
    /// `x` must be positive.
    #[inline]
    fn write_gamma(&mut self, x: u64) -> Result<usize, Self::Error> {
        debug_assert!(x > 0, "the γ code of zero is not defined");
        let m = x.ilog2() as u64;
        let mut written = self.write_unary(m)?;
        if m > 0 {
            // the low m bits of x, cutting off the leading one
            written += self.write_binary(x, m as usize)?;
        }
        Ok(written)
    }

    /// Writes `x - u.min() + 1` in γ code.
    #[inline(always)]
    fn write_gamma_in(&mut self, x: u64, u: Universe) -> Result<usize, Self::Error> {
        debug_assert!(u.rel(x) < u64::MAX);
        self.write_gamma(u.rel(x) + 1)
    }
}

/// Trait for reading γ codes.
pub trait GammaRead: BitSource {
    /// Reads a γ code.
    #[inline]
    fn read_gamma(&mut self) -> Result<u64, Self::Error> {
        let m = self.read_unary()?;
        debug_assert!(m < 64);
        if m == 0 {
            Ok(1)
        } else {
            Ok(1 << m | self.read_binary(m as usize)?)
        }
    }

    /// Reads a γ code and returns `u.min()` plus the read value minus one.
    #[inline(always)]
    fn read_gamma_in(&mut self, u: Universe) -> Result<u64, Self::Error> {
        Ok(u.abs(self.read_gamma()? - 1))
    }
}

impl<S: ?Sized + BitSink> GammaWrite for S {}
impl<B: ?Sized + BitSource> GammaRead for B {}
