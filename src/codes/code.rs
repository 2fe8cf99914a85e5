/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Run-time selection of a universal code.
//!
//! [`Code`] names each code of this crate together with its parameters,
//! so that the choice of code can be made dynamically — from a
//! configuration, or by measuring which code compresses a given sequence
//! best — while the codecs themselves stay statically dispatched
//! underneath. All values pass through the universe-relative forms; use
//! [`Universe::umax()`](crate::universe::Universe::umax) when no tighter
//! universe is known.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::{len_delta, len_gamma, len_rice, len_unary, len_vbyte};
use super::{
    BinaryRead, BinaryWrite, DeltaRead, DeltaWrite, GammaRead, GammaWrite, RiceRead, RiceWrite,
    UnaryRead, UnaryWrite, VbyteRead, VbyteWrite,
};
use crate::traits::{BitSink, BitSource};
use crate::universe::Universe;

/// An enum of all the codes supported by this crate, with their
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[non_exhaustive]
pub enum Code {
    /// Fixed-width binary over the universe entropy.
    Binary,
    Unary,
    Gamma,
    Delta,
    Rice { log2_b: usize },
    Vbyte { block: usize },
}

impl Code {
    /// Writes `x` from the universe `u` using this code.
    #[inline]
    pub fn write<S: BitSink>(
        &self,
        sink: &mut S,
        x: u64,
        u: Universe,
    ) -> Result<usize, S::Error> {
        match self {
            Code::Binary => sink.write_binary_in(x, u),
            Code::Unary => sink.write_unary_in(x, u),
            Code::Gamma => sink.write_gamma_in(x, u),
            Code::Delta => sink.write_delta_in(x, u),
            Code::Rice { log2_b } => sink.write_rice_in(x, *log2_b, u),
            Code::Vbyte { block } => sink.write_vbyte_in(x, *block, u),
        }
    }

    /// Reads a value of the universe `u` using this code.
    #[inline]
    pub fn read<B: BitSource>(&self, src: &mut B, u: Universe) -> Result<u64, B::Error> {
        match self {
            Code::Binary => src.read_binary_in(u),
            Code::Unary => src.read_unary_in(u),
            Code::Gamma => src.read_gamma_in(u),
            Code::Delta => src.read_delta_in(u),
            Code::Rice { log2_b } => src.read_rice_in(*log2_b, u),
            Code::Vbyte { block } => src.read_vbyte_in(*block, u),
        }
    }

    /// Computes how many bits this code spends on `x` from the universe
    /// `u`.
    #[must_use]
    #[inline]
    pub fn len(&self, x: u64, u: Universe) -> usize {
        match self {
            Code::Binary => u.entropy(),
            Code::Unary => len_unary(u.rel(x)),
            Code::Gamma => len_gamma(u.rel(x) + 1),
            Code::Delta => len_delta(u.rel(x) + 1),
            Code::Rice { log2_b } => len_rice(u.rel(x), *log2_b),
            Code::Vbyte { block } => len_vbyte(u.rel(x), *block),
        }
    }
}
