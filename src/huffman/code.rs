/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// A Huffman codeword.
///
/// `word` holds the codeword least-significant-bit first, occupying the
/// lowest `length` bits: bit 0 decides whether to go left (0) or right (1)
/// from the root of the tree, and bit `length - 1` navigates the final hop
/// to the leaf. This order makes extraction during encoding a plain
/// shift-and-mask loop that emits bits exactly as the decoder's top-down
/// descent consumes them.
///
/// A length of zero means "no code": it is what lookups return for
/// characters the tree does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct HuffmanCode {
    /// The codeword, packed least-significant-bit first.
    pub word: u64,
    /// The length of the codeword in bits.
    pub length: usize,
}

impl core::fmt::Display for HuffmanCode {
    /// Prints the codeword bits in the order they are emitted.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for i in 0..self.length {
            write!(f, "{}", self.word >> i & 1)?;
        }
        Ok(())
    }
}
