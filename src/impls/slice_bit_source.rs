/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{BitSource, EndOfStream};

/// An implementation of [`BitSource`] reading bits from a `&[u64]` slice.
///
/// This is the matching source for
/// [`VecBitSink`](crate::impls::VecBitSink): bits are extracted
/// least-significant-bit first from consecutive words. Reading past the
/// end of the slice fails with [`EndOfStream`].
///
/// A bit buffer twice the word size holds bits taken from the slice but
/// not yet handed out, so a read of up to 64 bits never needs more than
/// one refill.
#[derive(Debug, Clone)]
pub struct SliceBitSource<'a> {
    words: &'a [u64],
    /// Index of the next word to pull into the buffer.
    position: usize,
    /// The lowest `valid_bits` bits are valid, the rest are zero.
    buffer: u128,
    valid_bits: usize,
}

impl<'a> SliceBitSource<'a> {
    /// Creates a source over the given words.
    pub fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            position: 0,
            buffer: 0,
            valid_bits: 0,
        }
    }

    /// The number of bits extracted so far.
    pub fn num_bits_read(&self) -> u64 {
        self.position as u64 * 64 - self.valid_bits as u64
    }
}

impl BitSource for SliceBitSource<'_> {
    type Error = EndOfStream;

    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        debug_assert!(n <= 64, "too many bits: {} > 64", n);

        if n == 0 {
            return Ok(0);
        }

        while self.valid_bits < n {
            let Some(&word) = self.words.get(self.position) else {
                return Err(EndOfStream {
                    bit_pos: self.num_bits_read(),
                });
            };
            self.buffer |= (word as u128) << self.valid_bits;
            self.valid_bits += 64;
            self.position += 1;
        }

        let result = (self.buffer & ((1_u128 << n) - 1)) as u64;
        self.buffer >>= n;
        self.valid_bits -= n;
        Ok(result)
    }

    #[inline]
    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        if self.valid_bits == 0 {
            let Some(&word) = self.words.get(self.position) else {
                return Err(EndOfStream {
                    bit_pos: self.num_bits_read(),
                });
            };
            self.buffer = word as u128;
            self.valid_bits = 64;
            self.position += 1;
        }

        let bit = self.buffer & 1 != 0;
        self.buffer >>= 1;
        self.valid_bits -= 1;
        Ok(bit)
    }
}
