/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::convert::Infallible;

use crate::traits::BitSink;

/// An implementation of [`BitSink`] packing bits into a `Vec<u64>`.
///
/// Bits are stored least-significant-bit first: the first bit written to
/// the sink lands in bit 0 of the first word. A bit buffer holds bits
/// until a full word can be pushed onto the vector, so
/// [`flush`](BitSink::flush) (or [`into_vec`](VecBitSink::into_vec),
/// which flushes) must be called before handing the words to a
/// [`SliceBitSource`](crate::impls::SliceBitSource). Flushing pads the
/// stream with zeros up to the next word boundary.
#[derive(Debug, Clone, Default)]
pub struct VecBitSink {
    words: Vec<u64>,
    /// Bits not yet pushed onto `words`. Only the lowest `bits_in_buffer`
    /// bits are valid, the rest are zero.
    buffer: u64,
    bits_in_buffer: usize,
    bits_written: u64,
}

impl VecBitSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with space for `num_bits` bits.
    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(num_bits.div_ceil(64)),
            buffer: 0,
            bits_in_buffer: 0,
            bits_written: 0,
        }
    }

    #[inline(always)]
    fn flush_buffer(&mut self) {
        if self.bits_in_buffer > 0 {
            self.words.push(self.buffer);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    /// Flushes and returns the written words.
    pub fn into_vec(mut self) -> Vec<u64> {
        self.flush_buffer();
        self.words
    }
}

impl BitSink for VecBitSink {
    type Error = Infallible;

    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        debug_assert!(n <= 64, "too many bits: {} > 64", n);
        debug_assert!(
            value & (1_u128 << n).wrapping_sub(1) as u64 == value,
            "value {:#x} does not fit in {} bits",
            value,
            n
        );

        if n == 0 {
            return Ok(0);
        }

        // bits_in_buffer < 64 here, so the shifts below stay in range
        let space_left = 64 - self.bits_in_buffer;
        if n < space_left {
            self.buffer |= value << self.bits_in_buffer;
            self.bits_in_buffer += n;
        } else {
            self.words.push(self.buffer | (value << self.bits_in_buffer));
            self.buffer = if n == space_left { 0 } else { value >> space_left };
            self.bits_in_buffer = n - space_left;
        }

        self.bits_written += n as u64;
        Ok(n)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flush_buffer();
        Ok(())
    }

    #[inline(always)]
    fn num_bits_written(&self) -> u64 {
        self.bits_written
    }
}
