/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! In-memory implementations of [`BitSink`](crate::traits::BitSink) and
//! [`BitSource`](crate::traits::BitSource).
//!
//! [`VecBitSink`] packs bits least-significant-bit first into a vector of
//! `u64` words; [`SliceBitSource`] reads them back from a word slice in
//! the same order. Together they form the matching sink/source pairing
//! required by the transport contracts: any value written with
//! `write_bits(v, n)` comes back identically from `read_bits(n)`.
//!
//! ## Examples
//!
//! ```
//! use bitcodes::prelude::*;
//!
//! let mut sink = VecBitSink::new();
//! sink.write_gamma(42).unwrap();
//! let words = sink.into_vec();
//!
//! let mut src = SliceBitSource::new(&words);
//! assert_eq!(src.read_gamma().unwrap(), 42);
//! ```

mod vec_bit_sink;
pub use vec_bit_sink::VecBitSink;

mod slice_bit_source;
pub use slice_bit_source::SliceBitSource;
