/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits for reading and writing the universal codes.
//!
//! Each code is implemented as a pair of extension traits (e.g.,
//! [`GammaRead`] and [`GammaWrite`]) blanket-implemented for every
//! [`BitSource`](crate::traits::BitSource) and
//! [`BitSink`](crate::traits::BitSink), plus a `len_*` function returning
//! the codeword length in bits.
//!
//! Every code comes in two forms: a plain form over the natural numbers
//! (or, for [binary](crate::codes::binary), an explicit bit width) and a
//! universe-relative form, suffixed `_in`, that encodes the value of an
//! integer relative to the minimum of a
//! [`Universe`](crate::universe::Universe). The γ and δ codes are defined
//! only for positive integers, so their universe-relative forms encode the
//! relative value plus one; as a consequence they cannot encode a relative
//! value of [`u64::MAX`].
//!
//! The first few codewords, written first-bit-first:
//!
//! | x | unary  |   γ   |    δ    | Rice (p = 1) | vbyte (b = 2) |
//! |---|-------:|------:|--------:|-------------:|--------------:|
//! | 0 |    `0` |   —   |    —    |         `00` |         `100` |
//! | 1 |   `10` |   `0` |    `0`  |         `01` |         `110` |
//! | 2 |  `110` | `100` |  `1000` |       `1000` |         `101` |
//! | 3 | `1110` | `101` |  `1001` |       `1001` |         `111` |
//! | 4 |`11110` |`11000`| `10100` |       `1010` |     `000 110` |
//!
//! (Bits of a multi-bit tail are transported as a unit by the sink, so
//! their order inside the unit is the transport's choice; the tables above
//! use the order of the provided least-significant-bit-first transports.)
//!
//! All codes are prefix-free on their legal domains and carry no framing:
//! the decoder must know which code (and which parameters) produced the
//! stream.

pub mod binary;
pub use binary::{BinaryRead, BinaryWrite};

pub mod unary;
pub use unary::{len_unary, UnaryRead, UnaryWrite};

pub mod gamma;
pub use gamma::{len_gamma, GammaRead, GammaWrite};

pub mod delta;
pub use delta::{len_delta, DeltaRead, DeltaWrite};

pub mod rice;
pub use rice::{len_rice, RiceRead, RiceWrite};

pub mod vbyte;
pub use vbyte::{len_vbyte, VbyteRead, VbyteWrite};

pub mod code;
pub use code::Code;
