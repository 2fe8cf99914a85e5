/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Huffman coding.
//!
//! A [`HuffmanTree`] is built from a single scan over an input, assigning
//! short codewords to frequent characters. The tree serializes itself onto
//! a [`BitSink`] ([`HuffmanTree::write_to`]) ahead of the encoded symbols,
//! so a decoder can rebuild the exact same tree
//! ([`HuffmanTree::read_from`]) and the stream is fully self-contained.
//! Construction uses deterministic tie-breaking: equal histograms yield
//! bit-identical trees on every platform, which is what makes the
//! serialization round-trip sound.
//!
//! Symbol-level encoding and decoding are polymorphic over two
//! capabilities: [`encode`] works against any [`HuffmanCodeProvider`] (the
//! tree itself, whose lookups walk leaf-to-root, or the precomputed
//! [`CodeTable`] exported by [`HuffmanTree::table`]), and [`decode`]
//! against any [`TreeNavigator`] (usually [`NodeRef`], the handle returned
//! by [`HuffmanTree::root`]).
//!
//! Codewords are packed least-significant-bit first (see [`HuffmanCode`]):
//! the encoder emits `word & 1` and shifts right, producing bits in
//! exactly the order the decoder's top-down descent reads them.

mod code;
pub use code::HuffmanCode;

mod counter;
pub use counter::Counter;

mod tree;
pub use tree::{CodeTable, HuffmanTree, NodeRef};

use crate::traits::{BitSink, BitSource, Symbol};

/// Capability of mapping characters to their Huffman codes.
pub trait HuffmanCodeProvider<C: Symbol> {
    /// The code for the given character; a zero-length code if the
    /// character has none.
    fn code_for(&self, c: C) -> HuffmanCode;
}

/// Capability of navigating a Huffman tree top-down.
pub trait TreeNavigator: Copy {
    type Symbol: Symbol;

    /// Whether this node is a leaf.
    fn is_leaf(&self) -> bool;

    /// The left child of this node, which must not be a leaf.
    fn left_child(&self) -> Self;

    /// The right child of this node, which must not be a leaf.
    fn right_child(&self) -> Self;

    /// The character represented by this node, which must be a leaf.
    fn symbol(&self) -> Self::Symbol;
}

/// Encodes a character using the code given by the provider.
///
/// The codeword bits are emitted least-significant first. The behavior is
/// undefined if the provider has no code for `x`.
pub fn encode<S, C, P>(sink: &mut S, x: C, codes: &P) -> Result<usize, S::Error>
where
    S: BitSink,
    C: Symbol,
    P: HuffmanCodeProvider<C>,
{
    let code = codes.code_for(x);
    debug_assert!(code.length > 0, "no code for {:?}", x);
    let mut word = code.word;
    for _ in 0..code.length {
        sink.write_bit(word & 1 != 0)?;
        word >>= 1;
    }
    Ok(code.length)
}

/// Decodes one character by navigating the tree from `root`.
///
/// Each bit read descends one level: a zero goes left, a one goes right.
/// The character of the first leaf reached is returned; the number of bits
/// consumed equals its codeword length.
pub fn decode<B, N>(src: &mut B, root: N) -> Result<N::Symbol, B::Error>
where
    B: BitSource,
    N: TreeNavigator,
{
    let mut v = root;
    while !v.is_leaf() {
        v = if src.read_bit()? {
            v.right_child()
        } else {
            v.left_child()
        };
    }
    Ok(v.symbol())
}
