/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use super::{Counter, HuffmanCode, HuffmanCodeProvider, TreeNavigator};
use crate::codes::{BinaryRead, BinaryWrite, DeltaRead, DeltaWrite};
use crate::traits::{BitSink, BitSource, Symbol};
use crate::universe::{Range, Universe};

/// A node of a [`HuffmanTree`].
///
/// Nodes live in the tree's arena and refer to each other by index, so
/// the parent back-links do not create ownership cycles. An inner node
/// always has exactly two children.
#[derive(Debug, Clone)]
struct Node<C> {
    freq: u64,
    parent: Option<u32>,
    kind: NodeKind<C>,
}

#[derive(Debug, Clone)]
enum NodeKind<C> {
    Leaf(C),
    Inner { left: u32, right: u32 },
}

/// An entry of the construction queue.
///
/// Entries are ordered so that the highest-priority pop is the lowest
/// frequency, breaking ties deterministically: inner nodes come before
/// leaves, equal-frequency leaves are ordered by character, and
/// equal-frequency inner nodes by creation order. A total order here is
/// what guarantees bit-identical trees for equal histograms across
/// platforms and runs.
struct QueueEntry {
    freq: u64,
    is_leaf: bool,
    /// The character for leaves, the arena index for inner nodes.
    tie: u64,
    node: u32,
}

impl QueueEntry {
    #[inline(always)]
    fn key(&self) -> (u64, bool, u64) {
        (self.freq, self.is_leaf, self.tie)
    }
}

impl Ord for QueueEntry {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for QueueEntry {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

/// A Huffman tree.
///
/// The tree owns a stable arena of nodes and a lookup from character to
/// leaf. It is immutable once built and may be shared freely by
/// concurrent readers.
#[derive(Debug, Clone)]
pub struct HuffmanTree<C: Symbol> {
    nodes: Vec<Node<C>>,
    root: Option<u32>,
    leaves: HashMap<C, u32>,
}

impl<C: Symbol> Default for HuffmanTree<C> {
    /// The empty tree.
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: HashMap::new(),
        }
    }
}

impl<C: Symbol> HuffmanTree<C> {
    /// Builds the Huffman tree for the given input.
    ///
    /// The input is scanned once into a [`Counter`] and the tree is built
    /// from the resulting histogram, see
    /// [`from_counts`](HuffmanTree::from_counts). An empty input yields
    /// the empty tree.
    pub fn new<I>(input: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        Self::from_counts(&input.into_iter().collect())
    }

    /// Builds the Huffman tree for the given histogram.
    ///
    /// One leaf is created per considered character, including characters
    /// with an explicit count of zero. If the histogram holds exactly one
    /// character `c`, a companion leaf for `!c` with frequency zero is
    /// added so that the result is a proper tree; `c` then gets a one-bit
    /// code.
    ///
    /// The tree is built bottom-up with a priority queue, repeatedly
    /// merging the two least frequent nodes. The node popped first
    /// becomes the right child. Ties are broken deterministically (see
    /// the ordering of the construction queue), so equal histograms
    /// produce identical trees, codeword for codeword.
    pub fn from_counts(histogram: &Counter<C>) -> Self {
        if histogram.is_empty() {
            return Self::default();
        }

        let mut entries: Vec<(C, u64)> = histogram.iter().map(|(&c, &n)| (c, n)).collect();
        if entries.len() == 1 {
            // since c is the only character, !c is a new one
            let c = entries[0].0;
            entries.push((!c, 0));
        }

        let sigma = entries.len();
        let mut nodes = Vec::with_capacity(2 * sigma - 1);
        let mut leaves = HashMap::with_capacity(sigma);
        let mut queue = BinaryHeap::with_capacity(sigma);

        for (c, freq) in entries {
            let index = nodes.len() as u32;
            nodes.push(Node {
                freq,
                parent: None,
                kind: NodeKind::Leaf(c),
            });
            leaves.insert(c, index);
            queue.push(Reverse(QueueEntry {
                freq,
                is_leaf: true,
                tie: c.to_u64(),
                node: index,
            }));
        }

        for _ in 1..sigma {
            let Reverse(r) = queue.pop().unwrap();
            let Reverse(l) = queue.pop().unwrap();
            debug_assert!(r.freq <= l.freq);

            let index = nodes.len() as u32;
            let freq = l.freq + r.freq;
            nodes.push(Node {
                freq,
                parent: None,
                kind: NodeKind::Inner {
                    left: l.node,
                    right: r.node,
                },
            });
            nodes[l.node as usize].parent = Some(index);
            nodes[r.node as usize].parent = Some(index);
            queue.push(Reverse(QueueEntry {
                freq,
                is_leaf: false,
                tie: index as u64,
                node: index,
            }));
        }

        debug_assert_eq!(queue.len(), 1);
        let root = queue.pop().unwrap().0.node;

        Self {
            nodes,
            root: Some(root),
            leaves,
        }
    }

    /// Decodes a Huffman tree from the given bit source.
    ///
    /// The tree must have been encoded by [`write_to`](HuffmanTree::write_to).
    pub fn read_from<B: BitSource>(src: &mut B) -> Result<Self, B::Error> {
        // First, read the complete topology so the arena can be reserved
        // to its final size, counting leaves along the way.
        let mut topology = Vec::new();
        let mut alphabet_size = 0;
        let mut open = 1_usize;
        while open > 0 {
            let is_leaf = src.read_bit()?;
            topology.push(is_leaf);
            open -= 1;
            if is_leaf {
                alphabet_size += 1;
            } else {
                // a zero bit promises exactly two children
                open += 2;
            }
        }

        if topology.len() == 1 {
            // a lone leaf bit encodes the empty tree
            return Ok(Self::default());
        }

        // Second, the universe of characters in the tree.
        let min = src.read_delta_in(Universe::umax())?;
        let max = src.read_delta_in(Universe::at_least(min))?;
        let u = Universe::new(min, max);

        // Finally, rebuild the nodes in pre-order; the characters follow
        // the topology on the stream in left-to-right leaf order, which
        // is exactly the order this loop consumes them in.
        const NIL: u32 = u32::MAX;
        let mut nodes: Vec<Node<C>> = Vec::with_capacity(topology.len());
        let mut leaves = HashMap::with_capacity(alphabet_size);
        let mut root = NIL;
        // inner nodes still missing at least one child
        let mut stack: Vec<u32> = Vec::new();

        for is_leaf in topology {
            let index = nodes.len() as u32;
            let kind = if is_leaf {
                let c = C::from_u64(src.read_binary_in(u)?);
                leaves.insert(c, index);
                NodeKind::Leaf(c)
            } else {
                NodeKind::Inner {
                    left: NIL,
                    right: NIL,
                }
            };

            let parent = stack.last().copied();
            match parent {
                Some(top) => match &mut nodes[top as usize].kind {
                    NodeKind::Inner { left, .. } if *left == NIL => *left = index,
                    NodeKind::Inner { right, .. } => {
                        debug_assert_eq!(*right, NIL);
                        *right = index;
                        stack.pop();
                    }
                    NodeKind::Leaf(_) => unreachable!("leaves are never on the stack"),
                },
                None => root = index,
            }

            nodes.push(Node {
                freq: 0,
                parent,
                kind,
            });
            if !is_leaf {
                stack.push(index);
            }
        }

        debug_assert!(stack.is_empty());
        Ok(Self {
            nodes,
            root: Some(root),
            leaves,
        })
    }

    /// Encodes the tree to the given bit sink and returns the number of
    /// bits written.
    ///
    /// The encoding has two sections. The topology is a pre-order
    /// traversal spending one bit per node: a one for each leaf, a zero
    /// for each inner node (whose two subtrees follow). The alphabet
    /// follows as the δ-coded minimum and maximum characters of the tree
    /// and then, in left-to-right leaf order, each leaf's character in
    /// binary relative to that universe.
    ///
    /// The empty tree is encoded as a single one-bit.
    pub fn write_to<S: BitSink>(&self, sink: &mut S) -> Result<usize, S::Error> {
        let Some(root) = self.root else {
            return sink.write_bit(true);
        };

        let mut written = 0;
        let mut symbols_ltr = Vec::with_capacity(self.leaves.len());
        let mut range = Range::new();
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            match self.nodes[index as usize].kind {
                NodeKind::Leaf(c) => {
                    written += sink.write_bit(true)?;
                    symbols_ltr.push(c);
                    range.contain(c.to_u64());
                }
                NodeKind::Inner { left, right } => {
                    written += sink.write_bit(false)?;
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        let u = Universe::from(range);
        written += sink.write_delta_in(u.min(), Universe::umax())?;
        written += sink.write_delta_in(u.max(), Universe::at_least(u.min()))?;
        for c in symbols_ltr {
            written += sink.write_binary_in(c.to_u64(), u)?;
        }
        Ok(written)
    }

    /// Computes the Huffman code for the given character, a zero-length
    /// code if the tree does not contain it.
    ///
    /// This walks from the leaf up to the root and thus takes time
    /// proportional to the code length; use [`table`](HuffmanTree::table)
    /// when encoding more than a few symbols.
    pub fn code(&self, c: C) -> HuffmanCode {
        match self.leaves.get(&c) {
            Some(&leaf) => self.code_of_node(leaf),
            None => HuffmanCode::default(),
        }
    }

    fn code_of_node(&self, node: u32) -> HuffmanCode {
        let mut code = HuffmanCode::default();
        let mut v = node;
        while let Some(parent) = self.nodes[v as usize].parent {
            let bit = match self.nodes[parent as usize].kind {
                NodeKind::Inner { right, .. } => right == v,
                NodeKind::Leaf(_) => unreachable!("a parent is always an inner node"),
            };
            code.word = code.word << 1 | bit as u64;
            code.length += 1;
            v = parent;
        }
        code
    }

    /// Precomputes the codes of all characters of the tree into a
    /// [`CodeTable`].
    pub fn table(&self) -> CodeTable<C> {
        CodeTable::build(self)
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, C>> {
        self.root.map(|index| NodeRef { tree: self, index })
    }

    /// The number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of distinct characters represented by the tree.
    pub fn alphabet_size(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<C: Symbol> HuffmanCodeProvider<C> for HuffmanTree<C> {
    #[inline(always)]
    fn code_for(&self, c: C) -> HuffmanCode {
        self.code(c)
    }
}

/// A borrowed handle to a node of a [`HuffmanTree`].
#[derive(Debug)]
pub struct NodeRef<'a, C: Symbol> {
    tree: &'a HuffmanTree<C>,
    index: u32,
}

impl<C: Symbol> Clone for NodeRef<'_, C> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Symbol> Copy for NodeRef<'_, C> {}

impl<'a, C: Symbol> NodeRef<'a, C> {
    #[inline(always)]
    fn node(&self) -> &'a Node<C> {
        &self.tree.nodes[self.index as usize]
    }

    /// The frequency recorded for this node during construction; the sum
    /// of the children's frequencies for inner nodes, zero everywhere on
    /// deserialized trees.
    pub fn freq(&self) -> u64 {
        self.node().freq
    }

    /// The parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    /// Whether this node is its parent's right child.
    ///
    /// Must not be called on the root.
    pub fn is_right_child(&self) -> bool {
        let parent = self.node().parent.expect("the root has no parent");
        match self.tree.nodes[parent as usize].kind {
            NodeKind::Inner { right, .. } => right == self.index,
            NodeKind::Leaf(_) => unreachable!("a parent is always an inner node"),
        }
    }

    /// Computes the Huffman code for this node by walking up to the root.
    pub fn code(&self) -> HuffmanCode {
        self.tree.code_of_node(self.index)
    }
}

impl<C: Symbol> TreeNavigator for NodeRef<'_, C> {
    type Symbol = C;

    #[inline(always)]
    fn is_leaf(&self) -> bool {
        matches!(self.node().kind, NodeKind::Leaf(_))
    }

    #[inline(always)]
    fn left_child(&self) -> Self {
        match self.node().kind {
            NodeKind::Inner { left, .. } => NodeRef {
                tree: self.tree,
                index: left,
            },
            NodeKind::Leaf(_) => panic!("a leaf has no children"),
        }
    }

    #[inline(always)]
    fn right_child(&self) -> Self {
        match self.node().kind {
            NodeKind::Inner { right, .. } => NodeRef {
                tree: self.tree,
                index: right,
            },
            NodeKind::Leaf(_) => panic!("a leaf has no children"),
        }
    }

    #[inline(always)]
    fn symbol(&self) -> C {
        match self.node().kind {
            NodeKind::Leaf(c) => c,
            NodeKind::Inner { .. } => panic!("an inner node has no character"),
        }
    }
}

/// A precomputed mapping from characters to their Huffman codes.
///
/// For character types of at most 16 bits the table is a dense array
/// indexed by character; for wider types it falls back to a hash map.
/// Characters the tree does not contain map to the zero-length code.
#[derive(Debug, Clone)]
pub struct CodeTable<C: Symbol> {
    repr: Repr<C>,
}

#[derive(Debug, Clone)]
enum Repr<C: Symbol> {
    Dense(Box<[HuffmanCode]>),
    Sparse(HashMap<C, HuffmanCode>),
}

impl<C: Symbol> CodeTable<C> {
    fn build(tree: &HuffmanTree<C>) -> Self {
        let repr = if C::BITS <= 16 {
            let mut table = vec![HuffmanCode::default(); 1 << C::BITS].into_boxed_slice();
            for (&c, &leaf) in &tree.leaves {
                table[c.to_u64() as usize] = tree.code_of_node(leaf);
            }
            Repr::Dense(table)
        } else {
            let mut map = HashMap::with_capacity(tree.leaves.len());
            for (&c, &leaf) in &tree.leaves {
                map.insert(c, tree.code_of_node(leaf));
            }
            Repr::Sparse(map)
        };
        Self { repr }
    }

    /// The code for the given character, a zero-length code if the tree
    /// the table was built from does not contain it.
    #[inline(always)]
    pub fn code(&self, c: C) -> HuffmanCode {
        match &self.repr {
            Repr::Dense(table) => table[c.to_u64() as usize],
            Repr::Sparse(map) => map.get(&c).copied().unwrap_or_default(),
        }
    }
}

impl<C: Symbol> HuffmanCodeProvider<C> for CodeTable<C> {
    #[inline(always)]
    fn code_for(&self, c: C) -> HuffmanCode {
        self.code(c)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman;
    use crate::impls::{SliceBitSource, VecBitSink};
    use crate::traits::BitSink;

    // histogram: s:7 t:7 u:6 v:5 w:4 x:3 y:2 z:1
    const INPUT: &[u8] = b"zyyxxxwwwwvvvvvuuuuuutttttttsssssss";

    const EXPECTED_CODES: [(u8, u64, usize); 8] = [
        (b'z', 0b11100, 5),
        (b'y', 0b01100, 5),
        (b'x', 0b0100, 4),
        (b'w', 0b110, 3),
        (b'v', 0b010, 3),
        (b'u', 0b000, 3),
        (b't', 0b01, 2),
        (b's', 0b11, 2),
    ];

    fn check_codes(tree: &HuffmanTree<u8>) {
        for (c, word, length) in EXPECTED_CODES {
            assert_eq!(tree.code(c), HuffmanCode { word, length }, "code of {:?}", c as char);
        }
    }

    #[test]
    fn test_construction() {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        assert_eq!(tree.num_nodes(), 15);
        assert_eq!(tree.alphabet_size(), 8);
        assert_eq!(tree.root().unwrap().freq(), INPUT.len() as u64);
        check_codes(&tree);

        // unknown characters have no code
        assert_eq!(tree.code(b'a'), HuffmanCode::default());
    }

    #[test]
    fn test_determinism() {
        let first = HuffmanTree::new(INPUT.iter().copied());
        let second = HuffmanTree::new(INPUT.iter().copied());
        for c in 0..=255_u8 {
            assert_eq!(first.code(c), second.code(c));
        }
    }

    #[test]
    fn test_code_length_is_depth() {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        for (c, _, length) in EXPECTED_CODES {
            let mut depth = 0;
            let leaf = NodeRef {
                tree: &tree,
                index: tree.leaves[&c],
            };
            let mut v = leaf;
            while let Some(parent) = v.parent() {
                depth += 1;
                v = parent;
            }
            assert_eq!(depth, length);
            assert_eq!(leaf.code().length, length);
        }
    }

    #[test]
    fn test_serialized_sections() -> anyhow::Result<()> {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        let mut sink = VecBitSink::new();
        let written = tree.write_to(&mut sink)?;
        assert_eq!(written as u64, sink.num_bits_written());
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        // the tree has 15 nodes, so the topology is 15 bits
        assert_eq!(src.read_bits(15)?, 0b110110110101000);

        // the universe of characters follows
        let min = src.read_delta_in(Universe::umax())?;
        let max = src.read_delta_in(Universe::at_least(min))?;
        assert_eq!(min, b's' as u64);
        assert_eq!(max, b'z' as u64);

        // and then the characters in left-to-right leaf order
        let u = Universe::new(min, max);
        for expected in [b'u', b'x', b'y', b'z', b'v', b'w', b't', b's'] {
            assert_eq!(src.read_binary_in(u)?, expected as u64);
        }
        Ok(())
    }

    #[test]
    fn test_serialization_roundtrip() -> anyhow::Result<()> {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        let mut sink = VecBitSink::new();
        tree.write_to(&mut sink)?;
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        let decoded = HuffmanTree::<u8>::read_from(&mut src)?;
        assert_eq!(decoded.num_nodes(), 15);
        assert_eq!(decoded.alphabet_size(), 8);
        check_codes(&decoded);
        Ok(())
    }

    #[test]
    fn test_empty_tree() -> anyhow::Result<()> {
        let tree = HuffmanTree::<u8>::new(core::iter::empty());
        assert!(tree.is_empty());
        assert!(tree.root().is_none());

        let mut sink = VecBitSink::new();
        assert_eq!(tree.write_to(&mut sink)?, 1);
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        let decoded = HuffmanTree::<u8>::read_from(&mut src)?;
        assert!(decoded.is_empty());
        Ok(())
    }

    #[test]
    fn test_one_character_alphabet() -> anyhow::Result<()> {
        let tree = HuffmanTree::new(b"aaaa".iter().copied());
        // the fabricated companion character makes this a proper tree
        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.alphabet_size(), 2);
        assert_eq!(tree.code(b'a').length, 1);

        let mut sink = VecBitSink::new();
        tree.write_to(&mut sink)?;
        for &c in b"aaaa" {
            huffman::encode(&mut sink, c, &tree)?;
        }
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        let decoded = HuffmanTree::<u8>::read_from(&mut src)?;
        let root = decoded.root().unwrap();
        for _ in 0..4 {
            assert_eq!(huffman::decode(&mut src, root)?, b'a');
        }
        Ok(())
    }

    #[test]
    fn test_from_counts_with_explicit_zero() {
        let mut histogram = Counter::new();
        histogram.count_many(b'a', 10);
        histogram.count_many(b'b', 3);
        histogram.set(b'c', 0);

        let tree = HuffmanTree::from_counts(&histogram);
        assert_eq!(tree.alphabet_size(), 3);
        assert!(tree.code(b'c').length > 0);
    }

    #[test]
    fn test_navigation_matches_codes() {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        for (c, word, length) in EXPECTED_CODES {
            let mut v = tree.root().unwrap();
            for i in 0..length {
                v = if word >> i & 1 != 0 {
                    v.right_child()
                } else {
                    v.left_child()
                };
            }
            assert!(v.is_leaf());
            assert_eq!(v.symbol(), c);
            assert_eq!(v.is_right_child(), word >> (length - 1) & 1 != 0);
        }
    }

    #[test]
    fn test_table_matches_tree() {
        let tree = HuffmanTree::new(INPUT.iter().copied());
        let table = tree.table();
        for c in 0..=255_u8 {
            assert_eq!(table.code(c), tree.code(c));
        }
    }

    #[test]
    fn test_wide_symbols() -> anyhow::Result<()> {
        // u32 symbols exercise the sparse table
        let input: Vec<u32> = vec![1 << 20, 1 << 20, 999_999, 7, 7, 7, 1 << 20];
        let tree = HuffmanTree::new(input.iter().copied());
        assert_eq!(tree.alphabet_size(), 3);
        let table = tree.table();
        for &c in &input {
            assert_eq!(table.code(c), tree.code(c));
            assert!(table.code(c).length > 0);
        }

        let mut sink = VecBitSink::new();
        tree.write_to(&mut sink)?;
        for &c in &input {
            huffman::encode(&mut sink, c, &table)?;
        }
        let words = sink.into_vec();

        let mut src = SliceBitSource::new(&words);
        let decoded = HuffmanTree::<u32>::read_from(&mut src)?;
        let root = decoded.root().unwrap();
        for &c in &input {
            assert_eq!(huffman::decode(&mut src, root)?, c);
        }
        Ok(())
    }
}
