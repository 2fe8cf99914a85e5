/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod codes;
pub mod huffman;
pub mod impls;
pub mod traits;
pub mod universe;

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::codes::*;
    pub use crate::huffman::{
        CodeTable, Counter, HuffmanCode, HuffmanCodeProvider, HuffmanTree, NodeRef, TreeNavigator,
    };
    pub use crate::impls::*;
    pub use crate::traits::*;
    pub use crate::universe::*;
}
