//! The huffman module holds the code tree and everything that touches it.
//!
//! - tree_from_weights: greedy bottom-up construction from symbol weights.
//! - huffman: the tree itself, code paths and code tables.
//! - code_table: saving a tree as a text table and loading it back.
//! - encode: symbols to bits.
//! - decode: bits to symbols, one bit at a time.
//!
//! A tree is immutable once built or loaded. The work queue used to build it is local to each call,
//! so nothing here is shared between calls.
//!

pub mod code_table;
pub mod decode;
pub mod encode;
pub mod error;
pub mod huffman;
pub mod tree_from_weights;

pub use error::HuffmanError;
pub use huffman::{CodePath, CodeTable, HuffmanTree, Node};
