//! huffcode: a Huffman prefix-code compressor.
//!
//! Builds a code tree from byte frequencies, saves the tree as a portable text code table, loads it
//! back, and decodes a bit stream one bit at a time by walking the tree.
//!
//! Basic usage to encode a file is as follows:
//!
//! `$> huffcode -z test.txt`
//!
//! This writes the code table to test.code and the packed bits to test.short.
//! `$> huffcode -d test.short` then rebuilds the data into test.new.
//!
//! Library use goes through [`huffman_coding`]:
//!
//! ```
//! use huffcode::huffman_coding::{code_table, decode::Decoder, encode::Encoder, HuffmanTree};
//! use huffcode::tools::freq_count::freqs;
//!
//! let data = b"abracadabra";
//! let tree = HuffmanTree::from_weights(&freqs(data).unwrap()).unwrap();
//!
//! let mut table = Vec::new();
//! code_table::save(&tree, &mut table).unwrap();
//! let loaded = code_table::load(table.as_slice()).unwrap();
//!
//! let bits = Encoder::new(&tree).encode_to_bits(data).unwrap();
//! let out = Decoder::new(&loaded)
//!     .decode_to_vec(&mut bits.into_iter().peekable())
//!     .unwrap();
//! assert_eq!(out, data);
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod huffman_coding;
pub mod tools;
