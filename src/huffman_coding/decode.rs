//! Streaming decoder.
//!
//! The tree is walked as a state machine whose only state is the current node. Every bit moves the
//! cursor one level down; reaching a leaf emits its symbol and puts the cursor back on the root.
//!

use std::io::Write;

use log::{debug, warn};

use super::error::HuffmanError;
use super::huffman::{HuffmanTree, Node};
use crate::bitstream::BitSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with TruncatedStream instead of dropping a code path cut short by the end of the stream.
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Symbols written to the sink.
    pub symbols: u64,
    /// Bits read from the source.
    pub bits: u64,
}

/// Decodes bit streams against a borrowed tree. The tree cannot change while a decoder holds it,
/// and any number of decoders may share one tree.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'t> {
    tree: &'t HuffmanTree,
    options: DecodeOptions,
}

impl<'t> Decoder<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self::with_options(tree, DecodeOptions::default())
    }

    pub fn with_options(tree: &'t HuffmanTree, options: DecodeOptions) -> Self {
        Self { tree, options }
    }

    /// Read bits until the source runs dry, writing one byte to `sink` per completed code path.
    /// Symbols already written stay written if an error comes up part way.
    pub fn decode<S, W>(&self, source: &mut S, sink: &mut W) -> Result<DecodeSummary, HuffmanError>
    where
        S: BitSource + ?Sized,
        W: Write + ?Sized,
    {
        let root = self.tree.root();
        let mut cursor = root;
        let mut pending = 0_usize;
        let mut summary = DecodeSummary::default();

        while source.has_next()? {
            let bit = source.next_bit()?;
            summary.bits += 1;

            let next = match cursor.child(bit) {
                Some(node) => node,
                // Only a one-symbol tree has a leaf for a root. Its symbol is sent as a 0 bit.
                None if !bit => cursor,
                None => {
                    return Err(HuffmanError::BrokenTree {
                        bit: bit as u8,
                        offset: summary.bits - 1,
                    })
                }
            };

            match next {
                Node::Leaf(symbol) => {
                    sink.write_all(&[*symbol])?;
                    summary.symbols += 1;
                    cursor = root;
                    pending = 0;
                }
                Node::Kids(..) => {
                    cursor = next;
                    pending += 1;
                }
            }
        }

        if pending > 0 {
            if self.options.strict {
                return Err(HuffmanError::TruncatedStream { pending });
            }
            warn!(
                "Bit stream ended {} bits into a code path; dropping it.",
                pending
            );
        }
        debug!(
            "Decoded {} symbols from {} bits.",
            summary.symbols, summary.bits
        );
        Ok(summary)
    }

    /// Decode everything into a new Vec.
    pub fn decode_to_vec<S>(&self, source: &mut S) -> Result<Vec<u8>, HuffmanError>
    where
        S: BitSource + ?Sized,
    {
        let mut out = Vec::new();
        self.decode(source, &mut out)?;
        Ok(out)
    }
}
