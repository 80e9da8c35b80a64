use std::io;

use thiserror::Error;

/// Everything that can go wrong while building, persisting, loading or walking a code tree.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbol had a non-zero weight, or a code table held no records.
    #[error("no symbols to build a code tree from")]
    EmptyAlphabet,

    #[error("line {line}: malformed code path {path:?}")]
    MalformedPath { line: usize, path: String },

    #[error("line {line}: malformed symbol {text:?}")]
    MalformedSymbol { line: usize, text: String },

    #[error("line {line}: symbol {symbol} has no code path")]
    MissingPath { line: usize, symbol: u8 },

    /// The path runs through, or lands on, a position already claimed by another record.
    #[error("line {line}: code path {path:?} for symbol {symbol} conflicts with an earlier record")]
    ConflictingPath {
        line: usize,
        symbol: u8,
        path: String,
    },

    #[error("line {line}: symbol {symbol} appears in more than one record")]
    DuplicateSymbol { line: usize, symbol: u8 },

    /// Some internal node was left with a vacant child once every record was placed.
    #[error("code table leaves path {path:?} unassigned")]
    IncompleteTable { path: String },

    /// The decoder needed a child link the tree does not have.
    #[error("code tree has no child for bit {bit} at stream bit {offset}")]
    BrokenTree { bit: u8, offset: u64 },

    /// Strict decoding only: the stream ended in the middle of a code path.
    #[error("bit stream ended {pending} bits into an incomplete code path")]
    TruncatedStream { pending: usize },

    /// A byte value occurs too often for a u32 weight.
    #[error("symbol {symbol} occurs {count} times, more than a weight can hold")]
    WeightOverflow { symbol: u8, count: u64 },

    #[error("symbol {0} is not in the code table")]
    UnknownSymbol(u8),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<HuffmanError> for io::Error {
    fn from(e: HuffmanError) -> Self {
        match e {
            HuffmanError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
