//! The bitstream module forms the I/O subsystem for huffcode.
//!
//! Encoded data is a packed, MSB-first stream of bits. The writer pads the final byte with zeros, so
//! the compressed file carries its exact bit count up front and the reader stops there. The decoder
//! never sees the padding.
//!
//! The decoder does not care where bits come from. Anything that can answer "is there another bit?"
//! and "give me the next bit" is a [`BitSource`]: the file-backed [`bitreader::BitReader`], or a
//! peekable iterator of bools in tests.
//!
use std::io;
use std::iter::Peekable;

pub mod bitreader;
pub mod bitwriter;

/// A sequential supply of bits, consumed one at a time.
pub trait BitSource {
    /// True while at least one more bit can be read. Never consumes a bit.
    fn has_next(&mut self) -> io::Result<bool>;

    /// Consume the next bit. *true* is a 1. Calling this after `has_next()` returned false is an
    /// `UnexpectedEof` error.
    fn next_bit(&mut self) -> io::Result<bool>;
}

impl<I: Iterator<Item = bool>> BitSource for Peekable<I> {
    fn has_next(&mut self) -> io::Result<bool> {
        Ok(self.peek().is_some())
    }

    fn next_bit(&mut self) -> io::Result<bool> {
        self.next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "bit source exhausted"))
    }
}
