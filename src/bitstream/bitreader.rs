//! BitReader: reads a packed bitstream for the huffman decoder.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io;

use super::BitSource;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a packed, MSB-first bitstream, optionally stopping after an exact number of bits.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    /// Bits we may still hand out, if the stream carries a bit count.
    remaining: Option<u64>,
    /// Bits handed out so far.
    consumed: u64,
    source: R,
}

impl<R: io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer) that reads until the source runs dry.
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            remaining: None,
            consumed: 0,
            source,
        }
    }

    /// From here on, hand out at most `bits` more bits. Anything after that (final byte padding)
    /// is treated as end of stream.
    pub fn limit_to(&mut self, bits: u64) {
        self.remaining = Some(bits);
    }

    /// Count of bits read so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.truncate(0);
                self.cursor = 0;
                return Ok(false);
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<usize>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        if let Some(left) = self.remaining.as_mut() {
            *left -= 1;
        }
        self.consumed += 1;
        Ok(Some(bit as usize))
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> io::Result<Option<bool>> {
        Ok(self.bit()?.map(|bit| bit == 1))
    }

    /// Return Option<u64> of the next n (<= 64) bits, or None if the stream ends first.
    pub fn bint(&mut self, n: usize) -> io::Result<Option<u64>> {
        let mut result = 0_u64;
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u64,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read.
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if the stream ends first.
    pub fn bytes(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n);
        while result.len() < n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl<R: io::Read> BitSource for BitReader<R> {
    fn has_next(&mut self) -> io::Result<bool> {
        if self.remaining == Some(0) {
            return Ok(false);
        }
        if self.bit_index > 0 {
            return Ok(true);
        }
        self.have_data()
    }

    fn next_bit(&mut self) -> io::Result<bool> {
        self.bool_bit()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "bit stream exhausted"))
    }
}
