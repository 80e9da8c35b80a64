use std::io::{self, Write};

use crate::huffman_coding::huffman::CodePath;

/// Bytes gathered in the output buffer before we hand them to the writer.
const WRITE_CHUNK: usize = 64 * 1024;

/// Writes a packed, MSB-first bitstream. Bits collect in a u64 queue, full bytes move to the output
/// buffer, and the buffer goes to the underlying writer in chunks.
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bits accepted so far, padding excluded.
    written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter on top of any writer.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(WRITE_CHUNK),
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Count of bits put on the stream so far (not counting flush padding).
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Move all full bytes from the queue to the output buffer, and the buffer to the writer when
    /// it gets large.
    fn push_queue(&mut self) -> io::Result<()> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
        if self.output.len() >= WRITE_CHUNK {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Put a single bit on the stream. *true* is a 1.
    pub fn out_bit(&mut self, bit: bool) -> io::Result<()> {
        self.queue = self.queue << 1 | bit as u64;
        self.q_bits += 1;
        self.written += 1;
        if self.q_bits > 56 {
            self.push_queue()?;
        }
        Ok(())
    }

    /// Put every bit of a code path on the stream.
    pub fn out_path(&mut self, path: &CodePath) -> io::Result<()> {
        for &bit in path.bits() {
            self.out_bit(bit)?;
        }
        Ok(())
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) -> io::Result<()> {
        // Make sure the queue is empty enough to hold the data
        self.push_queue()?;
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.written += 8;
        Ok(())
    }

    /// Put a big-endian u64 on the stream.
    pub fn out64(&mut self, data: u64) -> io::Result<()> {
        data.to_be_bytes().iter().try_for_each(|&b| self.out8(b))
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, then writes everything to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.push_queue()?;
        if self.q_bits > 0 {
            let mut byte = (self.queue & (0xff >> (8 - self.q_bits)) as u64) as u8;
            byte <<= 8 - self.q_bits;
            self.output.push(byte);
            self.q_bits = 0;
        }
        self.writer.write_all(&self.output)?;
        self.output.clear();
        self.writer.flush()
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
