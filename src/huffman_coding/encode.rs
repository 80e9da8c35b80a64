use std::io::Write;

use log::debug;

use super::error::HuffmanError;
use super::huffman::{CodePath, CodeTable, HuffmanTree};
use crate::bitstream::bitwriter::BitWriter;

/// Maps symbols to the code paths written on the wire.
#[derive(Clone, Debug)]
pub struct Encoder {
    table: CodeTable,
}

impl Encoder {
    pub fn new(tree: &HuffmanTree) -> Self {
        Self {
            table: tree.wire_table(),
        }
    }

    pub fn path(&self, symbol: u8) -> Result<&CodePath, HuffmanError> {
        self.table
            .get(&symbol)
            .ok_or(HuffmanError::UnknownSymbol(symbol))
    }

    /// Bits needed to encode `data`.
    pub fn bit_len(&self, data: &[u8]) -> Result<u64, HuffmanError> {
        data.iter()
            .map(|&symbol| self.path(symbol).map(|path| path.len() as u64))
            .sum()
    }

    /// Put the code path of every byte of `data` on the stream. Returns the count of bits written.
    pub fn encode<W: Write>(
        &self,
        data: &[u8],
        bw: &mut BitWriter<W>,
    ) -> Result<u64, HuffmanError> {
        let start = bw.bits_written();
        for &symbol in data {
            bw.out_path(self.path(symbol)?)?;
        }
        let bits = bw.bits_written() - start;
        debug!("Encoded {} symbols into {} bits.", data.len(), bits);
        Ok(bits)
    }

    /// Unpacked encoding, one bool per bit.
    pub fn encode_to_bits(&self, data: &[u8]) -> Result<Vec<bool>, HuffmanError> {
        let mut bits = Vec::new();
        for &symbol in data {
            bits.extend_from_slice(self.path(symbol)?.bits());
        }
        Ok(bits)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::code_table::load;

    fn tree() -> HuffmanTree {
        load("97\n0\n98\n10\n99\n11\n".as_bytes()).unwrap()
    }

    #[test]
    fn encode_to_bits_test() {
        let enc = Encoder::new(&tree());
        let bits: String = enc
            .encode_to_bits(b"abca")
            .unwrap()
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect();
        assert_eq!(bits, "010110");
        assert_eq!(enc.bit_len(b"abca").unwrap(), 6);
    }

    #[test]
    fn encode_packed_test() {
        let enc = Encoder::new(&tree());
        let mut bw = BitWriter::new(Vec::new());
        assert_eq!(enc.encode(b"cccb", &mut bw).unwrap(), 8);
        assert_eq!(bw.finish().unwrap(), vec![0b1111_1110]);
    }

    #[test]
    fn unknown_symbol_test() {
        let enc = Encoder::new(&tree());
        assert!(matches!(
            enc.encode_to_bits(b"abz"),
            Err(HuffmanError::UnknownSymbol(b'z'))
        ));
        assert!(enc.bit_len(b"z").is_err());
    }

    #[test]
    fn single_symbol_uses_one_bit_test() {
        let mut w = vec![0_u32; 256];
        w[b'k' as usize] = 4;
        let enc = Encoder::new(&HuffmanTree::from_weights(&w).unwrap());
        assert_eq!(enc.encode_to_bits(b"kk").unwrap(), vec![false, false]);
    }
}
