use rayon::prelude::*;

use crate::huffman_coding::HuffmanError;

/// Returns a frequency count of the input data, indexed by byte value. Uses parallelism when data
/// set is over 64k. Fails if any byte value occurs more than u32::MAX times.
pub fn freqs(data: &[u8]) -> Result<Vec<u32>, HuffmanError> {
    let counts = if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u64; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u64; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u64>>(),
            )
    } else {
        let mut freqs = vec![0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    };
    narrow(&counts)
}

/// Fit the counts into the u32 weights the tree builder takes.
fn narrow(counts: &[u64]) -> Result<Vec<u32>, HuffmanError> {
    counts
        .iter()
        .enumerate()
        .map(|(symbol, &count)| {
            u32::try_from(count).map_err(|_| HuffmanError::WeightOverflow {
                symbol: symbol as u8,
                count,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_test() {
        let f = freqs(b"abracadabra").unwrap();
        assert_eq!(f.len(), 256);
        assert_eq!(f[b'a' as usize], 5);
        assert_eq!(f[b'b' as usize], 2);
        assert_eq!(f[b'r' as usize], 2);
        assert_eq!(f[b'c' as usize], 1);
        assert_eq!(f[b'd' as usize], 1);
        assert_eq!(f.iter().sum::<u32>(), 11);
    }

    #[test]
    fn parallel_matches_serial_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| (i * 7 % 251) as u8).collect();
        let par = freqs(&data).unwrap();
        let mut serial = vec![0_u32; 256];
        data.iter().for_each(|&b| serial[b as usize] += 1);
        assert_eq!(par, serial);
    }

    #[test]
    fn empty_test() {
        assert!(freqs(&[]).unwrap().iter().all(|&f| f == 0));
    }

    #[test]
    fn count_past_u32_test() {
        let mut counts = vec![0_u64; 256];
        counts[b'e' as usize] = u32::MAX as u64;
        assert_eq!(narrow(&counts).unwrap()[b'e' as usize], u32::MAX);

        counts[b'e' as usize] += 1;
        match narrow(&counts) {
            Err(HuffmanError::WeightOverflow { symbol, count }) => {
                assert_eq!(symbol, b'e');
                assert_eq!(count, 1 << 32);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
