use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::huffman_coding::code_table::save;
use crate::huffman_coding::encode::Encoder;
use crate::huffman_coding::{HuffmanError, HuffmanTree};
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::freqs;

/// Extension of the code table written next to the input.
pub const TABLE_EXT: &str = "code";
/// Extension of the packed bit file written next to the input.
pub const SHORT_EXT: &str = "short";

/// What came out of compressing one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressReport {
    /// Distinct symbols in the input (records in the code table).
    pub symbols: usize,
    /// Input length in bytes.
    pub input_bytes: u64,
    /// Encoded length in bits, header and padding excluded.
    pub payload_bits: u64,
}

/// Build a code tree for `data`, write its table to `table_out`, and write the bit count header
/// followed by the packed bits to `bits_out`.
pub fn compress_stream<T, S>(
    data: &[u8],
    table_out: &mut T,
    bits_out: S,
) -> Result<CompressReport, HuffmanError>
where
    T: Write + ?Sized,
    S: Write,
{
    let weights = freqs(data)?;
    let tree = HuffmanTree::from_weights(&weights)?;
    let symbols = save(&tree, table_out)?;

    let encoder = Encoder::new(&tree);
    // The header holds the exact bit count, so the reader can ignore the padding at the end.
    let payload_bits = encoder.bit_len(data)?;
    let mut bw = BitWriter::new(bits_out);
    bw.out64(payload_bits)?;
    encoder.encode(data, &mut bw)?;
    bw.flush()?;

    Ok(CompressReport {
        symbols,
        input_bytes: data.len() as u64,
        payload_bits,
    })
}

/// Open an output file, refusing to clobber an existing one unless forced.
pub(crate) fn create_output(path: &Path, force: bool) -> io::Result<File> {
    if force {
        File::create(path)
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)
    }
}

/// Write a finished buffer to `path`. A file this call created is removed again if the write
/// fails, so a failed run never blocks the next one.
pub(crate) fn write_output(path: &Path, force: bool, bytes: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(create_output(path, force)?);
    let written = out.write_all(bytes).and_then(|_| out.flush());
    if let Err(e) = written {
        drop(out);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// Compress one file into `<stem>.code` and `<stem>.short` beside it. Returns the report and
/// the two paths written. Nothing is created unless the whole input encodes.
pub fn compress_file(
    input: &Path,
    force: bool,
) -> Result<(CompressReport, PathBuf, PathBuf), HuffmanError> {
    let data = fs::read(input)?;
    let table_path = input.with_extension(TABLE_EXT);
    let short_path = input.with_extension(SHORT_EXT);

    let mut table = Vec::new();
    let mut packed = Vec::new();
    let report = compress_stream(&data, &mut table, &mut packed)?;

    write_output(&table_path, force, &table)?;
    if let Err(e) = write_output(&short_path, force, &packed) {
        // The table is useless without its bits.
        let _ = fs::remove_file(&table_path);
        return Err(e.into());
    }

    Ok((report, table_path, short_path))
}

/// Compress every file named in opts.
pub fn compress(opts: &HuffOpts) -> io::Result<()> {
    for name in &opts.files {
        let input = Path::new(name);
        match compress_file(input, opts.force_overwrite) {
            Ok((report, table_path, short_path)) => {
                let packed = (report.payload_bits + 7) / 8 + 8;
                info!(
                    "{}: {} bytes -> {} bytes ({} symbols), table in {}, bits in {}",
                    name,
                    report.input_bytes,
                    packed,
                    report.symbols,
                    table_path.display(),
                    short_path.display()
                );
            }
            Err(e) => {
                error!("{}: {}", name, e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}
