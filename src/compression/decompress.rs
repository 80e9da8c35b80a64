use log::{error, info, warn};

use crate::bitstream::bitreader::BitReader;
use crate::huffman_coding::code_table::load;
use crate::huffman_coding::decode::{DecodeOptions, DecodeSummary, Decoder};
use crate::huffman_coding::HuffmanError;
use crate::tools::cli::HuffOpts;

use super::compress::{write_output, SHORT_EXT, TABLE_EXT};

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read, Write},
    path::{Path, PathBuf},
};

/// Extension of the decoded output.
pub const NEW_EXT: &str = "new";

/// Load the code table from `table_in`, then decode the packed bits in `bits_in` (bit count
/// header first) into `out`.
pub fn decompress_stream<T, R, W>(
    table_in: T,
    bits_in: R,
    out: &mut W,
    options: DecodeOptions,
) -> Result<DecodeSummary, HuffmanError>
where
    T: BufRead,
    R: Read,
    W: Write + ?Sized,
{
    let tree = load(table_in)?;

    let mut br = BitReader::new(bits_in);
    let expected = br.bint(64)?.ok_or_else(|| {
        io::Error::new(io::ErrorKind::UnexpectedEof, "missing bit count header")
    })?;
    br.limit_to(expected);

    let summary = Decoder::with_options(&tree, options).decode(&mut br, out)?;
    if summary.bits < expected {
        if options.strict {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "bit stream holds {} of {} bits",
                    summary.bits, expected
                ),
            )
            .into());
        }
        warn!(
            "Bit stream holds {} of the {} bits promised.",
            summary.bits, expected
        );
    }
    Ok(summary)
}

/// Decode `<stem>.short` using `<stem>.code` into `<stem>.new`. Returns the summary and the path
/// written. The output is only created once the whole stream has decoded.
pub fn decompress_file(
    input: &Path,
    force: bool,
    options: DecodeOptions,
) -> Result<(DecodeSummary, PathBuf), HuffmanError> {
    if input.extension().map_or(true, |ext| ext != SHORT_EXT) {
        warn!(
            "{} does not end in .{}; decoding anyway.",
            input.display(),
            SHORT_EXT
        );
    }
    let table_path = input.with_extension(TABLE_EXT);
    let out_path = input.with_extension(NEW_EXT);

    let table_in = BufReader::new(File::open(&table_path)?);
    let bits_in = BufReader::new(File::open(input)?);
    let mut decoded = Vec::new();
    let summary = decompress_stream(table_in, bits_in, &mut decoded, options)?;
    write_output(&out_path, force, &decoded)?;

    Ok((summary, out_path))
}

/// Decompress every file named in opts.
pub fn decompress(opts: &HuffOpts) -> io::Result<()> {
    let options = DecodeOptions {
        strict: opts.strict,
    };
    for name in &opts.files {
        match decompress_file(Path::new(name), opts.force_overwrite, options) {
            Ok((summary, out_path)) => info!(
                "{}: {} bits -> {} bytes in {}",
                name,
                summary.bits,
                summary.symbols,
                out_path.display()
            ),
            Err(e) => {
                error!("{}: {}", name, e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decompress_stream_test() {
        let table = "98\n0\n97\n1\n";
        let bits = [0_u8, 0, 0, 0, 0, 0, 0, 3, 0b1100_0000];
        let mut out = Vec::new();
        let summary =
            decompress_stream(table.as_bytes(), &bits[..], &mut out, DecodeOptions::default())
                .unwrap();
        assert_eq!(out, b"aab");
        assert_eq!(summary.bits, 3);
    }

    #[test]
    fn missing_header_test() {
        let mut out = Vec::new();
        let err = decompress_stream(
            "98\n0\n97\n1\n".as_bytes(),
            &[0_u8, 0, 0][..],
            &mut out,
            DecodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HuffmanError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn short_payload_test() {
        // Header promises 16 bits, only 8 are there.
        let bits = [0_u8, 0, 0, 0, 0, 0, 0, 16, 0b1100_0000];
        let mut out = Vec::new();
        decompress_stream(
            "98\n0\n97\n1\n".as_bytes(),
            &bits[..],
            &mut out,
            DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(out, b"aabbbbbb");

        let strict = DecodeOptions { strict: true };
        assert!(decompress_stream("98\n0\n97\n1\n".as_bytes(), &bits[..], &mut Vec::new(), strict).is_err());
    }
}
