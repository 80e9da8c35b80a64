//! End to end runs over real files in a scratch directory.

use std::fs;
use std::path::PathBuf;

use huffcode::compression::compress::{compress, compress_file};
use huffcode::compression::decompress::{decompress, decompress_file};
use huffcode::huffman_coding::decode::DecodeOptions;
use huffcode::tools::cli::HuffOpts;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huffcode-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn file_round_trip() {
    let dir = scratch("round-trip");
    let input = dir.join("peter.txt");
    let text = "Peter Piper picked a peck of pickled peppers.\n".repeat(50);
    fs::write(&input, &text).unwrap();

    let (report, table_path, short_path) = compress_file(&input, false).unwrap();
    assert_eq!(table_path, dir.join("peter.code"));
    assert_eq!(short_path, dir.join("peter.short"));
    assert_eq!(report.input_bytes, text.len() as u64);
    assert!(fs::metadata(&short_path).unwrap().len() < text.len() as u64);

    let (summary, out_path) =
        decompress_file(&short_path, false, DecodeOptions { strict: true }).unwrap();
    assert_eq!(out_path, dir.join("peter.new"));
    assert_eq!(summary.symbols, text.len() as u64);
    assert_eq!(fs::read_to_string(out_path).unwrap(), text);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = scratch("overwrite");
    let input = dir.join("data.bin");
    fs::write(&input, [1_u8, 2, 3, 3]).unwrap();

    compress_file(&input, false).unwrap();
    assert!(compress_file(&input, false).is_err());
    compress_file(&input, true).unwrap();

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn single_symbol_file() {
    let dir = scratch("single");
    let input = dir.join("zeros.bin");
    fs::write(&input, vec![0_u8; 100]).unwrap();

    let (_, table_path, short_path) = compress_file(&input, false).unwrap();
    assert_eq!(fs::read_to_string(table_path).unwrap(), "0\n0\n");
    let (_, out_path) = decompress_file(&short_path, false, DecodeOptions::default()).unwrap();
    assert_eq!(fs::read(out_path).unwrap(), vec![0_u8; 100]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn driver_runs_both_ways() {
    let dir = scratch("driver");
    let input = dir.join("log.txt");
    let bytes: Vec<u8> = (0..5000_u32).map(|i| (i % 97) as u8).collect();
    fs::write(&input, &bytes).unwrap();

    let name = input.to_string_lossy().to_string();
    compress(&HuffOpts::from_args(["huffcode", "-z", name.as_str()]).unwrap()).unwrap();

    let short = dir.join("log.short").to_string_lossy().to_string();
    decompress(&HuffOpts::from_args(["huffcode", "-d", "--strict", short.as_str()]).unwrap()).unwrap();
    assert_eq!(fs::read(dir.join("log.new")).unwrap(), bytes);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn corrupt_table_is_reported() {
    let dir = scratch("corrupt");
    let input = dir.join("x.txt");
    fs::write(&input, "hello").unwrap();
    let (_, table_path, short_path) = compress_file(&input, false).unwrap();
    fs::write(&table_path, "97\n01\n98\n0\n").unwrap();

    let err = decompress_file(&short_path, false, DecodeOptions::default()).unwrap_err();
    assert!(err.to_string().contains("conflicts"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn failed_compress_leaves_no_outputs() {
    let dir = scratch("empty");
    let input = dir.join("empty.txt");
    fs::write(&input, "").unwrap();

    let err = compress_file(&input, false).unwrap_err();
    assert!(err.to_string().contains("no symbols"));
    assert!(!dir.join("empty.code").exists());
    assert!(!dir.join("empty.short").exists());

    // Once there is something to encode, a plain retry goes through.
    fs::write(&input, "abc").unwrap();
    compress_file(&input, false).unwrap();

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn failed_decompress_leaves_no_output() {
    let dir = scratch("retry");
    let input = dir.join("x.txt");
    fs::write(&input, "hello").unwrap();
    let (_, table_path, short_path) = compress_file(&input, false).unwrap();
    let good_table = fs::read(&table_path).unwrap();

    fs::write(&table_path, "97\n01\n98\n0\n").unwrap();
    assert!(decompress_file(&short_path, false, DecodeOptions::default()).is_err());
    assert!(!dir.join("x.new").exists());

    fs::write(&table_path, good_table).unwrap();
    let (_, out_path) = decompress_file(&short_path, false, DecodeOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(out_path).unwrap(), "hello");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn blocked_bits_file_leaves_no_table() {
    let dir = scratch("blocked");
    let input = dir.join("y.txt");
    fs::write(&input, "abcabc").unwrap();
    fs::write(dir.join("y.short"), "keep me").unwrap();

    assert!(compress_file(&input, false).is_err());
    assert!(!dir.join("y.code").exists());
    assert_eq!(fs::read_to_string(dir.join("y.short")).unwrap(), "keep me");

    fs::remove_dir_all(dir).unwrap();
}
