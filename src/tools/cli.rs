use clap::Parser;
use log::info;
use std::ffi::OsString;
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Encode, Decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "huffcode",
    version,
    about = "Huffman prefix-code compressor",
    long_about = "
    Encoding foo.txt writes the code table to foo.code and the packed bits to foo.short.
    Decoding foo.short reads foo.code next to it and writes foo.new."
)]
struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Encode the input files (default)
    #[clap(short = 'z', long = "encode")]
    encode: bool,

    /// Decode the input files
    #[clap(short = 'd', long = "decode", conflicts_with = "encode")]
    decode: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Fail on a bit stream that ends part way through a code
    #[clap(long = "strict")]
    strict: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Encode/Decode
    pub op_mode: Mode,
    /// Reject bit streams that stop in the middle of a code path
    pub strict: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Encode,
            strict: false,
            verbose: Verbosity::Errors,
        }
    }

    /// Parse options from an argument list (the first item is the program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;
        Ok(Self {
            files: args.files,
            force_overwrite: args.force,
            op_mode: match (args.encode, args.decode) {
                (false, true) => Mode::Decode,
                _ => Mode::Encode,
            },
            strict: args.strict,
            verbose: match (args.quiet, args.verbose) {
                (true, _) => Verbosity::Quiet,
                (false, 0) => Verbosity::Errors,
                (false, 1) => Verbosity::Warnings,
                (false, 2) => Verbosity::Info,
                (false, 3) => Verbosity::Debug,
                _ => Verbosity::Trace,
            },
        })
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the process arguments (exits with usage on error) and set the log level to match.
pub fn huffopts_init() -> HuffOpts {
    let opts = match HuffOpts::from_args(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };
    set_log_level(opts.verbose);

    info!("---- huffcode initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.strict {
        info!("Strict decoding")
    };
    opts
}

/// Set the log level
pub fn set_log_level(verbose: Verbosity) {
    match verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };
}
