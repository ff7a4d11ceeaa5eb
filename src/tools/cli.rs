use std::{
    fmt::Display,
    fmt::Formatter,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use crate::error::{CodecError, Result};

/// Where the dictionary is looked for when --table is not given.
pub const DEFAULT_TABLE: &str = "./csv/table.csv";

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// -q wins over any -v. Otherwise info is the floor, and each -v adds a level.
    fn from_flags(q: u8, v: u8) -> Self {
        match (q, v) {
            (0, 0) => Verbosity::Info,
            (0, 1) => Verbosity::Debug,
            (0, _) => Verbosity::Trace,
            (1, _) => Verbosity::Errors,
            _ => Verbosity::Quiet,
        }
    }

    pub fn level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, and the table-authoring helpers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    CharFreqs,
    WordFreqs,
    Accuracy,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the user chose on the command line.
#[derive(Debug)]
pub struct CodecOpts {
    /// What to do
    pub op_mode: Mode,
    /// File to read (the original text for Accuracy)
    pub input: PathBuf,
    /// Second input file, only used by Accuracy
    pub compare: Option<PathBuf>,
    /// Output file. When None a name is derived from the input
    pub output: Option<PathBuf>,
    /// CSV dictionary used by Compress and Decompress
    pub table: PathBuf,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl CodecOpts {
    pub fn new<P: Into<PathBuf>>(op_mode: Mode, input: P) -> Self {
        Self {
            op_mode,
            input: input.into(),
            compare: None,
            output: None,
            table: PathBuf::from(DEFAULT_TABLE),
            verbose: Verbosity::Info,
        }
    }

    /// The chosen output path, or `<input stem><suffix>` in the current directory.
    pub fn output_or(&self, suffix: &str) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                PathBuf::from(format!("{}{}", stem, suffix))
            }
        }
    }
}

/// Fails unless path ends in `.ext`.
pub fn require_extension(path: &Path, ext: &str, mode: &Mode) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(found) if found == ext => Ok(()),
        _ => Err(CodecError::InvalidInput(format!(
            "{} mode requires a .{} input file, got {}",
            mode,
            ext,
            path.display()
        ))),
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Dictionary-based text compressor",
    long_about = "
    Compresses plain text with a fixed dictionary of characters, punctuation and common words,
    each mapped to a 4 or 7 bit code. The dictionary is a two column CSV file of token,bits rows
    (use <space> and <newline> for those characters)."
)]
pub struct Args {
    /// Sets verbosity. -v for debug detail, -vv for trace
    #[clap(short = 'v', long = "verbose", global = true, parse(from_occurrences))]
    verbose: u8,

    /// Only show errors. -qq shows nothing at all
    #[clap(short = 'q', long = "quiet", global = true, parse(from_occurrences))]
    quiet: u8,

    /// Dictionary CSV file
    #[clap(long = "table", global = true, default_value = DEFAULT_TABLE)]
    table: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a .txt file (default output: <name>.bin)
    #[clap(name = "c", alias = "compress")]
    Compress {
        /// Text file to compress
        input: String,
        /// Where to write the compressed file
        output: Option<String>,
    },
    /// Decompress a .bin file (default output: <name>.txt)
    #[clap(name = "d", alias = "decompress")]
    Decompress {
        /// Compressed file to expand
        input: String,
        /// Where to write the text
        output: Option<String>,
    },
    /// Write character frequencies of a .txt file to <name>_char_freqs.csv
    #[clap(name = "gc", alias = "char-freqs")]
    CharFreqs {
        /// Text file to analyse
        input: String,
    },
    /// Write word frequencies of a .txt file to <name>_word_freqs.csv
    #[clap(name = "gw", alias = "word-freqs")]
    WordFreqs {
        /// Text file to analyse
        input: String,
    },
    /// Compare a decompressed .txt file with its original
    #[clap(name = "acc", alias = "accuracy")]
    Accuracy {
        /// The original text
        original: String,
        /// The text produced by decompression
        decompressed: String,
    },
}

/// Parse the process arguments, set the log level and report what we are about to do.
pub fn codec_opts_init() -> CodecOpts {
    let opts = opts_from_args(Args::parse());
    log::set_max_level(opts.verbose.level());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    log::debug!("Using table {}", opts.table.display());
    opts
}

/// Copy what clap found into our internal structure.
fn opts_from_args(args: Args) -> CodecOpts {
    let (op_mode, input, compare, output) = match args.command {
        Command::Compress { input, output } => (Mode::Compress, input, None, output),
        Command::Decompress { input, output } => (Mode::Decompress, input, None, output),
        Command::CharFreqs { input } => (Mode::CharFreqs, input, None, None),
        Command::WordFreqs { input } => (Mode::WordFreqs, input, None, None),
        Command::Accuracy {
            original,
            decompressed,
        } => (Mode::Accuracy, original, Some(decompressed), None),
    };

    let mut opts = CodecOpts::new(op_mode, input);
    opts.compare = compare.map(PathBuf::from);
    opts.output = output.map(PathBuf::from);
    opts.table = PathBuf::from(args.table);
    opts.verbose = Verbosity::from_flags(args.quiet, args.verbose);
    opts
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{opts_from_args, require_extension, Args, Mode, Verbosity, DEFAULT_TABLE};
    use crate::error::CodecError;
    use clap::Parser;

    fn parse(argv: &[&str]) -> super::CodecOpts {
        opts_from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn compress_defaults_test() {
        let opts = parse(&["shorthand", "c", "story.txt"]);
        assert_eq!(opts.op_mode, Mode::Compress);
        assert_eq!(opts.input, PathBuf::from("story.txt"));
        assert_eq!(opts.output, None);
        assert_eq!(opts.table, PathBuf::from(DEFAULT_TABLE));
        assert_eq!(opts.verbose, Verbosity::Info);
    }

    #[test]
    fn aliases_and_output_test() {
        let opts = parse(&["shorthand", "--table", "t.csv", "decompress", "story.bin", "out.txt"]);
        assert_eq!(opts.op_mode, Mode::Decompress);
        assert_eq!(opts.output, Some(PathBuf::from("out.txt")));
        assert_eq!(opts.table, PathBuf::from("t.csv"));
    }

    #[test]
    fn accuracy_takes_two_files_test() {
        let opts = parse(&["shorthand", "acc", "a.txt", "b.txt"]);
        assert_eq!(opts.op_mode, Mode::Accuracy);
        assert_eq!(opts.compare, Some(PathBuf::from("b.txt")));
        assert!(Args::try_parse_from(["shorthand", "acc", "a.txt"]).is_err());
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(parse(&["shorthand", "-vv", "gc", "a.txt"]).verbose, Verbosity::Trace);
        assert_eq!(parse(&["shorthand", "-v", "gw", "a.txt"]).verbose, Verbosity::Debug);
        assert_eq!(parse(&["shorthand", "-q", "-v", "gw", "a.txt"]).verbose, Verbosity::Errors);
        assert_eq!(parse(&["shorthand", "-qq", "gw", "a.txt"]).verbose, Verbosity::Quiet);
    }

    #[test]
    fn unknown_mode_rejected_test() {
        assert!(Args::try_parse_from(["shorthand", "x", "a.txt"]).is_err());
        assert!(Args::try_parse_from(["shorthand"]).is_err());
    }

    #[test]
    fn derived_output_test() {
        let opts = parse(&["shorthand", "c", "books/story.txt"]);
        assert_eq!(opts.output_or(".bin"), PathBuf::from("story.bin"));
        assert_eq!(opts.output_or("_char_freqs.csv"), PathBuf::from("story_char_freqs.csv"));

        let opts = parse(&["shorthand", "c", "story.txt", "elsewhere/out.bin"]);
        assert_eq!(opts.output_or(".bin"), PathBuf::from("elsewhere/out.bin"));
    }

    #[test]
    fn extension_check_test() {
        assert!(require_extension(&PathBuf::from("a/story.txt"), "txt", &Mode::Compress).is_ok());
        assert!(matches!(
            require_extension(&PathBuf::from("story.bin"), "txt", &Mode::Compress),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(require_extension(&PathBuf::from("story"), "bin", &Mode::Decompress).is_err());
    }
}
