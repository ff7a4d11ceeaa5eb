//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use shorthand::compression::{compress::compress, decompress::decompress};
use shorthand::tools::cli::{codec_opts_init, Mode};
use shorthand::tools::freq_count::{write_char_freqs, write_word_freqs};
use shorthand::tools::report::report_accuracy;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start logging: {}", e);
    }

    let options = codec_opts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Compress => compress(&options),
        Mode::Decompress => decompress(&options),
        Mode::CharFreqs => write_char_freqs(&options),
        Mode::WordFreqs => write_word_freqs(&options),
        Mode::Accuracy => report_accuracy(&options).map(|_| ()),
    };

    match result {
        Ok(()) => {
            info!("Done.\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
