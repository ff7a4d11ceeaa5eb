use log::info;

use crate::error::{CodecError, Result};
use crate::tools::cli::{require_extension, CodecOpts};
use crate::tools::files::TextFile;

/// Percentage of character positions at which `decompressed` agrees with `original`, measured
/// over the longer of the two. Two empty texts agree completely.
pub fn accuracy(original: &str, decompressed: &str) -> f64 {
    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = decompressed.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 100.0;
    }
    let matching = a.iter().zip(&b).filter(|(x, y)| x == y).count();
    matching as f64 * 100.0 / longest as f64
}

/// How much smaller the compressed file is than the text it came from, in percent. Negative
/// when compression made it larger. An empty original reports 0.
pub fn percent_reduction(original_bytes: usize, compressed_bytes: usize) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    (1.0 - compressed_bytes as f64 / original_bytes as f64) * 100.0
}

/// Compare the decompressed text named in opts with its original and report the accuracy.
pub fn report_accuracy(opts: &CodecOpts) -> Result<f64> {
    let compare = opts.compare.as_ref().ok_or_else(|| {
        CodecError::InvalidInput("accuracy mode requires two .txt input files".to_string())
    })?;
    require_extension(&opts.input, "txt", &opts.op_mode)?;
    require_extension(compare, "txt", &opts.op_mode)?;

    let original = TextFile::open(&opts.input).into_data()?;
    let decompressed = TextFile::open(compare).into_data()?;
    let pct = accuracy(&original, &decompressed);

    info!(
        "<green>The accuracy of '{}' against '{}' is {:.6}%.</>",
        compare.display(),
        opts.input.display(),
        pct
    );
    Ok(pct)
}
