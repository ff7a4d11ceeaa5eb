use log::{debug, info, trace};

use crate::bitstream::BitSeq;
use crate::error::{CodecError, Result};
use crate::table::{CodeTable, EncodingTable, TableMode};
use crate::tools::cli::{require_extension, CodecOpts};
use crate::tools::files::{BinaryFile, CsvFile, TextFile};
use crate::tools::normalize::normalize_punctuation;
use crate::tools::report::percent_reduction;

/*
    Text is cut into tokens at every space and newline. The delimiter stays on the end of
    the token it closes, so "the cat" is looked up as "the " and then "cat". That lets the
    dictionary hold shorthands such as "the " which swallow their trailing space. Whatever
    follows the last delimiter is looked up on its own.

    Tokens are encoded strictly in the order they appear and their codes laid end to end.
*/

/// Encode a whole text. Fails on the first token the table cannot encode, naming that token.
pub fn compress_text(table: &EncodingTable, text: &str) -> Result<BitSeq> {
    let mut out = BitSeq::with_capacity(text.len() * 7);
    let mut start = 0;
    let mut tokens = 0_usize;

    for (i, c) in text.char_indices() {
        if c == ' ' || c == '\n' {
            // Both delimiters are one byte wide.
            encode_token(table, &text[start..=i], &mut out)?;
            start = i + 1;
            tokens += 1;
        }
    }
    if start < text.len() {
        encode_token(table, &text[start..], &mut out)?;
        tokens += 1;
    }

    debug!("Encoded {} tokens into {} bits.", tokens, out.len());
    Ok(out)
}

fn encode_token(table: &EncodingTable, token: &str, out: &mut BitSeq) -> Result<()> {
    let code = table.encode(token).map_err(|e| CodecError::Encode {
        token: token.to_string(),
        source: Box::new(e),
    })?;
    trace!("{:?} -> {}", token, code);
    out.concat(&code);
    Ok(())
}

/// Compress the text file named in opts, writing the packed result.
pub fn compress(opts: &CodecOpts) -> Result<()> {
    require_extension(&opts.input, "txt", &opts.op_mode)?;

    let mut input = TextFile::open(&opts.input);
    let original_bytes = input.data()?.len();
    let text = normalize_punctuation(input.data()?);

    let table = CodeTable::from_rows(TableMode::Compress, CsvFile::open(&opts.table).data()?)?
        .into_encoding()?;
    info!(
        "Loaded {} table entries from {}.",
        table.len(),
        opts.table.display()
    );

    let bits = compress_text(&table, &text)?;

    let output = BinaryFile::with_data(opts.output_or(".bin"), bits);
    let written = output.write()?;

    info!(
        "<green>Successfully compressed '{}' to '{}'.</>",
        opts.input.display(),
        output.path().display()
    );
    info!(
        "<magenta>Compression reduced file size by {:.2}%.</>",
        percent_reduction(original_bytes, written)
    );
    Ok(())
}
