use log::{debug, info};

use crate::bitstream::BitSeq;
use crate::error::{CodecError, Result};
use crate::table::{code_len, CodeTable, DecodingTable, TableMode};
use crate::tools::cli::{require_extension, CodecOpts};
use crate::tools::files::{BinaryFile, CsvFile, TextFile};

/// Read the code starting at cursor and move cursor past it. The leading bit sets the length:
/// 0 for a 7 bit code, 1 for a 4 bit code.
pub fn next_code(bits: &BitSeq, cursor: &mut usize) -> Result<BitSeq> {
    let position = *cursor;
    let remaining = bits.len().saturating_sub(position);
    let lead = bits.get(position).ok_or(CodecError::TruncatedStream {
        position,
        needed: 1,
        remaining,
    })?;
    let needed = code_len(lead);
    let code = bits
        .range(position, needed)
        .ok_or(CodecError::TruncatedStream {
            position,
            needed,
            remaining,
        })?;
    *cursor += needed;
    Ok(code)
}

/// Decode a whole bit sequence back to text. Unknown codes come back as `#`; a stream that
/// ends part way through a code is an error.
pub fn decompress_bits(table: &DecodingTable, bits: &BitSeq) -> Result<String> {
    let mut text = String::new();
    let mut cursor = 0;
    let mut codes = 0_usize;

    while cursor < bits.len() {
        let code = next_code(bits, &mut cursor)?;
        text.push_str(table.decode(&code)?);
        codes += 1;
    }

    debug!("Decoded {} codes into {} bytes of text.", codes, text.len());
    Ok(text)
}

/// Decompress the binary file named in opts, writing the recovered text.
pub fn decompress(opts: &CodecOpts) -> Result<()> {
    require_extension(&opts.input, "bin", &opts.op_mode)?;

    let bits = BinaryFile::open(&opts.input).into_data()?;
    info!("Read {} bits from {}.", bits.len(), opts.input.display());

    let table = CodeTable::from_rows(TableMode::Decompress, CsvFile::open(&opts.table).data()?)?
        .into_decoding()?;
    info!(
        "Loaded {} table entries from {}.",
        table.len(),
        opts.table.display()
    );

    let text = decompress_bits(&table, &bits)?;

    let output = TextFile::with_data(opts.output_or(".txt"), text);
    output.write()?;

    info!(
        "<green>Successfully decompressed '{}' to '{}'.</>",
        opts.input.display(),
        output.path().display()
    );
    Ok(())
}
