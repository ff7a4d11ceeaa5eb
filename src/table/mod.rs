//! The table module holds the dictionary that maps text to codes and back.
//!
//! A table is authored as two-column rows, `token,bitpattern`. Tokens are single characters,
//! the reserved names `<space>` and `<newline>`, or whole multi-character "shorthands" that buy
//! common words a code of their own. The first bit of every code says how long it is:
//! - 0: a short code, 7 bits in all.
//! - 1: a long code, 4 bits in all.
//!
//! Compression only ever asks token -> code and decompression only ever asks code -> token, so
//! the table is built for exactly one direction. `CodeTable::from_rows` picks which, handing back
//! either an EncodingTable or a DecodingTable. Neither can answer the other's question.
//!
//! The `#` entry is the fallback marker. Characters with no code are written as `#`, and codes
//! with no token are read back as `#`.

pub mod decoding;
pub mod encoding;

use std::fmt::{Display, Formatter};

use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::bitstream::BitSeq;
use crate::error::{CodecError, Result};

pub use decoding::DecodingTable;
pub use encoding::EncodingTable;

/// Token substituted for anything the table cannot map.
pub const FALLBACK: &str = "#";
/// Total length of a code whose discriminator bit is 0.
pub const SHORT_CODE_BITS: usize = 7;
/// Total length of a code whose discriminator bit is 1.
pub const LONG_CODE_BITS: usize = 4;

const SPACE_KEY: &str = "<space>";
const NEWLINE_KEY: &str = "<newline>";

/// Length in bits of the code introduced by the given discriminator bit.
pub fn code_len(discriminator: bool) -> usize {
    if discriminator {
        LONG_CODE_BITS
    } else {
        SHORT_CODE_BITS
    }
}

/// Which direction a table is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableMode {
    Compress,
    Decompress,
}
impl Display for TableMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One table row once the reserved whitespace names have been resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub token: String,
    pub code: BitSeq,
}

/// A dictionary opened in one mode.
#[derive(Debug)]
pub enum CodeTable {
    Encoding(EncodingTable),
    Decoding(DecodingTable),
}

impl CodeTable {
    /// Build the table for `mode` from raw two-column rows.
    pub fn from_rows(mode: TableMode, rows: &[Vec<String>]) -> Result<Self> {
        let entries = parse_rows(rows)?;
        debug!("Read {} table entries for {} mode.", entries.len(), mode);
        Ok(match mode {
            TableMode::Compress => CodeTable::Encoding(EncodingTable::from_entries(entries)),
            TableMode::Decompress => CodeTable::Decoding(DecodingTable::from_entries(entries)),
        })
    }

    pub fn mode(&self) -> TableMode {
        match self {
            CodeTable::Encoding(_) => TableMode::Compress,
            CodeTable::Decoding(_) => TableMode::Decompress,
        }
    }

    /// Map a token to its code. Only valid on a table opened for compression.
    pub fn encode(&self, token: &str) -> Result<BitSeq> {
        match self {
            CodeTable::Encoding(table) => table.encode(token),
            CodeTable::Decoding(_) => Err(CodecError::WrongMode {
                operation: "encode",
                mode: self.mode(),
            }),
        }
    }

    /// Map a code to its token. Only valid on a table opened for decompression.
    pub fn decode(&self, bits: &BitSeq) -> Result<String> {
        match self {
            CodeTable::Decoding(table) => table.decode(bits).map(str::to_string),
            CodeTable::Encoding(_) => Err(CodecError::WrongMode {
                operation: "decode",
                mode: self.mode(),
            }),
        }
    }

    pub fn into_encoding(self) -> Result<EncodingTable> {
        match self {
            CodeTable::Encoding(table) => Ok(table),
            CodeTable::Decoding(_) => Err(CodecError::WrongMode {
                operation: "encode",
                mode: TableMode::Decompress,
            }),
        }
    }

    pub fn into_decoding(self) -> Result<DecodingTable> {
        match self {
            CodeTable::Decoding(table) => Ok(table),
            CodeTable::Encoding(_) => Err(CodecError::WrongMode {
                operation: "decode",
                mode: TableMode::Compress,
            }),
        }
    }
}

/// Validate the rows and turn them into entries. Row numbers in errors are 1-based.
fn parse_rows(rows: &[Vec<String>]) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(rows.len());
    let mut seen_codes = FxHashSet::default();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != 2 {
            return Err(CodecError::MalformedTableRow {
                line: i + 1,
                columns: row.len(),
                row: row.join(","),
            });
        }
        let token = match row[0].as_str() {
            SPACE_KEY => " ".to_string(),
            NEWLINE_KEY => "\n".to_string(),
            other => other.to_string(),
        };
        let code: BitSeq = row[1].parse()?;

        // Code lengths are fixed by the discriminator bit. A mismatch will desynchronize
        // the decoder, but it is an authoring mistake rather than a parse failure.
        if let Some(lead) = code.get(0) {
            if code.len() != code_len(lead) {
                warn!(
                    "Table row {}: code {} for {:?} is {} bits, its leading bit calls for {}.",
                    i + 1,
                    code,
                    token,
                    code.len(),
                    code_len(lead)
                );
            }
        }
        if !seen_codes.insert(code.clone()) {
            warn!("Table row {}: code {} is used more than once.", i + 1, code);
        }

        entries.push(Entry { token, code });
    }
    Ok(entries)
}

#[cfg(test)]
pub(crate) mod test {
    use super::{CodeTable, TableMode};
    use crate::bitstream::BitSeq;
    use crate::error::CodecError;

    /// Turn `token,code` lines into rows the way the CSV reader does for simple tables.
    pub(crate) fn rows(lines: &[&str]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn three_columns_rejected_test() {
        let result = CodeTable::from_rows(TableMode::Compress, &rows(&["a,0000000", "X,1,Y"]));
        assert!(matches!(
            result,
            Err(CodecError::MalformedTableRow { line: 2, columns: 3, .. })
        ));
    }

    #[test]
    fn bad_bit_pattern_rejected_test() {
        let result = CodeTable::from_rows(TableMode::Decompress, &rows(&["a,00x0000"]));
        assert!(matches!(result, Err(CodecError::MalformedBitPattern { .. })));
    }

    #[test]
    fn reserved_whitespace_keys_test() {
        let table = CodeTable::from_rows(
            TableMode::Compress,
            &rows(&["<space>,0000001", "<newline>,0000011", "#,0000010"]),
        )
        .unwrap();
        assert_eq!(table.encode(" ").unwrap().to_string(), "0000001");
        assert_eq!(table.encode("\n").unwrap().to_string(), "0000011");
    }

    #[test]
    fn wrong_mode_test() {
        let lines = ["a,0000000", "#,0000010"];
        let enc = CodeTable::from_rows(TableMode::Compress, &rows(&lines)).unwrap();
        let dec = CodeTable::from_rows(TableMode::Decompress, &rows(&lines)).unwrap();
        let code: BitSeq = "0000000".parse().unwrap();

        assert!(matches!(
            enc.decode(&code),
            Err(CodecError::WrongMode { mode: TableMode::Compress, .. })
        ));
        assert!(matches!(
            dec.encode("a"),
            Err(CodecError::WrongMode { mode: TableMode::Decompress, .. })
        ));
        assert!(dec.into_encoding().is_err());
        assert!(enc.into_decoding().is_err());
    }

    #[test]
    fn construction_is_repeatable_test() {
        let lines = ["a,0000000", "b,0000100", " ,0000001", "ab ,1010", "#,0000010"];
        let first = CodeTable::from_rows(TableMode::Compress, &rows(&lines)).unwrap();
        let second = CodeTable::from_rows(TableMode::Compress, &rows(&lines)).unwrap();
        for token in ["a", "b", "ab ", "zab q", "ba", "?", "bab "] {
            assert_eq!(first.encode(token).unwrap(), second.encode(token).unwrap());
        }

        let first = CodeTable::from_rows(TableMode::Decompress, &rows(&lines)).unwrap();
        let second = CodeTable::from_rows(TableMode::Decompress, &rows(&lines)).unwrap();
        for code in ["0000000", "1010", "1111", "0111111"] {
            let code: BitSeq = code.parse().unwrap();
            assert_eq!(first.decode(&code).unwrap(), second.decode(&code).unwrap());
        }
    }
}
