//! The single error type shared by the table, the codec drivers and the file tools.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::table::TableMode;

#[derive(Error, Debug)]
pub enum CodecError {
    // --- Table and codec errors
    #[error("cannot {operation} with a table opened in {mode} mode")]
    WrongMode {
        operation: &'static str,
        mode: TableMode,
    },

    #[error("cannot {0} an empty input")]
    EmptyInput(&'static str),

    #[error("invalid table row {line}: expected 2 columns, got {columns} ({row})")]
    MalformedTableRow {
        line: usize,
        columns: usize,
        row: String,
    },

    #[error("invalid bit pattern {pattern:?}: expected only '0' and '1'")]
    MalformedBitPattern { pattern: String },

    #[error("'#' not found in the compression table")]
    MissingFallbackEntry,

    #[error("compressed stream ends mid-code at bit {position}: code needs {needed} bits, {remaining} remain")]
    TruncatedStream {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("failed to encode token {token:?}: {source}")]
    Encode {
        token: String,
        #[source]
        source: Box<CodecError>,
    },

    // --- Payload and I/O errors
    #[error("malformed compressed payload: {0}")]
    MalformedPayload(String),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
