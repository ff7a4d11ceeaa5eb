//! A dictionary-based text compressor.
//!
//! Text is compressed against a fixed table that gives characters, punctuation and common
//! words ("shorthands") short binary codes. Every code is either 4 or 7 bits long, and its
//! first bit says which.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> shorthand c story.txt`
//!
//! This reads the dictionary from ./csv/table.csv and writes story.bin. `shorthand d story.bin`
//! turns it back into story.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod table;
pub mod tools;

pub use error::{CodecError, Result};
