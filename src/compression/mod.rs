//! The compression module drives the codec over whole files.
//!
//! Compression happens in the following steps:
//! - Normalize: smart quotes, dashes and the like become plain ASCII.
//! - Tokenize: the text is cut after every space and newline, each delimiter kept on the end
//!   of the word it closes.
//! - Encode: each token is looked up in the dictionary (whole, by shorthand, or a character at
//!   a time) and the codes are laid end to end.
//! - Pack: the bits are folded into bytes behind a 64-bit bit count.
//!
//! Decompression reverses this. The first bit of each code says whether 3 or 6 more bits
//! follow, so codes can be peeled off the stream one at a time with no separators.
//!

pub mod compress;
pub mod decompress;
