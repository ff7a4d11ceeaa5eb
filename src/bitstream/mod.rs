//! The bitstream module forms the I/O subsystem for the codec.
//!
//! Every code in the dictionary is a short run of bits, and the compressed file is nothing more
//! than those runs laid end to end. BitSeq carries them in memory. The BitPacker folds a BitSeq
//! into bytes behind a 64-bit bit count so that padding in the final byte is never mistaken
//! for data, and the BitReader undoes that on the way back in.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod bitseq;

pub use bitpacker::pack;
pub use bitreader::unpack;
pub use bitseq::BitSeq;
