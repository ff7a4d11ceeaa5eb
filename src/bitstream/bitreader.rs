//! BitReader: reads the packed payload written by the BitPacker.
//!
//! The payload starts with a little-endian u64 holding the number of meaningful bits. The bits
//! follow most significant bit first; padding in the final byte is discarded.
//!

use log::trace;

use super::bitpacker::HEADER_BYTES;
use super::bitseq::BitSeq;
use crate::error::{CodecError, Result};

const BIT_MASK: u8 = 0xff;

/// Reads bits, MSB first, from a byte buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return Option<bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bit(&mut self) -> Option<bool> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit == 1)
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() * 8).saturating_sub(self.cursor * 8 + self.bit_index)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

/// Splits a payload into its bit count and packed bytes, and returns exactly that many bits.
pub fn unpack(payload: &[u8]) -> Result<BitSeq> {
    if payload.len() < HEADER_BYTES {
        return Err(CodecError::MalformedPayload(format!(
            "expected an {} byte bit count, found only {} bytes",
            HEADER_BYTES,
            payload.len()
        )));
    }
    let (header, body) = payload.split_at(HEADER_BYTES);
    let mut count = [0_u8; HEADER_BYTES];
    count.copy_from_slice(header);
    let bit_count = u64::from_le_bytes(count);

    let available = body.len() as u64 * 8;
    if bit_count > available {
        return Err(CodecError::MalformedPayload(format!(
            "header claims {} bits but only {} are present",
            bit_count, available
        )));
    }
    if available - bit_count >= 8 {
        return Err(CodecError::MalformedPayload(format!(
            "{} trailing bytes beyond the {} bits in the header",
            (available - bit_count) / 8,
            bit_count
        )));
    }

    let mut br = BitReader::new(body);
    let mut bits = BitSeq::with_capacity(bit_count as usize);
    for _ in 0..bit_count {
        // bit_count <= available, so the reader cannot run dry here.
        match br.bit() {
            Some(bit) => bits.append(bit),
            None => break,
        }
    }
    trace!("Unpacked {} bits, stopped at {}.", bits.len(), br.loc());
    Ok(bits)
}

#[cfg(test)]
mod test {
    use super::{unpack, BitReader};
    use crate::bitstream::{bitpacker::pack, bitseq::BitSeq};
    use crate::error::CodecError;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(true));
        for _ in 0..6 {
            assert_eq!(br.bit(), Some(false));
        }
        assert_eq!(br.remaining(), 1);
        assert_eq!(br.bit(), Some(true));
        assert_eq!(br.bit(), None);
        assert_eq!(br.remaining(), 0);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..41 {
            br.bit();
        }
        assert_eq!(br.loc(), "[5.1]");
    }

    #[test]
    fn pack_unpack_lengths_test() {
        // Lengths on and off byte boundaries, including zero.
        for len in [0_usize, 1, 7, 8, 9, 21, 64, 100] {
            let bits: BitSeq = (0..len).map(|i| (i * 7 + i / 3) % 3 == 0).collect();
            let back = unpack(&pack(&bits)).unwrap();
            assert_eq!(back.len(), len);
            assert_eq!(back, bits);
        }
    }

    #[test]
    fn short_header_test() {
        assert!(matches!(
            unpack(&[1, 0, 0]),
            Err(CodecError::MalformedPayload(_))
        ));
    }

    #[test]
    fn count_exceeds_body_test() {
        let mut payload = 9_u64.to_le_bytes().to_vec();
        payload.push(0xff);
        assert!(matches!(
            unpack(&payload),
            Err(CodecError::MalformedPayload(_))
        ));
    }

    #[test]
    fn padding_is_discarded_test() {
        let mut payload = 3_u64.to_le_bytes().to_vec();
        payload.push(0b1011_1111);
        assert_eq!(unpack(&payload).unwrap().to_string(), "101");
    }
}
