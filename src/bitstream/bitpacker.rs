use log::{error, trace};

use super::bitseq::BitSeq;

/// Size of the little-endian bit count that leads every packed payload.
pub const HEADER_BYTES: usize = 8;

/// Packs a bit sequence into bytes, most significant bit first. Call flush() to push the
/// final partial byte (zero padded in its low bits) to the output.
pub struct BitPacker {
    pub output: Vec<u8>,
    pub bit_count: u64,
    queue: u8,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with room for `bits` bits of output.
    pub fn new(bits: usize) -> Self {
        Self {
            output: Vec::with_capacity(bits / 8 + 1),
            bit_count: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Puts a single bit on the stream.
    pub fn out1(&mut self, bit: bool) {
        self.queue = self.queue << 1 | bit as u8;
        self.q_bits += 1;
        self.bit_count += 1;
        if self.q_bits == 8 {
            self.output.push(self.queue); //push the packed byte out
            self.queue = 0;
            self.q_bits = 0;
        }
    }

    /// Puts every bit of the sequence on the stream.
    pub fn out_seq(&mut self, bits: &BitSeq) {
        bits.iter().for_each(|bit| self.out1(bit));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.output.push(self.queue);
            self.queue = 0;
            self.q_bits = 0;
        }
        if self.output.len() as u64 * 8 < self.bit_count {
            error!("Stuff left in the BitPacker queue.");
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.output.len(), self.q_bits)
    }
}

/// Builds the complete binary payload: the 64-bit little-endian bit count, then the packed bits.
pub fn pack(bits: &BitSeq) -> Vec<u8> {
    let mut bp = BitPacker::new(bits.len());
    bp.out_seq(bits);
    bp.flush();

    let mut payload = Vec::with_capacity(HEADER_BYTES + bp.output.len());
    payload.extend_from_slice(&bp.bit_count.to_le_bytes());
    payload.extend_from_slice(&bp.output);
    trace!(
        "Packed {} bits into {} bytes (plus header).",
        bp.bit_count,
        bp.output.len()
    );
    payload
}
