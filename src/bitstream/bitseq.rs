use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::CodecError;

/// An ordered, growable run of single bits. Codes, encoder output and unpacked payloads
/// are all carried as a BitSeq.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSeq {
    bits: Vec<bool>,
}

impl BitSeq {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Adds one bit to the end of the sequence.
    pub fn append(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Adds every bit of other, in order, to the end of the sequence.
    pub fn concat(&mut self, other: &BitSeq) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at index, or None past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Copies out `len` bits starting at `start`, or None if the sequence is too short.
    pub fn range(&self, start: usize, len: usize) -> Option<BitSeq> {
        let end = start.checked_add(len)?;
        self.bits.get(start..end).map(|slice| BitSeq {
            bits: slice.to_vec(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitSeq {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitSeq {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Parses a table bit pattern such as "0010110". Anything other than '0' and '1',
/// including an empty pattern, is rejected.
impl FromStr for BitSeq {
    type Err = CodecError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        if pattern.is_empty() {
            return Err(CodecError::MalformedBitPattern {
                pattern: pattern.to_string(),
            });
        }
        pattern
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CodecError::MalformedBitPattern {
                    pattern: pattern.to_string(),
                }),
            })
            .collect()
    }
}

impl Display for BitSeq {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
