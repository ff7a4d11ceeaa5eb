use rustc_hash::FxHashMap;

use super::{Entry, FALLBACK};
use crate::bitstream::BitSeq;
use crate::error::{CodecError, Result};

/// Code -> token lookup, used while decompressing.
#[derive(Debug)]
pub struct DecodingTable {
    tokens: FxHashMap<BitSeq, String>,
}

impl DecodingTable {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        // Repeated codes were already reported while parsing; the first one wins.
        let mut tokens = FxHashMap::default();
        for Entry { token, code } in entries {
            tokens.entry(code).or_insert(token);
        }
        Self { tokens }
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Map a code back to its token. Unknown codes read back as `#` rather than failing.
    pub fn decode(&self, bits: &BitSeq) -> Result<&str> {
        if bits.is_empty() {
            return Err(CodecError::EmptyInput("decode"));
        }
        Ok(self.tokens.get(bits).map(String::as_str).unwrap_or(FALLBACK))
    }
}
