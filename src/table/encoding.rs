use log::{trace, warn};
use rustc_hash::FxHashMap;

use super::{Entry, FALLBACK};
use crate::bitstream::BitSeq;
use crate::error::{CodecError, Result};

/// Token -> code lookup, used while compressing.
#[derive(Debug)]
pub struct EncodingTable {
    codes: FxHashMap<String, BitSeq>,
    /// Multi-character tokens, longest first, then in byte order. This fixes which shorthand
    /// wins when several occur inside one token.
    shorthands: Vec<String>,
}

impl EncodingTable {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut codes = FxHashMap::default();
        for Entry { token, code } in entries {
            if codes.contains_key(&token) {
                warn!("Token {:?} appears more than once in the table. Keeping the first.", token);
                continue;
            }
            codes.insert(token, code);
        }

        let mut shorthands: Vec<String> = codes
            .keys()
            .filter(|token| token.chars().count() > 1)
            .cloned()
            .collect();
        shorthands.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self { codes, shorthands }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Map a token to bits.
    ///
    /// An exact hit returns the token's own code. Otherwise, for a multi-character token, the
    /// longest shorthand found inside it is used, with the text either side of it spelled out
    /// one character at a time. With no shorthand the whole token is spelled out. Characters
    /// with no code of their own are written as the `#` code.
    pub fn encode(&self, token: &str) -> Result<BitSeq> {
        if token.is_empty() {
            return Err(CodecError::EmptyInput("encode"));
        }
        if let Some(code) = self.codes.get(token) {
            return Ok(code.clone());
        }

        let mut out = BitSeq::new();
        if token.chars().nth(1).is_some() {
            if let Some((pos, shorthand)) = self.find_shorthand(token) {
                trace!("Found shorthand {:?} in {:?} at {}.", shorthand, token, pos);
                self.encode_chars(&token[..pos], &mut out)?;
                out.concat(&self.codes[shorthand]);
                self.encode_chars(&token[pos + shorthand.len()..], &mut out)?;
                return Ok(out);
            }
        }
        self.encode_chars(token, &mut out)?;
        Ok(out)
    }

    /// First shorthand (in search order) that occurs in token, with its leftmost byte offset.
    fn find_shorthand<'t>(&'t self, token: &str) -> Option<(usize, &'t str)> {
        self.shorthands
            .iter()
            .filter(|shorthand| shorthand.len() < token.len())
            .find_map(|shorthand| token.find(shorthand.as_str()).map(|pos| (pos, shorthand.as_str())))
    }

    /// Append the code of every character in text, substituting `#` for unknown characters.
    fn encode_chars(&self, text: &str, out: &mut BitSeq) -> Result<()> {
        let mut buf = [0_u8; 4];
        for c in text.chars() {
            match self.codes.get(&*c.encode_utf8(&mut buf)) {
                Some(code) => out.concat(code),
                None => out.concat(self.fallback()?),
            }
        }
        Ok(())
    }

    fn fallback(&self) -> Result<&BitSeq> {
        self.codes
            .get(FALLBACK)
            .ok_or(CodecError::MissingFallbackEntry)
    }
}
