//! Whole-file wrappers for the three kinds of file the tool touches: plain text, the packed
//! binary payload, and the CSV dictionary.
//!
//! A DataFile starts unloaded and reads itself from disk the first time its data is asked for.
//! Writing always works from the snapshot the file currently holds. Handles are opened and
//! closed inside each call, so nothing stays open between operations.

use std::borrow::Cow;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::debug;

use crate::bitstream::{pack, unpack, BitSeq};
use crate::error::{CodecError, Result};

/// How one kind of file is turned into data and back.
pub trait Format {
    type Data;
    /// Short name used in log and error messages.
    const NAME: &'static str;
    fn decode(bytes: Vec<u8>) -> Result<Self::Data>;
    fn encode(data: &Self::Data) -> Vec<u8>;
}

/// A path plus, once read or set, the contents of that file.
pub struct DataFile<F: Format> {
    path: PathBuf,
    data: Option<F::Data>,
    format: PhantomData<F>,
}

impl<F: Format> DataFile<F> {
    /// A file that has not been read yet.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            data: None,
            format: PhantomData,
        }
    }

    /// A file whose contents are already known, typically ready to be written.
    pub fn with_data<P: Into<PathBuf>>(path: P, data: F::Data) -> Self {
        Self {
            path: path.into(),
            data: Some(data),
            format: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The file contents, read from disk on first access.
    pub fn data(&mut self) -> Result<&F::Data> {
        if self.data.is_none() {
            self.data = Some(self.read()?);
        }
        self.data
            .as_ref()
            .ok_or_else(|| CodecError::InvalidInput(format!("{} was not loaded", self.path.display())))
    }

    /// Consume the wrapper and hand back its contents, reading them if need be.
    pub fn into_data(mut self) -> Result<F::Data> {
        match self.data.take() {
            Some(data) => Ok(data),
            None => self.read(),
        }
    }

    /// Write the current snapshot to disk. Returns the number of bytes written.
    pub fn write(&self) -> Result<usize> {
        let data = self.data.as_ref().ok_or_else(|| {
            CodecError::InvalidInput(format!(
                "nothing to write to {} file {}",
                F::NAME,
                self.path.display()
            ))
        })?;
        let bytes = F::encode(data);
        fs::write(&self.path, &bytes).map_err(|source| CodecError::File {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {} file {}.", bytes.len(), F::NAME, self.path.display());
        Ok(bytes.len())
    }

    fn read(&self) -> Result<F::Data> {
        let bytes = fs::read(&self.path).map_err(|source| CodecError::File {
            path: self.path.clone(),
            source,
        })?;
        debug!("Read {} bytes from {} file {}.", bytes.len(), F::NAME, self.path.display());
        F::decode(bytes)
    }
}

/// Plain text. Invalid UTF-8 is replaced rather than rejected, and so ends up as `#` when encoded.
#[derive(Debug)]
pub struct Text;
impl Format for Text {
    type Data = String;
    const NAME: &'static str = "text";

    fn decode(bytes: Vec<u8>) -> Result<String> {
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    fn encode(data: &String) -> Vec<u8> {
        data.as_bytes().to_vec()
    }
}

/// The packed payload: a u64 bit count followed by the bits.
#[derive(Debug)]
pub struct Binary;
impl Format for Binary {
    type Data = BitSeq;
    const NAME: &'static str = "binary";

    fn decode(bytes: Vec<u8>) -> Result<BitSeq> {
        unpack(&bytes)
    }

    fn encode(data: &BitSeq) -> Vec<u8> {
        pack(data)
    }
}

/// Comma separated rows of string fields.
#[derive(Debug)]
pub struct Csv;
impl Format for Csv {
    type Data = Vec<Vec<String>>;
    const NAME: &'static str = "CSV";

    fn decode(bytes: Vec<u8>) -> Result<Vec<Vec<String>>> {
        let text = Text::decode(bytes)?;
        Ok(text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(parse_csv_line)
            .collect())
    }

    fn encode(data: &Vec<Vec<String>>) -> Vec<u8> {
        let mut out = String::new();
        for row in data {
            let fields: Vec<Cow<'_, str>> = row.iter().map(|f| quote_csv_field(f)).collect();
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out.into_bytes()
    }
}

pub type TextFile = DataFile<Text>;
pub type BinaryFile = DataFile<Binary>;
pub type CsvFile = DataFile<Csv>;

/// Split one line into fields. A field that opens with `"` and has a matching close quote right
/// before a comma (or the end of the line) is taken as quoted, with `""` standing for one quote.
/// Anything else, including a lone `"`, is taken literally.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut rest = line;
    loop {
        let (field, remainder) = match quoted_field(rest) {
            Some(quoted) => quoted,
            None => match rest.find(',') {
                Some(pos) => (rest[..pos].to_string(), Some(&rest[pos + 1..])),
                None => (rest.to_string(), None),
            },
        };
        fields.push(field);
        match remainder {
            Some(r) => rest = r,
            None => break,
        }
    }
    fields
}

/// Try to read a quoted field from the front of s. Returns the field and whatever follows the
/// separating comma (None at end of line).
fn quoted_field(s: &str) -> Option<(String, Option<&str>)> {
    let body = s.strip_prefix('"')?;
    let mut field = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            field.push(c);
            continue;
        }
        if let Some(&(_, '"')) = chars.peek() {
            field.push('"');
            chars.next();
            continue;
        }
        // Closing quote: valid only at a field boundary.
        let after = &body[i + 1..];
        return match after.strip_prefix(',') {
            Some(next) => Some((field, Some(next))),
            None if after.is_empty() => Some((field, None)),
            None => None,
        };
    }
    None
}

fn quote_csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.starts_with('"') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod test {
    use super::{parse_csv_line, BinaryFile, Csv, CsvFile, Format, TextFile};
    use crate::bitstream::BitSeq;
    use crate::error::CodecError;

    #[test]
    fn plain_fields_test() {
        assert_eq!(parse_csv_line("a,0000000"), vec!["a", "0000000"]);
        assert_eq!(parse_csv_line(" ,0000001"), vec![" ", "0000001"]);
        assert_eq!(parse_csv_line("X,1,Y"), vec!["X", "1", "Y"]);
        assert_eq!(parse_csv_line("a,"), vec!["a", ""]);
    }

    #[test]
    fn quoted_fields_test() {
        assert_eq!(parse_csv_line("\",\",0101010"), vec![",", "0101010"]);
        assert_eq!(parse_csv_line("\"\"\"\",1110"), vec!["\"", "1110"]);
        assert_eq!(parse_csv_line("\"hi, there\",12.5"), vec!["hi, there", "12.5"]);
    }

    #[test]
    fn lone_quote_is_literal_test() {
        assert_eq!(parse_csv_line("\",0100100"), vec!["\"", "0100100"]);
        assert_eq!(parse_csv_line("\"a\"b,1"), vec!["\"a\"b", "1"]);
    }

    #[test]
    fn csv_decode_skips_blank_and_crlf_test() {
        let rows = Csv::decode(b"a,0000000\r\n\n#,1000\n".to_vec()).unwrap();
        assert_eq!(rows, vec![vec!["a", "0000000"], vec!["#", "1000"]]);
    }

    #[test]
    fn csv_encode_quotes_commas_test() {
        let rows = vec![
            vec!["Character".to_string(), "Frequency (%)".to_string()],
            vec![",".to_string(), "1.5".to_string()],
        ];
        let bytes = Csv::encode(&rows);
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "Character,Frequency (%)\n\",\",1.5\n"
        );
        assert_eq!(Csv::decode(bytes).unwrap(), rows);
    }

    #[test]
    fn lazy_load_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "Hello, World!\n").unwrap();

        let mut file = TextFile::open(&path);
        assert!(!file.is_loaded());
        assert_eq!(file.data().unwrap(), "Hello, World!\n");
        assert!(file.is_loaded());

        // The snapshot does not change when the disk does.
        std::fs::write(&path, "changed").unwrap();
        assert_eq!(file.data().unwrap(), "Hello, World!\n");
    }

    #[test]
    fn binary_write_read_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        let bits: BitSeq = "10101010101".parse().unwrap();

        let written = BinaryFile::with_data(&path, bits.clone()).write().unwrap();
        assert_eq!(written, 8 + 2);
        assert_eq!(BinaryFile::open(&path).into_data().unwrap(), bits);
    }

    #[test]
    fn csv_write_read_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let rows = vec![
            vec!["Name".to_string(), "City".to_string()],
            vec!["Alice".to_string(), "New York".to_string()],
        ];
        CsvFile::with_data(&path, rows.clone()).write().unwrap();
        assert_eq!(CsvFile::open(&path).into_data().unwrap(), rows);
    }

    #[test]
    fn missing_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = TextFile::open(dir.path().join("absent.txt"));
        assert!(matches!(file.data(), Err(CodecError::File { .. })));
    }

    #[test]
    fn write_unloaded_test() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile::open(dir.path().join("never.txt"));
        assert!(matches!(file.write(), Err(CodecError::InvalidInput(_))));
    }
}
