use log::info;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::tools::cli::{require_extension, CodecOpts};
use crate::tools::files::{CsvFile, TextFile};

/// Returns the share (in percent) of each character in text, most frequent first. Characters
/// with equal counts keep the order in which they first appear.
pub fn char_freqs(text: &str) -> Vec<(char, f64)> {
    freqs(text.chars())
}

/// Returns the share (in percent) of each whitespace-separated word in text, most frequent
/// first. Words with equal counts keep the order in which they first appear.
pub fn word_freqs(text: &str) -> Vec<(String, f64)> {
    freqs(text.split_whitespace().map(str::to_string))
}

fn freqs<T, I>(items: I) -> Vec<(T, f64)>
where
    T: std::hash::Hash + Eq + Clone,
    I: Iterator<Item = T>,
{
    // Index into `counts`, so first-appearance order survives the hash map.
    let mut index: FxHashMap<T, usize> = FxHashMap::default();
    let mut counts: Vec<(T, u64)> = Vec::new();
    let mut total = 0_u64;

    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
        total += 1;
    }

    // Stable sort, so ties stay in first-appearance order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(item, count)| (item, count as f64 * 100.0 / total as f64))
        .collect()
}

/// Write the character frequencies of the input text to `<stem>_char_freqs.csv`. Space and
/// newline are written by their table names so the output can seed a dictionary.
pub fn write_char_freqs(opts: &CodecOpts) -> Result<()> {
    require_extension(&opts.input, "txt", &opts.op_mode)?;
    let text = TextFile::open(&opts.input).into_data()?;

    let mut rows = vec![vec!["Character".to_string(), "Frequency (%)".to_string()]];
    rows.extend(char_freqs(&text).into_iter().map(|(c, pct)| {
        let name = match c {
            ' ' => "<space>".to_string(),
            '\n' => "<newline>".to_string(),
            other => other.to_string(),
        };
        vec![name, format!("{:.6}", pct)]
    }));

    write_rows(opts.output_or("_char_freqs.csv"), rows, "character")
}

/// Write the word frequencies of the input text to `<stem>_word_freqs.csv`.
pub fn write_word_freqs(opts: &CodecOpts) -> Result<()> {
    require_extension(&opts.input, "txt", &opts.op_mode)?;
    let text = TextFile::open(&opts.input).into_data()?;

    let mut rows = vec![vec!["Word".to_string(), "Frequency (%)".to_string()]];
    rows.extend(
        word_freqs(&text)
            .into_iter()
            .map(|(word, pct)| vec![word, format!("{:.6}", pct)]),
    );

    write_rows(opts.output_or("_word_freqs.csv"), rows, "word")
}

fn write_rows(path: std::path::PathBuf, rows: Vec<Vec<String>>, what: &str) -> Result<()> {
    let distinct = rows.len() - 1;
    let file = CsvFile::with_data(path, rows);
    file.write()?;
    info!(
        "<green>Successfully generated {} frequencies ({} distinct) and wrote to '{}'.</>",
        what,
        distinct,
        file.path().display()
    );
    Ok(())
}
