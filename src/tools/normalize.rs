/// Rewrites typographic punctuation into the plain ASCII forms a dictionary is likely to hold.
/// Smart quotes become straight quotes, the em dash a hyphen, the ellipsis three dots, accented
/// e a plain e, and a non-breaking space an ordinary space. Zero-width spaces are dropped.
pub fn normalize_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2018}' | '\u{2019}' | '\u{2039}' | '\u{203A}' => out.push('\''),
            '\u{00E9}' => out.push('e'),
            '\u{2014}' => out.push('-'),
            '\u{00A0}' => out.push(' '),
            '\u{200B}' => {}
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::normalize_punctuation;

    #[test]
    fn quotes_and_dashes_test() {
        assert_eq!(
            normalize_punctuation("\u{201C}Don\u{2019}t\u{201D}\u{2014}she said\u{2026}"),
            "\"Don't\"-she said..."
        );
    }

    #[test]
    fn spaces_and_accents_test() {
        assert_eq!(normalize_punctuation("caf\u{00E9}\u{00A0}au\u{200B}lait"), "cafe aulait");
    }

    #[test]
    fn plain_text_unchanged_test() {
        let text = "Nothing to do here, really.\n";
        assert_eq!(normalize_punctuation(text), text);
    }
}
