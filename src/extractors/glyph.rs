//! Glyph-to-digit decoding for obfuscated phone numbers
//!
//! The legacy listing template never prints phone digits. Each digit is an
//! empty `<span>` whose icon-font class selects the glyph. This table is the
//! site's current class-to-digit contract; update it here when the site
//! rotates its class names.

const GLYPH_DIGITS: [(&str, char); 10] = [
    ("icon-acb", '0'),
    ("icon-yz", '1'),
    ("icon-wx", '2'),
    ("icon-vu", '3'),
    ("icon-ts", '4'),
    ("icon-rq", '5'),
    ("icon-po", '6'),
    ("icon-nm", '7'),
    ("icon-lk", '8'),
    ("icon-ji", '9'),
];

/// Digit for one marker class, `None` for anything outside the table.
pub fn glyph_digit(class: &str) -> Option<char> {
    GLYPH_DIGITS
        .iter()
        .find(|(token, _)| *token == class)
        .map(|&(_, digit)| digit)
}

/// Decode markers in document order. Each marker is the class list of one
/// element; its first known class yields the digit, unknown markers are
/// skipped.
pub fn decode_markers<'a, M, C>(markers: M) -> String
where
    M: IntoIterator<Item = C>,
    C: IntoIterator<Item = &'a str>,
{
    markers
        .into_iter()
        .filter_map(|classes| classes.into_iter().find_map(glyph_digit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_digit_mapped_once() {
        let digits: String = GLYPH_DIGITS.iter().map(|(_, d)| *d).collect();
        assert_eq!(digits, "0123456789");
        assert_eq!(glyph_digit("icon-ts"), Some('4'));
        assert_eq!(glyph_digit("icon-dc"), None);
    }

    #[test]
    fn test_document_order_preserved() {
        let decoded = decode_markers(vec![
            vec!["mobilesv", "icon-ts"],
            vec!["mobilesv", "icon-wx"],
        ]);
        assert_eq!(decoded, "42");
    }

    #[test]
    fn test_unknown_markers_skipped() {
        let decoded = decode_markers(vec![
            vec!["icon-dc"],
            vec!["icon-ji"],
            vec![],
            vec!["icon-hg", "icon-acb"],
        ]);
        assert_eq!(decoded, "90");
    }
}
