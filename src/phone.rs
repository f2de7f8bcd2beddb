//! Indian phone number normalization
//!
//! Canonical display form is `+91 DDDDD DDDDD`. Anything that cannot be
//! reduced to exactly ten national digits is passed through untouched.

const COUNTRY_CODE: &str = "91";
const NATIONAL_LEN: usize = 10;

/// Normalize arbitrary phone text to `+91 DDDDD DDDDD`, or return it unchanged.
pub fn normalize(raw: &str) -> String {
    let digits = digits_only(raw);

    let mut national = digits.as_str();
    if national.starts_with(COUNTRY_CODE) && national.len() > NATIONAL_LEN {
        national = &national[COUNTRY_CODE.len()..];
    }
    if let Some(rest) = national.strip_prefix('0') {
        national = rest;
    }

    canonical_from_digits(national).unwrap_or_else(|| raw.to_string())
}

/// Render exactly ten ASCII digits in canonical grouping.
pub fn canonical_from_digits(digits: &str) -> Option<String> {
    if digits.len() != NATIONAL_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("+{} {} {}", COUNTRY_CODE, &digits[..5], &digits[5..]))
}

/// Canonical form from the trailing ten digits of `raw`, if it has at least ten.
pub fn canonical_from_last_ten(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    if digits.len() < NATIONAL_LEN {
        return None;
    }
    canonical_from_digits(&digits[digits.len() - NATIONAL_LEN..])
}

/// Whether `text` already has the `+91 DDDDD DDDDD` shape.
pub fn is_canonical(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 15
        && text.starts_with("+91 ")
        && bytes[9] == b' '
        && bytes[4..9].iter().all(u8::is_ascii_digit)
        && bytes[10..].iter().all(u8::is_ascii_digit)
}

pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
