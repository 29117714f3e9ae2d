//! Price and rating text normalization.
//!
//! Source sites format prices however they like (`"US$ 12.50"`,
//! `"12,50 €"`, `"Price not available"`). These helpers turn that text into
//! comparable numbers without ever failing: unusable input maps to the
//! worst possible sort value instead of an error.

/// Lowercase markers that mean "this record has no usable price".
const UNAVAILABLE_MARKERS: [&str; 2] = ["not available", "n/a"];

/// Returns `true` if `text` contains one of the "not available" / "n/a"
/// markers, compared case-insensitively.
#[must_use]
pub fn is_unavailable(text: &str) -> bool {
    let lower = text.to_lowercase();
    UNAVAILABLE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Converts free-text price into a comparable number.
///
/// Rules, applied in order:
/// 1. Text containing `"not available"` or `"n/a"` (any case) is
///    `f64::INFINITY`.
/// 2. Every character except ASCII digits, `,` and `.` is dropped.
/// 3. The first `,` becomes `.`; later commas are left alone.
/// 4. The longest leading `digits[.digits]` prefix is parsed. No digits at
///    all yields `f64::INFINITY`.
///
/// Only the first comma is rewritten, so `"1,234.56"` becomes `"1.234.56"`
/// and parses as `1.234`. Locale-aware separator handling is not attempted.
///
/// The result is always a finite non-negative number or positive infinity.
#[must_use]
pub fn normalize_price(text: &str) -> f64 {
    if is_unavailable(text) {
        return f64::INFINITY;
    }

    let mut cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if let Some(pos) = cleaned.find(',') {
        cleaned.replace_range(pos..=pos, ".");
    }

    parse_decimal_prefix(&cleaned).unwrap_or(f64::INFINITY)
}

/// Extracts the leading integer from rating text, e.g. `"4 out of 5 stars"`
/// → `4`, `"4.8"` → `4`.
///
/// Leading whitespace and a single `+`/`-` sign are accepted. Text without
/// a leading number (`"No rating"`, empty) yields `0`, as does a number too
/// large for `i64`.
#[must_use]
pub fn parse_rating(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    match rest[..digit_len].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

/// Parses the longest `digits[.digits]` prefix of `s`.
///
/// Input is expected to contain only digits and `.`, as produced by
/// [`normalize_price`]. Returns `None` when the prefix has no digits.
fn parse_decimal_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    let frac_len = if bytes.get(int_len) == Some(&b'.') {
        bytes[int_len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    } else {
        0
    };

    if int_len == 0 && frac_len == 0 {
        return None;
    }

    let int_part = if int_len == 0 { "0" } else { &s[..int_len] };
    let frac_part = if frac_len == 0 {
        "0"
    } else {
        &s[int_len + 1..int_len + 1 + frac_len]
    };

    format!("{int_part}.{frac_part}").parse::<f64>().ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
