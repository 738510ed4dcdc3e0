use rust_decimal::Decimal;
use std::str::FromStr;

/// Phrases that mean the listing carries no price at all. Matched exactly
/// (case-insensitive) after trimming.
const UNAVAILABLE_PHRASES: &[&str] = &["currently unavailable", "not available"];

/// Currency markers stripped during normalization and searched for by the
/// extractor's fallback scan. Longest first so "Rs." wins over a bare match.
pub const CURRENCY_MARKERS: &[&str] = &["Rs.", "INR", "US$", "₹", "$", "£", "€", "¥"];

/// Canonicalizes raw price-bearing text into a positive decimal.
///
/// Returns `None` for empty input, unavailability phrases, text with no
/// digits, unparseable remainders, and non-positive values. Malformed input
/// is a normal miss, never a panic.
///
/// Multiple dots are collapsed to the last one ("1.234.50" -> "1234.50").
/// That treats earlier dots as stray thousands separators, which is lossy
/// for formats like "1.234.567" meaning one million; the heuristic is kept
/// deliberately.
pub fn normalize(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if UNAVAILABLE_PHRASES.contains(&lowered.as_str()) {
        return None;
    }

    let mut cleaned = trimmed.to_string();
    for marker in CURRENCY_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.retain(|c| c != ',' && !c.is_whitespace());

    // Keep digits and dots only, preserving order
    let digits: String = cleaned.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let collapsed = collapse_extra_dots(&digits);

    match Decimal::from_str(&collapsed) {
        Ok(price) if price > Decimal::ZERO => Some(price),
        _ => None,
    }
}

/// Drops every dot except the last occurrence.
fn collapse_extra_dots(text: &str) -> String {
    let dot_count = text.matches('.').count();
    if dot_count <= 1 {
        return text.to_string();
    }

    let last_dot = text.rfind('.').unwrap_or(0);
    text.char_indices()
        .filter(|(i, c)| *c != '.' || *i == last_dot)
        .map(|(_, c)| c)
        .collect()
}
