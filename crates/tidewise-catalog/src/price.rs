/// Parses a display price such as `"$1,299.00"` or `"49.99 USD"` into a number.
///
/// Currency symbols, letters, thousands separators and whitespace are ignored.
/// Returns `None` when no finite, non-negative number remains, or when the
/// price uses a decimal comma (`"12,50 €"`, `"1.299,00"`).
pub fn parse_price(raw: &str) -> Option<f64> {
    if has_decimal_comma(raw) {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// A comma after the last dot followed by exactly two digits.
fn has_decimal_comma(raw: &str) -> bool {
    let Some(comma) = raw.rfind(',') else {
        return false;
    };
    if raw.rfind('.').is_some_and(|dot| dot > comma) {
        return false;
    }
    let digits = raw[comma + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    digits == 2
}
