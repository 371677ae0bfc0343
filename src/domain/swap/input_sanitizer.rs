//! Normalizes raw amount input into a decimal literal

/// Keep ASCII digits and the first `.`, drop everything else.
///
/// The result is always a (possibly empty) non-negative decimal literal.
/// Leading zeros and a bare `.` pass through; whether the value is a usable
/// positive amount is decided by [`parse_positive_amount`].
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' if !seen_point => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }
    out
}

/// Parse an amount field, accepting only finite values greater than zero
pub fn parse_positive_amount(amount: &str) -> Option<f64> {
    if amount.is_empty() {
        return None;
    }
    amount
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}
