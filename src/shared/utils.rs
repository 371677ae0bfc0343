//! Utility functions and helpers

/// Fractional digits kept when a conversion is written back into an amount field
pub const AMOUNT_DECIMALS: usize = 8;

/// Round to [`AMOUNT_DECIMALS`] places and render the shortest decimal string
/// for the rounded value, so `2000.00000000` becomes `2000` and float noise
/// such as `0.30000000000000004` becomes `0.3`.
pub fn round_amount(value: f64) -> String {
    let fixed = format!("{:.*}", AMOUNT_DECIMALS, value);
    match fixed.parse::<f64>() {
        Ok(rounded) => rounded.to_string(),
        Err(_) => fixed,
    }
}

/// Insert a space between every group of three integer digits
pub fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (number, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

/// USD value of an amount field, e.g. `≈ $1 234.56`
pub fn format_usd_value(amount: &str, price: Option<f64>) -> Option<String> {
    let price = price.filter(|p| *p != 0.0)?;
    if amount.is_empty() {
        return None;
    }
    let amount: f64 = amount.parse().ok()?;
    let usd = amount * price;
    if !usd.is_finite() {
        return None;
    }
    Some(format!("≈ ${}", group_thousands(&format!("{:.2}", usd))))
}

/// Unit price of a token, e.g. `$2000.000000`
pub fn format_price(price: f64) -> String {
    format!("${:.6}", price)
}

/// Exchange rate line, hidden when the rate is unavailable
pub fn format_rate(from_symbol: &str, to_symbol: &str, rate: f64) -> Option<String> {
    if rate <= 0.0 || !rate.is_finite() {
        return None;
    }
    Some(format!("1 {} = {:.8} {}", from_symbol, rate, to_symbol))
}

/// Token amount with up to eight decimals and grouped integer digits
pub fn format_token_amount(value: f64) -> String {
    group_thousands(&round_amount(value))
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_amount_drops_trailing_zeros() {
        assert_eq!(round_amount(2000.0), "2000");
        assert_eq!(round_amount(0.25), "0.25");
        assert_eq!(round_amount(0.1 + 0.2), "0.3");
        assert_eq!(round_amount(1.0 / 3.0), "0.33333333");
        assert_eq!(round_amount(0.00000001), "0.00000001");
        assert_eq!(round_amount(0.000000001), "0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1 234");
        assert_eq!(group_thousands("1234567.891"), "1 234 567.891");
        assert_eq!(group_thousands("100000.00"), "100 000.00");
    }

    #[test]
    fn test_format_usd_value() {
        assert_eq!(
            format_usd_value("1.5", Some(1234.5)),
            Some("≈ $1 851.75".to_string())
        );
        assert_eq!(format_usd_value("", Some(1.0)), None);
        assert_eq!(format_usd_value("1", None), None);
        assert_eq!(format_usd_value("1", Some(0.0)), None);
        assert_eq!(format_usd_value(".", Some(1.0)), None);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(
            format_rate("ETH", "USD", 2000.0),
            Some("1 ETH = 2000.00000000 USD".to_string())
        );
        assert_eq!(format_rate("ETH", "USD", 0.0), None);
    }

    #[test]
    fn test_format_price_and_amount() {
        assert_eq!(format_price(1.5), "$1.500000");
        assert_eq!(format_token_amount(1_000_000.0 / 3.0), "333 333.33333333");
    }
}
