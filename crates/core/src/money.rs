//! Currency formatting and amount parsing.

use crate::error::InputError;

/// Render an amount as rupees with comma grouping and two decimals,
/// e.g. `₹4,250,000.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}₹{grouped}.{frac}")
}

/// Render a percentage rate, keeping one decimal for whole numbers
/// (`2.0`, `8.5`, `12.25`).
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        format!("{rate}")
    }
}

/// Parse a user-supplied prepayment amount.
///
/// Accepts JSON numbers and numeric strings; rejects everything else as
/// well as negative or non-finite values.
pub fn parse_amount(value: &serde_json::Value) -> Result<f64, InputError> {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64().ok_or(InputError::NotANumber)?,
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::NotANumber)?,
        _ => return Err(InputError::NotANumber),
    };

    if !amount.is_finite() || amount < 0.0 {
        return Err(InputError::OutOfRange);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(4_250_000.0), "₹4,250,000.00");
        assert_eq!(format_currency(125_000.0), "₹125,000.00");
        assert_eq!(format_currency(999.5), "₹999.50");
        assert_eq!(format_currency(0.0), "₹0.00");
    }

    #[test]
    fn currency_rounds_to_paise() {
        assert_eq!(format_currency(1234.567), "₹1,234.57");
    }

    #[test]
    fn rates_keep_one_decimal() {
        assert_eq!(format_rate(2.0), "2.0");
        assert_eq!(format_rate(8.5), "8.5");
        assert_eq!(format_rate(12.25), "12.25");
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(100000)), Ok(100_000.0));
        assert_eq!(parse_amount(&json!("2500.50")), Ok(2_500.5));
    }

    #[test]
    fn amount_rejects_garbage() {
        assert_eq!(parse_amount(&json!("lots")), Err(InputError::NotANumber));
        assert_eq!(parse_amount(&json!(null)), Err(InputError::NotANumber));
        assert_eq!(parse_amount(&json!([1])), Err(InputError::NotANumber));
        assert_eq!(parse_amount(&json!(-5)), Err(InputError::OutOfRange));
        assert_eq!(parse_amount(&json!("inf")), Err(InputError::OutOfRange));
    }
}
