use rust_decimal::Decimal;

/// Currency symbol used in human-readable reasons.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with the currency symbol and thousands separators.
///
/// The decimal scale is kept as-is, so `39000.50` renders as `₹39,000.50`.
pub fn format_amount(amount: Decimal) -> String {
    let raw = amount.abs().to_string();
    let (whole, fraction) = match raw.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    match fraction {
        Some(f) => format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, grouped, f),
        None => format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped),
    }
}
