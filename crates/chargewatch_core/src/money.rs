//! Dollar formatting for displayed predictions.

/// Formats an amount as `$12,345.68`: thousands separators, two decimals.
///
/// # Examples
///
/// ```
/// use chargewatch_core::format_dollars;
///
/// assert_eq!(format_dollars(12345.678), "$12,345.68");
/// assert_eq!(format_dollars(-950.0), "-$950.00");
/// ```
pub fn format_dollars(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
