/// Insert thousands separators into a run of ASCII digits.
fn format_with_commas(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a money amount with two decimals, e.g. `-1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    // -0.001 rounds to 0.00, which should not get a sign.
    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };

    format!("{sign}{}.{cents}", format_with_commas(whole))
}
