//! Piece counts (stuks) as printed on fust receipts.

/// Parse a piece count such as `"1.234"`, `"1,234"` or `"-520"`.
///
/// Both `.` and `,` are thousands separators here; receipts never carry
/// fractional counts. Returns `None` when no integer remains.
pub fn parse_quantity(s: &str) -> Option<i64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '.' && *c != ',').collect();
    cleaned.parse().ok()
}

/// Format a piece count the way receipts print it (1.234).
pub fn format_quantity(quantity: i64) -> String {
    let digits = quantity.unsigned_abs().to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if quantity < 0 {
        formatted.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(c);
    }

    formatted
}
