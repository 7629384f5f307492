//! pt-BR numeric text handling: `.` groups thousands, `,` separates decimals.
//! These rules apply on both the read path (user input, stored cost strings)
//! and the write path (summary text, tables), so previously entered values
//! round-trip through parse/format unchanged.

/// Parse a locale-formatted decimal string ("1.052,5" -> 1052.5).
/// Blank input is absence, not zero — callers decide what absence means.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

/// Parse a locale-formatted currency string; blank or unparseable is zero.
pub fn parse_currency(input: &str) -> f64 {
    parse_decimal(input).unwrap_or(0.0)
}

/// Display a distance the way the original records do: minimal digits,
/// comma decimal separator ("12,7", "30").
pub fn format_distance(value: f64) -> String {
    value.to_string().replace('.', ",")
}

/// Two-decimal amount with `.` thousands grouping and `,` decimals
/// ("1234.5" -> "1.234,50").
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let whole_grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{whole_grouped},{frac}")
    } else {
        format!("{whole_grouped},{frac}")
    }
}

/// Currency display: symbol prefix plus two-decimal amount ("R$ 1.234,50").
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_amount(value))
}

/// Normalize an entered currency string to its canonical display form,
/// treating blank as zero ("3,5" -> "3,50", "" -> "0,00").
pub fn normalize_currency(input: &str) -> String {
    format_amount(parse_currency(input))
}
