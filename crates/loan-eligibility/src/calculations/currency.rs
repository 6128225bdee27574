const RAND_SYMBOL: &str = "R";
const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';

/// Round a monetary amount to cents, half away from zero.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a percentage to two decimal places.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render an amount the way en-ZA displays Rand, e.g. `R 1 234,56`.
///
/// Grouping uses non-breaking spaces so the figure never wraps in a table cell.
pub fn format_currency(value: f64) -> String {
    let rounded = round_currency(value);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{RAND_SYMBOL}{GROUP_SEPARATOR}{grouped}{DECIMAL_SEPARATOR}{cents}")
}

/// Parse user-entered currency text back into an amount.
///
/// Accepts plain digits, the en-ZA display format (`R 1 234,56`), comma-grouped input
/// (`50,000.00`) and dot-grouped European input (`50.000,00`).
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let negative = trimmed.starts_with('-');
    let first_comma = trimmed.find(',');
    let last_comma = trimmed.rfind(',');
    let last_dot = trimmed.rfind('.');

    let european = matches!((first_comma, last_dot), (Some(comma), Some(dot)) if comma > dot);
    let comma_decimal = last_dot.is_none()
        && last_comma
            .map(|index| {
                let tail = &trimmed[index + 1..];
                (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false);

    let normalized: String = if european || comma_decimal {
        trimmed
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    } else {
        trimmed
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    };

    let normalized = collapse_decimal_points(&normalized);
    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let amount: f64 = normalized.parse().ok()?;
    Some(if negative { -amount } else { amount })
}

fn collapse_decimal_points(value: &str) -> String {
    match (value.find('.'), value.rfind('.')) {
        (Some(first), Some(last)) if first != last => {
            let (head, tail) = value.split_at(last);
            let mut collapsed: String = head.chars().filter(|c| *c != '.').collect();
            collapsed.push_str(tail);
            collapsed
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_currency(1234.5678), 1234.57);
        assert_eq!(round_currency(1234.5644), 1234.56);
        assert_eq!(round_currency(1234.5), 1234.50);
        assert_eq!(round_percentage(45.6789), 45.68);
        assert_eq!(round_percentage(45.6744), 45.67);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(round_currency(-0.125), -0.13);
    }

    #[test]
    fn formats_rand_amounts() {
        assert_eq!(format_currency(1234.56), "R\u{a0}1\u{a0}234,56");
        assert_eq!(format_currency(1_000_000.0), "R\u{a0}1\u{a0}000\u{a0}000,00");
        assert_eq!(format_currency(0.0), "R\u{a0}0,00");
        assert_eq!(format_currency(999.999), "R\u{a0}1\u{a0}000,00");
        assert_eq!(format_currency(-5000.0), "-R\u{a0}5\u{a0}000,00");
    }

    #[test]
    fn tiny_negative_amounts_do_not_render_a_sign() {
        assert_eq!(format_currency(-0.001), "R\u{a0}0,00");
    }

    #[test]
    fn parses_common_input_styles() {
        assert_eq!(parse_currency("50000"), Some(50_000.0));
        assert_eq!(parse_currency("R 50000"), Some(50_000.0));
        assert_eq!(parse_currency("50,000"), Some(50_000.0));
        assert_eq!(parse_currency("50 000"), Some(50_000.0));
        assert_eq!(parse_currency("50,000.75"), Some(50_000.75));
        assert_eq!(parse_currency("50.000,00"), Some(50_000.0));
        assert_eq!(parse_currency("R\u{a0}1\u{a0}234,56"), Some(1234.56));
        assert_eq!(parse_currency("-R 200"), Some(-200.0));
    }

    #[test]
    fn rejects_blank_or_digit_free_input() {
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("   "), None);
        assert_eq!(parse_currency("R"), None);
    }

    #[test]
    fn formatted_output_parses_back() {
        for amount in [0.0, 12.5, 1234.56, 987_654.32] {
            assert_eq!(parse_currency(&format_currency(amount)), Some(amount));
        }
    }
}
