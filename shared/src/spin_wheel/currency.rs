pub const BGN_PER_EUR: f64 = 1.95583;

const GROUP_SEPARATOR: char = '\u{a0}';

/// Bulgarian locale: comma decimals, grouping only from five integer digits.
fn format_bg(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if int_part.len() >= 5 {
        let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(digit);
        }
        out
    } else {
        int_part.to_string()
    };

    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{}{},{}", sign, grouped, frac_part)
}

/// Formats a leva amount as `<eur> € / <bgn> лв.`; `-` when there is no amount.
pub fn format_dual_currency(bgn: Option<f64>) -> String {
    match bgn.filter(|n| n.is_finite()) {
        Some(bgn) => format!("{} € / {} лв.", format_bg(bgn / BGN_PER_EUR), format_bg(bgn)),
        None => "-".to_string(),
    }
}

/// Percent values without a trailing `.0`.
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}", percent as i64)
    } else {
        let text = format!("{:.2}", percent);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_currency() {
        assert_eq!(format_dual_currency(Some(97.79)), "50,00 € / 97,79 лв.");
        assert_eq!(format_dual_currency(Some(0.0)), "0,00 € / 0,00 лв.");
        assert_eq!(format_dual_currency(None), "-");
        assert_eq!(format_dual_currency(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_grouping_from_five_digits() {
        assert_eq!(format_bg(1234.5), "1234,50");
        assert_eq!(format_bg(12345.678), "12\u{a0}345,68");
        assert_eq!(format_bg(1234567.0), "1\u{a0}234\u{a0}567,00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(5.0), "5");
        assert_eq!(format_percent(7.5), "7.5");
        assert_eq!(format_percent(12.25), "12.25");
    }
}
