//! Display formatting for validated values.

use crate::Amount;
use crate::amount::Rate;

/// `$` followed by the amount rounded to cents with thousands separators,
/// e.g. `$1,782.50`. Negative values render as `$-12.00`.
pub fn format_currency(value: Amount) -> String {
    let cents = value.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${sign}{grouped}.{:02}", abs % 100)
}

/// Capitalizes every letter that follows a non-letter and lowercases the rest:
/// `o'brien` becomes `O'Brien`, `st johns` becomes `St Johns`.
pub fn format_title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

pub fn format_upper_case(value: &str) -> String {
    value.to_uppercase()
}

/// Rate as a percentage label: `0.15` becomes `15%`, `0.125` becomes `12.5%`.
pub fn format_percent(rate: Rate) -> String {
    format!("{}%", rate * Amount::from_whole(100))
}

pub fn format_yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate_city, validate_name};

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn currency_two_decimals_with_separators() {
        assert_eq!(format_currency(amount("1782.5")), "$1,782.50");
        assert_eq!(format_currency(amount("0")), "$0.00");
        assert_eq!(format_currency(amount("999.999")), "$1,000.00");
        assert_eq!(format_currency(amount("1234567.891")), "$1,234,567.89");
        assert_eq!(format_currency(amount("100")), "$100.00");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(amount("224.625")), "$224.63");
        assert_eq!(format_currency(amount("-12")), "$-12.00");
        assert_eq!(format_currency(amount("-1234.5")), "$-1,234.50");
    }

    #[test]
    fn title_case_names() {
        assert_eq!(format_title_case("john"), "John");
        assert_eq!(format_title_case("MARY-ANNE"), "Mary-Anne");
        assert_eq!(format_title_case("o'brien"), "O'Brien");
        assert_eq!(format_title_case("st johns"), "St Johns");
    }

    #[test]
    fn title_case_preserves_letters_of_validated_input() {
        for input in ["mcdonald", "D'ARCY", "jean-luc", "x"] {
            assert!(validate_name(input));
            let formatted = format_title_case(input);
            assert!(validate_name(&formatted));
            assert!(formatted.eq_ignore_ascii_case(input));
        }
        for input in ["new york", "GANDER"] {
            assert!(validate_city(input));
            let formatted = format_title_case(input);
            assert!(validate_city(&formatted));
            assert!(formatted.eq_ignore_ascii_case(input));
        }
    }

    #[test]
    fn upper_case() {
        assert_eq!(format_upper_case("y"), "Y");
        assert_eq!(format_upper_case("a1a 1a1"), "A1A 1A1");
    }

    #[test]
    fn percent_label() {
        assert_eq!(format_percent(amount("0.15")), "15%");
        assert_eq!(format_percent(amount("0.125")), "12.5%");
        assert_eq!(format_percent(Amount::ZERO), "0%");
    }

    #[test]
    fn yes_no() {
        assert_eq!(format_yes_no(true), "Yes");
        assert_eq!(format_yes_no(false), "No");
    }
}
