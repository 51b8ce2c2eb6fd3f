//! Text cleaning shared by the numeric kinds.

/// Removes `delimiter` characters and maps `decimal_mark` to `'.'`.
///
/// A `'.'` in the input is ambiguous when the decimal mark is something else
/// and `'.'` is not a delimiter; such input is rejected.
pub(super) fn clean(text: &str, delimiter: &str, decimal_mark: char) -> Option<String> {
    if decimal_mark != '.' && !delimiter.contains('.') && text.contains('.') {
        return None;
    }
    Some(
        text.chars()
            .filter_map(|c| {
                if c == decimal_mark {
                    Some('.')
                } else if delimiter.contains(c) {
                    None
                } else {
                    Some(c)
                }
            })
            .collect(),
    )
}

/// Splits `[-+]digits[.digits]` into its sign-stripped whole and fraction.
fn split_number(text: &str) -> Option<(&str, Option<&str>)> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let valid = digits(whole)
        && fraction.is_none_or(digits)
        && !(whole.is_empty() && fraction.is_none_or(str::is_empty));
    valid.then_some((whole, fraction))
}

/// Parses cleaned text as an integer; `"12.000"` is integral.
pub(super) fn parse_integer(cleaned: &str) -> Option<i64> {
    let (whole, fraction) = split_number(cleaned)?;
    if whole.is_empty() || !fraction.is_none_or(|f| f.bytes().all(|b| b == b'0')) {
        return None;
    }
    let digits = cleaned.split_once('.').map_or(cleaned, |(whole, _)| whole);
    digits.parse().ok()
}

/// Normalises cleaned text into a form `Decimal::from_str` accepts.
pub(super) fn decimal_text(cleaned: &str) -> Option<String> {
    split_number(cleaned)?;
    let (negative, unsigned) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned),
    };
    let mut normal = String::with_capacity(unsigned.len() + 2);
    if negative {
        normal.push('-');
    }
    if unsigned.starts_with('.') {
        normal.push('0');
    }
    normal.push_str(unsigned.strip_suffix('.').unwrap_or(unsigned));
    Some(normal)
}

/// Number of digits after the decimal point in the shortest rendering.
pub(super) fn float_scale(value: f64) -> u32 {
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1,000", ", ", '.', Some("1000"))]
    #[case("1 000.5", ", ", '.', Some("1000.5"))]
    #[case("1.000,5", ".", ',', Some("1000.5"))]
    #[case("1.5", " ", ',', None)]
    #[case("2,5", ", ", ',', Some("2.5"))]
    fn cleaning(
        #[case] text: &str,
        #[case] delimiter: &str,
        #[case] mark: char,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(clean(text, delimiter, mark).as_deref(), expected);
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("+42", Some(42))]
    #[case("-7.000", Some(-7))]
    #[case("7.5", None)]
    #[case("1e3", None)]
    #[case("99999999999999999999", None)]
    fn integers(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_integer(text), expected);
    }

    #[rstest]
    #[case("+1.5", Some("1.5"))]
    #[case(".5", Some("0.5"))]
    #[case("-.5", Some("-0.5"))]
    #[case("5.", Some("5"))]
    #[case("1.2.3", None)]
    #[case("abc", None)]
    fn decimals(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(decimal_text(text).as_deref(), expected);
    }

    #[test]
    fn scale_of_floats() {
        assert_eq!(float_scale(1.0), 0);
        assert_eq!(float_scale(1.25), 2);
        assert_eq!(float_scale(-0.125), 3);
    }
}
