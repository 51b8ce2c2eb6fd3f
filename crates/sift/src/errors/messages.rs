//! Rendering error atoms as text.

use super::code::ErrorCode;

/// Turns `(key, code, index)` into a human-readable message.
///
/// Called lazily, only by the message views of the error tree. Any
/// `Fn(Option<&str>, &ErrorCode, Option<usize>) -> String` is a formatter.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, key: Option<&str>, code: &ErrorCode, index: Option<usize>) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(Option<&str>, &ErrorCode, Option<usize>) -> String + Send + Sync,
{
    fn format(&self, key: Option<&str>, code: &ErrorCode, index: Option<usize>) -> String {
        self(key, code, index)
    }
}

/// English messages: `"[ordinal] Title Cased Key phrase"`.
///
/// ```rust
/// use sift::{DefaultMessages, ErrorCode, MessageFormatter};
///
/// let text = DefaultMessages.format(Some("tags"), &ErrorCode::TOO_LONG, Some(1));
/// assert_eq!(text, "2nd Tags is too long");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl DefaultMessages {
    fn phrase(code: &ErrorCode) -> &'static str {
        match code.as_str() {
            "required" => "is required",
            "nils" => "cannot be null",
            "empty" => "cannot be empty",
            "wrong_type" => "has the wrong type",
            "not_a_boolean" => "must be a boolean",
            "not_an_integer" => "must be an integer",
            "not_a_number" => "must be a number",
            "malformed_date" => "must be a date",
            "malformed_time" => "must be a time",
            "not_a_list" => "must be a list",
            "not_a_map" => "must be a map",
            "missing_capability" => "does not support a required operation",
            "not_a_file" => "must be a file",
            "wrong_class" => "must be the right class",
            "too_short" => "is too short",
            "too_long" => "is too long",
            "not_in_set" => "is not an available option",
            "pattern_mismatch" => "has an incorrect format",
            "out_of_range" => "is out of range",
            "too_precise" => "has too many decimal places",
            "before_bound" => "is too early",
            "after_bound" => "is too late",
            "too_large" => "is too large",
            "not_persisted" => "must be saved",
            _ => "is invalid",
        }
    }
}

impl MessageFormatter for DefaultMessages {
    fn format(&self, key: Option<&str>, code: &ErrorCode, index: Option<usize>) -> String {
        let subject = key.map_or_else(|| "Item".to_string(), titleize);
        let phrase = Self::phrase(code);
        match index {
            Some(index) => format!("{} {subject} {phrase}", ordinal(index + 1)),
            None => format!("{subject} {phrase}"),
        }
    }
}

/// `"first_name"` becomes `"First Name"`.
fn titleize(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn ordinal(number: usize) -> String {
    let suffix = if (11..=13).contains(&(number % 100)) {
        "th"
    } else {
        match number % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{number}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "1st")]
    #[case(2, "2nd")]
    #[case(3, "3rd")]
    #[case(4, "4th")]
    #[case(11, "11th")]
    #[case(12, "12th")]
    #[case(13, "13th")]
    #[case(21, "21st")]
    #[case(102, "102nd")]
    #[case(111, "111th")]
    fn ordinals(#[case] number: usize, #[case] expected: &str) {
        assert_eq!(ordinal(number), expected);
    }

    #[test]
    fn titleizes_keys() {
        assert_eq!(titleize("first_name"), "First Name");
        assert_eq!(titleize("arr1"), "Arr1");
        assert_eq!(titleize("_x__y_"), "X Y");
    }

    #[test]
    fn default_messages() {
        assert_eq!(
            DefaultMessages.format(Some("email"), &ErrorCode::REQUIRED, None),
            "Email is required"
        );
        assert_eq!(
            DefaultMessages.format(None, &ErrorCode::NOT_AN_INTEGER, Some(0)),
            "1st Item must be an integer"
        );
        assert_eq!(
            DefaultMessages.format(Some("x"), &ErrorCode::new("custom"), None),
            "X is invalid"
        );
    }

    #[test]
    fn closures_are_formatters() {
        let short = |_: Option<&str>, code: &ErrorCode, _: Option<usize>| code.to_string();
        assert_eq!(short.format(Some("a"), &ErrorCode::EMPTY, None), "empty");
    }
}
