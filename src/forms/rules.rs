//! Field rule tables evaluated uniformly for every submitted form.
//!
//! Each entity declares its rules as a static ordered list of
//! [`FieldRule`]s. [`validate_fields`] runs every rule, never stopping at the
//! first failure, and returns the messages in table order.

use validator::ValidateLength;

/// A single check applied to a trimmed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least one character.
    Required,
    /// At most this many characters.
    MaxLength(u64),
    /// Optional sign, digits, optional fractional part.
    Decimal,
    /// Optional sign followed by digits.
    Integer,
    /// Numeric value is zero or greater.
    NonNegative,
    /// At most this many decimal digits in total.
    MaxDigits(usize),
}

/// One row of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }
}

fn all_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn strip_sign(value: &str) -> &str {
    value.strip_prefix(['+', '-']).unwrap_or(value)
}

fn is_decimal(value: &str) -> bool {
    let unsigned = strip_sign(value);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            all_digits(whole) && !fraction.is_empty() && all_digits(fraction)
        }
        None => !unsigned.is_empty() && all_digits(unsigned),
    }
}

fn is_integer(value: &str) -> bool {
    let unsigned = strip_sign(value);
    !unsigned.is_empty() && all_digits(unsigned)
}

impl Rule {
    /// Whether `value` satisfies the rule. Format rules accept an empty value;
    /// emptiness is reported by [`Rule::Required`] alone.
    pub fn check(self, value: &str) -> bool {
        match self {
            Rule::Required => value.validate_length(Some(1_u64), None, None),
            Rule::MaxLength(max) => value.validate_length(None, Some(max), None),
            Rule::Decimal => value.is_empty() || is_decimal(value),
            Rule::Integer => value.is_empty() || is_integer(value),
            Rule::NonNegative => value
                .parse::<f64>()
                .map(|number| number >= 0.0)
                .unwrap_or(true),
            Rule::MaxDigits(max) => value.chars().filter(char::is_ascii_digit).count() <= max,
        }
    }
}

/// Run every rule against its field and collect the failing messages in order.
///
/// `values` maps field names to trimmed values; a field missing from it is
/// checked as the empty string.
pub fn validate_fields(rules: &[FieldRule], values: &[(&str, &str)]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| {
            let value = values
                .iter()
                .find(|(field, _)| *field == rule.field)
                .map(|(_, value)| *value)
                .unwrap_or_default();
            !rule.rule.check(value)
        })
        .map(|rule| rule.message.to_string())
        .collect()
}

/// Escape a trimmed value for storage and redisplay.
pub fn sanitize(value: &str) -> String {
    tera::escape_html(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[FieldRule] = &[
        FieldRule::new("name", Rule::Required, "Name must not be empty."),
        FieldRule::new("name", Rule::MaxLength(5), "Name too long."),
        FieldRule::new("price", Rule::Required, "Price must not be empty."),
        FieldRule::new("price", Rule::Decimal, "Price must be a number."),
    ];

    #[test]
    fn collects_all_failures_in_table_order() {
        let errors = validate_fields(RULES, &[("name", "toolong"), ("price", "abc")]);
        assert_eq!(errors, vec!["Name too long.", "Price must be a number."]);
    }

    #[test]
    fn missing_field_counts_as_empty() {
        let errors = validate_fields(RULES, &[("name", "ok")]);
        assert_eq!(errors, vec!["Price must not be empty."]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(Rule::MaxLength(3).check("äöü"));
        assert!(!Rule::MaxLength(2).check("äöü"));
    }

    #[test]
    fn decimal_accepts_signed_and_fractional_values() {
        for value in ["12.50", "-3", "+0.5", ".5", "7"] {
            assert!(Rule::Decimal.check(value), "{value} should be decimal");
        }
        for value in ["1.", "abc", "1.2.3", "-", "1e5"] {
            assert!(!Rule::Decimal.check(value), "{value} should not be decimal");
        }
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(Rule::Integer.check("-12"));
        assert!(!Rule::Integer.check("1.5"));
        assert!(!Rule::Integer.check("+"));
    }

    #[test]
    fn non_negative_and_digit_bounds() {
        assert!(!Rule::NonNegative.check("-0.01"));
        assert!(Rule::NonNegative.check("0"));
        assert!(Rule::MaxDigits(9).check("1234567.89"));
        assert!(!Rule::MaxDigits(9).check("12345678.90"));
    }

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  <b>Tom & Jerry</b> "), "&lt;b&gt;Tom &amp; Jerry&lt;&#x2F;b&gt;");
    }
}
