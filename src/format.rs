//! Display formatting for raw record values.
//!
//! Records store plain numbers (`25000`) and plain percentages (`15`). Before
//! placeholder substitution the renderer asks a [`DisplayPolicy`] for a
//! display copy of the record (`25,000`, `15%`). Conditionals never see the
//! formatted values.
//!
//! Every function here is total: input that cannot be formatted is returned
//! unchanged.

use crate::record::{NONE_SENTINEL, Record, fields};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Largest accepted `max_fraction_digits`, matching `Intl.NumberFormat`.
pub const MAX_FRACTION_DIGITS_LIMIT: usize = 20;

static DEFAULT_POLICY: LazyLock<DisplayPolicy> = LazyLock::new(DisplayPolicy::default);

/// Formatting rules applied to record values before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPolicy {
    /// Thousands separator inserted into the integer part of numbers.
    pub grouping_separator: char,

    /// Suffix appended to percentage values.
    pub percent_suffix: String,

    /// Maximum fraction digits kept when re-rendering a number.
    pub max_fraction_digits: usize,

    /// Fields rendered with [`DisplayPolicy::format_number`].
    pub number_fields: Vec<String>,

    /// Fields rendered with [`DisplayPolicy::format_percent`].
    pub percent_fields: Vec<String>,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
            percent_suffix: "%".to_string(),
            max_fraction_digits: 3,
            number_fields: vec![
                fields::GUARANTEED_MINIMUM.to_string(),
                fields::BONUS_AMOUNT.to_string(),
                fields::PERFORMANCE_THRESHOLD.to_string(),
            ],
            percent_fields: vec![
                fields::PROFIT_SHARE.to_string(),
                fields::PROFIT_SHARE_BONUS.to_string(),
            ],
        }
    }
}

impl DisplayPolicy {
    /// Build the display copy of a record.
    ///
    /// Fields not listed in `number_fields` or `percent_fields` are copied as-is.
    pub fn format_record(&self, record: &Record) -> Record {
        record
            .iter()
            .map(|(key, value)| {
                let display = if self.number_fields.iter().any(|f| f == key) {
                    self.format_number(value)
                } else if self.percent_fields.iter().any(|f| f == key) {
                    self.format_percent(value)
                } else {
                    value.to_string()
                };
                (key, display)
            })
            .collect()
    }

    /// Render a numeric string with thousands grouping.
    ///
    /// ```
    /// use kolmsg::format::DisplayPolicy;
    ///
    /// let policy = DisplayPolicy::default();
    /// assert_eq!(policy.format_number("25000"), "25,000");
    /// assert_eq!(policy.format_number("無"), "無");
    /// assert_eq!(policy.format_number("about 5k"), "about 5k");
    /// ```
    pub fn format_number(&self, value: &str) -> String {
        if value.is_empty() || value == NONE_SENTINEL {
            return value.to_string();
        }

        let clean = self.unformat_number(value);
        match parse_leading_number(&clean) {
            Some(number) => self.render_grouped(number),
            None => value.to_string(),
        }
    }

    /// Append the percent suffix to a numeric string, leaving the digits alone.
    pub fn format_percent(&self, value: &str) -> String {
        if value.is_empty() || value == NONE_SENTINEL {
            return value.to_string();
        }

        if parse_leading_number(value).is_none() {
            return value.to_string();
        }

        format!("{}{}", value, self.percent_suffix)
    }

    /// Strip grouping separators.
    pub fn unformat_number(&self, value: &str) -> String {
        value
            .chars()
            .filter(|&c| c != self.grouping_separator)
            .collect()
    }

    /// Keep only ASCII digits and the decimal point, unless the value is the sentinel.
    pub fn unformat_percent(&self, value: &str) -> String {
        if value.trim() == NONE_SENTINEL {
            return NONE_SENTINEL.to_string();
        }

        value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    }

    fn render_grouped(&self, number: f64) -> String {
        let sign = if number.is_sign_negative() { "-" } else { "" };

        if number.is_infinite() {
            return format!("{}∞", sign);
        }

        let digits = self.max_fraction_digits.min(MAX_FRACTION_DIGITS_LIMIT);
        let fixed = format!("{:.*}", digits, number.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        out.push_str(sign);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(digit);
        }
        if !frac_part.is_empty() {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

/// Parse the longest leading decimal number in `value`.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction, an optional exponent, or `Infinity`. Trailing text is ignored,
/// so `"25000元"` parses as `25000`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
    } else if int_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Format a number with the default policy.
pub fn format_number(value: &str) -> String {
    DEFAULT_POLICY.format_number(value)
}

/// Format a percentage with the default policy.
pub fn format_percent(value: &str) -> String {
    DEFAULT_POLICY.format_percent(value)
}

/// Strip grouping separators with the default policy.
pub fn unformat_number(value: &str) -> String {
    DEFAULT_POLICY.unformat_number(value)
}

/// Reduce a percentage to digits and decimal point with the default policy.
pub fn unformat_percent(value: &str) -> String {
    DEFAULT_POLICY.unformat_percent(value)
}

/// Display copy of a record under the default policy.
pub fn format_for_display(record: &Record) -> Record {
    DEFAULT_POLICY.format_record(record)
}
