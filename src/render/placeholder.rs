//! Placeholder substitution.
//!
//! Replaces `{name}` tokens with values from a record in one left-to-right
//! scan. Substituted values are copied into the output and never scanned
//! again, so a value containing `{otherField}` stays literal.
//!
//! Tokens whose name is not a record key are left untouched, braces
//! included. There is no escape syntax; a `{` that does not start a known
//! token is ordinary text.

use crate::record::Record;

/// Substitute every `{name}` token whose `name` is a key of `values`.
///
/// # Examples
///
/// ```
/// use kolmsg::record::Record;
/// use kolmsg::render::substitute_placeholders;
///
/// let values = Record::from_iter([("kolName", "小明")]);
/// let result = substitute_placeholders("給 {kolName} 的 {unknown}", &values);
/// assert_eq!(result, "給 小明 的 {unknown}");
/// ```
pub fn substitute_placeholders(text: &str, values: &Record) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        // Only the nearest brace matters: a `{` before any `}` means this
        // opening brace cannot start a token.
        match after_open.find(['{', '}']) {
            Some(close) if after_open[close..].starts_with('}') => {
                let name = &after_open[..close];
                match values.get(name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push('{');
                        result.push_str(&after_open[..=close]);
                    }
                }
                rest = &after_open[close + 1..];
            }
            Some(next_open) => {
                // Keep the brace and resume at the inner `{` so `{{name}`
                // still resolves.
                result.push('{');
                result.push_str(&after_open[..next_open]);
                rest = &after_open[next_open..];
            }
            None => {
                result.push('{');
                rest = after_open;
                break;
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_simple_substitution() {
        let v = values(&[("contactPerson", "Amy"), ("kolName", "小明")]);
        let result = substitute_placeholders("HI {contactPerson}，給 {kolName}", &v);
        assert_eq!(result, "HI Amy，給 小明");
    }

    #[test]
    fn test_no_placeholders() {
        let v = values(&[("a", "1")]);
        assert_eq!(substitute_placeholders("Just plain text", &v), "Just plain text");
        assert_eq!(substitute_placeholders("", &v), "");
    }

    #[test]
    fn test_multiple_occurrences() {
        let v = values(&[("x", "X")]);
        assert_eq!(substitute_placeholders("{x}-{x}-{x}", &v), "X-X-X");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let v = values(&[("a", "A"), ("b", "B")]);
        assert_eq!(substitute_placeholders("{a}{b}", &v), "AB");
    }

    #[test]
    fn test_unknown_placeholder_is_left_verbatim() {
        let v = values(&[("kolName", "小明")]);
        assert_eq!(
            substitute_placeholders("{unknownField} {kolName}", &v),
            "{unknownField} 小明"
        );
    }

    #[test]
    fn test_empty_value_substitution() {
        let v = values(&[("empty", "")]);
        assert_eq!(substitute_placeholders("before{empty}after", &v), "beforeafter");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let v = values(&[("a", "{b}"), ("b", "B")]);
        assert_eq!(substitute_placeholders("{a} {b}", &v), "{b} B");

        let v = values(&[("b", "{a}"), ("a", "A")]);
        assert_eq!(substitute_placeholders("{b} {a}", &v), "{a} A");
    }

    #[test]
    fn test_names_are_literal() {
        let v = values(&[("kolName", "小明")]);
        assert_eq!(substitute_placeholders("{ kolName }", &v), "{ kolName }");
        assert_eq!(substitute_placeholders("{kol.*}", &v), "{kol.*}");
        assert_eq!(substitute_placeholders("{KOLNAME}", &v), "{KOLNAME}");
    }

    #[test]
    fn test_stray_braces() {
        let v = values(&[("x", "value")]);
        assert_eq!(substitute_placeholders("{{x}", &v), "{value");
        assert_eq!(substitute_placeholders("{x}}", &v), "value}");
        assert_eq!(substitute_placeholders("a } b", &v), "a } b");
        assert_eq!(substitute_placeholders("open { only", &v), "open { only");
        assert_eq!(substitute_placeholders("{}", &v), "{}");
        assert_eq!(substitute_placeholders("{a{x}", &v), "{avalue");
    }

    #[test]
    fn test_unknown_token_skips_to_closing_brace() {
        let v = values(&[("x", "value")]);
        assert_eq!(substitute_placeholders("{y}x} {x}", &v), "{y}x} value");
        assert_eq!(substitute_placeholders("{a{b{x}}", &v), "{a{bvalue}");
    }

    #[test]
    fn test_large_brace_heavy_input_scans_linearly() {
        let v = values(&[("x", "1")]);

        let opens = "{".repeat(300_000);
        assert_eq!(substitute_placeholders(&opens, &v), opens);

        let unknown = "{nope}".repeat(50_000);
        assert_eq!(substitute_placeholders(&unknown, &v), unknown);

        let mut mixed = "{".repeat(100_000);
        mixed.push_str("{x}");
        let expected = format!("{}1", "{".repeat(100_000));
        assert_eq!(substitute_placeholders(&mixed, &v), expected);
    }

    #[test]
    fn test_multiline_and_unicode_values() {
        let v = values(&[("fanOffer", "🔹抽免單（3 名）\n🔹單品售價 1,649")]);
        assert_eq!(
            substitute_placeholders("<<<粉絲福利>>>\n{fanOffer}", &v),
            "<<<粉絲福利>>>\n🔹抽免單（3 名）\n🔹單品售價 1,649"
        );
    }

    #[test]
    fn test_braces_in_value() {
        let v = values(&[("code", "if (x > 0) { return x; }")]);
        assert_eq!(
            substitute_placeholders("Code: {code}", &v),
            "Code: if (x > 0) { return x; }"
        );
    }
}
