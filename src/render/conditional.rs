//! Conditional block evaluation.
//!
//! A block is `[if: key|content]` or `[if: key=expected|content]`. The
//! content is matched lazily, so the first `]` after the `|` ends the block
//! and blocks never nest. Matching is a single left-to-right pass; kept
//! content is not scanned again.

use crate::record::{Record, is_absent};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `[if: <key>(=<expected>)?|<content>]`, content spanning lines.
static CONDITIONAL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[if: ([A-Za-z0-9_]+)(?:=([^|\]]+))?\|(.*?)\]")
        .expect("Invalid conditional block regex")
});

/// Three or more consecutive line breaks (`\n` or `\r\n`).
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){3,}").expect("Invalid blank line regex"));

/// Resolve every conditional block in `template` using raw `record` values.
///
/// A missing key reads as an empty value. After resolution, runs of blank
/// lines left behind by removed blocks are collapsed to a single blank line.
pub fn evaluate_conditionals(template: &str, record: &Record) -> String {
    let resolved = CONDITIONAL_BLOCK.replace_all(template, |caps: &Captures| {
        let key = &caps[1];
        let actual = record.get(key).unwrap_or("").trim();

        let holds = match caps.get(2) {
            Some(expected) => actual == expected.as_str().trim(),
            None => !is_absent(actual),
        };

        if holds {
            caps[3].to_string()
        } else {
            String::new()
        }
    });

    collapse_blank_lines(&resolved)
}

/// Collapse any run of three or more line breaks into exactly `"\n\n"`.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_existence_form_keeps_content_for_present_value() {
        let r = record(&[("bonusAmount", "5000")]);
        assert_eq!(evaluate_conditionals("[if: bonusAmount|X]", &r), "X");
    }

    #[test]
    fn test_existence_form_drops_sentinel_and_blank() {
        for value in ["無", "", "   ", " 無 "] {
            let r = record(&[("bonusAmount", value)]);
            assert_eq!(
                evaluate_conditionals("[if: bonusAmount|X]", &r),
                "",
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_missing_key_is_empty() {
        let r = Record::new();
        assert_eq!(evaluate_conditionals("a[if: nothing|X]b", &r), "ab");
        assert_eq!(evaluate_conditionals("a[if: nothing=x|X]b", &r), "ab");
    }

    #[test]
    fn test_equality_form() {
        let r = record(&[("sendHandle", "是")]);
        assert_eq!(
            evaluate_conditionals("[if: sendHandle=是|A][if: sendHandle=否|B]", &r),
            "A"
        );

        let r = record(&[("sendHandle", "否")]);
        assert_eq!(
            evaluate_conditionals("[if: sendHandle=是|A][if: sendHandle=否|B]", &r),
            "B"
        );
    }

    #[test]
    fn test_equality_trims_both_sides() {
        let r = record(&[("tier", "  gold ")]);
        assert_eq!(evaluate_conditionals("[if: tier= gold |yes]", &r), "yes");
    }

    #[test]
    fn test_equality_is_exact() {
        let r = record(&[("tier", "Gold")]);
        assert_eq!(evaluate_conditionals("[if: tier=gold|yes]", &r), "");
        assert_eq!(evaluate_conditionals("[if: tier=Gol|yes]", &r), "");

        let r = record(&[("amount", "10.0")]);
        assert_eq!(evaluate_conditionals("[if: amount=10|yes]", &r), "");
    }

    #[test]
    fn test_equality_against_sentinel() {
        let r = record(&[("fanOffer", "無")]);
        assert_eq!(evaluate_conditionals("[if: fanOffer=無|none]", &r), "none");
    }

    #[test]
    fn test_content_is_verbatim_and_may_span_lines() {
        let r = record(&[("fanOffer", "抽免單")]);
        let template = "[if: fanOffer|<<<粉絲福利>>>\n{fanOffer}]";
        assert_eq!(
            evaluate_conditionals(template, &r),
            "<<<粉絲福利>>>\n{fanOffer}"
        );
    }

    #[test]
    fn test_blocks_do_not_nest() {
        let template = "[if: a|text [if: b|nested] more]";

        let r = record(&[("a", "1"), ("b", "")]);
        assert_eq!(evaluate_conditionals(template, &r), "text [if: b|nested more]");

        let r = record(&[("a", ""), ("b", "1")]);
        assert_eq!(evaluate_conditionals(template, &r), " more]");
    }

    #[test]
    fn test_malformed_blocks_pass_through() {
        let r = record(&[("a", "1")]);
        assert_eq!(evaluate_conditionals("[if:a|x]", &r), "[if:a|x]");
        assert_eq!(evaluate_conditionals("[if: a x]", &r), "[if: a x]");
        assert_eq!(evaluate_conditionals("[if: a|unclosed", &r), "[if: a|unclosed");
        assert_eq!(evaluate_conditionals("[if: 欄位|x]", &r), "[if: 欄位|x]");
        assert_eq!(evaluate_conditionals("[if: a=|x]", &r), "[if: a=|x]");
    }

    #[test]
    fn test_literal_brackets_survive() {
        let r = record(&[("a", "1")]);
        assert_eq!(
            evaluate_conditionals("[note] [if: a|kept] [x]", &r),
            "[note] kept [x]"
        );
    }

    #[test]
    fn test_removed_block_lines_collapse() {
        let r = record(&[("bonusAmount", "無")]);
        let template = "line one\n\n[if: bonusAmount|bonus]\n\nline two";
        assert_eq!(evaluate_conditionals(template, &r), "line one\n\nline two");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\r\n\r\n\r\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\r\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }
}
