//! Deal-term records fed into the template renderer.
//!
//! A [`Record`] is a plain ordered map from field name to string value; the
//! renderer only ever sees this shape. [`DealTerms`] is the typed view used by
//! the command layer for defaults and required-field validation.

use crate::error::{KolmsgError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Literal value meaning "field intentionally left blank".
pub const NONE_SENTINEL: &str = "無";

/// Message shown when the required identity fields are blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "請填寫所有必填欄位 (聯絡人, KOL)";

/// Known record field names, as referenced from templates.
pub mod fields {
    pub const CONTACT_PERSON: &str = "contactPerson";
    pub const KOL_NAME: &str = "kolName";
    pub const PROFIT_SHARE: &str = "profitShare";
    pub const GUARANTEED_MINIMUM: &str = "guaranteedMinimum";
    pub const BONUS_AMOUNT: &str = "bonusAmount";
    pub const PERFORMANCE_THRESHOLD: &str = "performanceThreshold";
    pub const PROFIT_SHARE_BONUS: &str = "profitShareBonus";
    pub const FAN_OFFER: &str = "fanOffer";
    pub const END_DATE: &str = "endDate";
    pub const SEND_HANDLE: &str = "sendHandle";
}

/// All known fields in form order.
pub const ALL_FIELDS: &[&str] = &[
    fields::CONTACT_PERSON,
    fields::KOL_NAME,
    fields::PROFIT_SHARE,
    fields::GUARANTEED_MINIMUM,
    fields::BONUS_AMOUNT,
    fields::PERFORMANCE_THRESHOLD,
    fields::PROFIT_SHARE_BONUS,
    fields::FAN_OFFER,
    fields::END_DATE,
    fields::SEND_HANDLE,
];

/// Returns true if the value counts as "absent" for existence conditionals.
pub fn is_absent(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NONE_SENTINEL
}

/// Ordered mapping from field name to raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay every entry of `other` onto this record.
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Keep only the given keys.
    pub fn retain_keys(&mut self, keys: &[&str]) {
        self.0.retain(|k, _| keys.contains(&k.as_str()));
    }

    /// Apply a `KEY=VALUE` assignment as typed on the command line.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            KolmsgError::UserError(format!(
                "invalid assignment '{}': expected KEY=VALUE",
                assignment
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(KolmsgError::UserError(format!(
                "invalid assignment '{}': key must not be empty",
                assignment
            )));
        }

        self.set(key, value);
        Ok(())
    }

    /// Parse a record from YAML or JSON text (a flat map of scalars).
    ///
    /// JSON is a subset of YAML, so a single YAML parse covers both. Numbers
    /// and booleans are kept in their textual form; `null` becomes empty.
    pub fn from_text(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(text)
            .map_err(|e| KolmsgError::UserError(format!("failed to parse record: {}", e)))?;

        let mut record = Self::new();
        for (key, value) in raw {
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Null => String::new(),
                _ => {
                    return Err(KolmsgError::UserError(format!(
                        "failed to parse record: field '{}' must be a plain value",
                        key
                    )));
                }
            };
            record.set(key, value);
        }
        Ok(record)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Whether a controller handle is sent along with the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SendHandle {
    #[default]
    #[serde(rename = "是")]
    Yes,
    #[serde(rename = "否")]
    No,
}

impl SendHandle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendHandle::Yes => "是",
            SendHandle::No => "否",
        }
    }

    /// Parse one of the two literal choice values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "是" => Some(Self::Yes),
            "否" => Some(Self::No),
            _ => None,
        }
    }
}

impl fmt::Display for SendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed deal terms, one field per form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealTerms {
    pub contact_person: String,
    pub kol_name: String,
    pub profit_share: String,
    pub guaranteed_minimum: String,
    pub bonus_amount: String,
    pub performance_threshold: String,
    pub profit_share_bonus: String,
    pub fan_offer: String,
    pub end_date: String,
    pub send_handle: SendHandle,
}

impl DealTerms {
    /// Initial form state with the end date set to `today`.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            contact_person: String::new(),
            kol_name: String::new(),
            profit_share: "15".to_string(),
            guaranteed_minimum: NONE_SENTINEL.to_string(),
            bonus_amount: NONE_SENTINEL.to_string(),
            performance_threshold: NONE_SENTINEL.to_string(),
            profit_share_bonus: NONE_SENTINEL.to_string(),
            fan_offer: NONE_SENTINEL.to_string(),
            end_date: today.format("%Y-%m-%d").to_string(),
            send_handle: SendHandle::default(),
        }
    }

    /// Flatten into a record keyed by template field names.
    pub fn to_record(&self) -> Record {
        Record::from_iter([
            (fields::CONTACT_PERSON, self.contact_person.as_str()),
            (fields::KOL_NAME, self.kol_name.as_str()),
            (fields::PROFIT_SHARE, self.profit_share.as_str()),
            (fields::GUARANTEED_MINIMUM, self.guaranteed_minimum.as_str()),
            (fields::BONUS_AMOUNT, self.bonus_amount.as_str()),
            (fields::PERFORMANCE_THRESHOLD, self.performance_threshold.as_str()),
            (fields::PROFIT_SHARE_BONUS, self.profit_share_bonus.as_str()),
            (fields::FAN_OFFER, self.fan_offer.as_str()),
            (fields::END_DATE, self.end_date.as_str()),
            (fields::SEND_HANDLE, self.send_handle.as_str()),
        ])
    }

    /// Build typed terms from a record, starting from `base` for missing keys.
    ///
    /// Fails only when `sendHandle` holds something other than `是` or `否`.
    pub fn from_record(record: &Record, base: &DealTerms) -> Result<Self> {
        let pick = |key: &str, fallback: &String| {
            record
                .get(key)
                .map(str::to_string)
                .unwrap_or_else(|| fallback.clone())
        };

        let send_handle = match record.get(fields::SEND_HANDLE) {
            Some(raw) => SendHandle::parse(raw).ok_or_else(|| {
                KolmsgError::UserError(format!(
                    "invalid sendHandle '{}': expected '是' or '否'",
                    raw
                ))
            })?,
            None => base.send_handle,
        };

        Ok(Self {
            contact_person: pick(fields::CONTACT_PERSON, &base.contact_person),
            kol_name: pick(fields::KOL_NAME, &base.kol_name),
            profit_share: pick(fields::PROFIT_SHARE, &base.profit_share),
            guaranteed_minimum: pick(fields::GUARANTEED_MINIMUM, &base.guaranteed_minimum),
            bonus_amount: pick(fields::BONUS_AMOUNT, &base.bonus_amount),
            performance_threshold: pick(fields::PERFORMANCE_THRESHOLD, &base.performance_threshold),
            profit_share_bonus: pick(fields::PROFIT_SHARE_BONUS, &base.profit_share_bonus),
            fan_offer: pick(fields::FAN_OFFER, &base.fan_offer),
            end_date: pick(fields::END_DATE, &base.end_date),
            send_handle,
        })
    }

    /// Check that the contact person and KOL name are filled in.
    pub fn validate_required(&self) -> Result<()> {
        if self.contact_person.trim().is_empty() || self.kol_name.trim().is_empty() {
            return Err(KolmsgError::ValidationError(
                REQUIRED_FIELDS_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DealTerms {
    fn default() -> Self {
        Self::initial(Local::now().date_naive())
    }
}

/// End date used by the built-in presets: November 30th of `today`'s year.
pub fn preset_end_date(today: NaiveDate) -> String {
    format!("{}-11-30", today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_absent() {
        assert!(is_absent(""));
        assert!(is_absent("   "));
        assert!(is_absent("無"));
        assert!(is_absent(" 無 "));
        assert!(!is_absent("0"));
        assert!(!is_absent("無限"));
    }

    #[test]
    fn test_initial_terms() {
        let terms = DealTerms::initial(date(2025, 3, 9));
        assert_eq!(terms.profit_share, "15");
        assert_eq!(terms.guaranteed_minimum, "無");
        assert_eq!(terms.fan_offer, "無");
        assert_eq!(terms.end_date, "2025-03-09");
        assert_eq!(terms.send_handle, SendHandle::Yes);
        assert!(terms.contact_person.is_empty());
    }

    #[test]
    fn test_to_record_has_every_field() {
        let record = DealTerms::initial(date(2025, 1, 1)).to_record();
        assert_eq!(record.len(), ALL_FIELDS.len());
        for field in ALL_FIELDS {
            assert!(record.contains_key(field), "missing {}", field);
        }
        assert_eq!(record.get(fields::SEND_HANDLE), Some("是"));
    }

    #[test]
    fn test_from_record_overlays_base() {
        let base = DealTerms::initial(date(2025, 1, 1));
        let record = Record::from_iter([("kolName", "小明"), ("sendHandle", "否")]);

        let terms = DealTerms::from_record(&record, &base).unwrap();
        assert_eq!(terms.kol_name, "小明");
        assert_eq!(terms.send_handle, SendHandle::No);
        assert_eq!(terms.profit_share, "15");
    }

    #[test]
    fn test_from_record_rejects_bad_send_handle() {
        let base = DealTerms::initial(date(2025, 1, 1));
        let record = Record::from_iter([("sendHandle", "maybe")]);

        let err = DealTerms::from_record(&record, &base).unwrap_err();
        assert!(matches!(err, KolmsgError::UserError(_)));
    }

    #[test]
    fn test_validate_required() {
        let mut terms = DealTerms::initial(date(2025, 1, 1));
        let err = terms.validate_required().unwrap_err();
        assert!(matches!(err, KolmsgError::ValidationError(_)));
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);

        terms.contact_person = "Amy".to_string();
        assert!(terms.validate_required().is_err());

        terms.kol_name = "  ".to_string();
        assert!(terms.validate_required().is_err());

        terms.kol_name = "Bob".to_string();
        assert!(terms.validate_required().is_ok());
    }

    #[test]
    fn test_apply_assignment() {
        let mut record = Record::new();
        record.apply_assignment("bonusAmount=5000").unwrap();
        record.apply_assignment("fanOffer=a=b").unwrap();
        assert_eq!(record.get("bonusAmount"), Some("5000"));
        assert_eq!(record.get("fanOffer"), Some("a=b"));

        assert!(record.apply_assignment("noequals").is_err());
        assert!(record.apply_assignment("=value").is_err());
    }

    #[test]
    fn test_from_text_accepts_yaml_and_json() {
        let yaml = Record::from_text("kolName: 小明\nprofitShare: \"20\"\nbonusAmount: 5000\n").unwrap();
        assert_eq!(yaml.get("kolName"), Some("小明"));
        assert_eq!(yaml.get("profitShare"), Some("20"));
        assert_eq!(yaml.get("bonusAmount"), Some("5000"));

        let json = Record::from_text(r#"{"bonusAmount": "10000"}"#).unwrap();
        assert_eq!(json.get("bonusAmount"), Some("10000"));

        assert!(Record::from_text("").unwrap().is_empty());
        assert!(Record::from_text("- a\n- b\n").is_err());
        assert!(Record::from_text("fanOffer:\n  nested: x\n").is_err());
    }

    #[test]
    fn test_merge_and_retain() {
        let mut record = Record::from_iter([("a", "1"), ("b", "2")]);
        record.merge(&Record::from_iter([("b", "3"), ("c", "4")]));
        assert_eq!(record.get("b"), Some("3"));
        assert_eq!(record.get("c"), Some("4"));

        record.retain_keys(&["a", "c"]);
        assert_eq!(record.len(), 2);
        assert!(!record.contains_key("b"));
    }

    #[test]
    fn test_preset_end_date() {
        assert_eq!(preset_end_date(date(2026, 10, 16)), "2026-11-30");
    }
}
