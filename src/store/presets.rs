//! Deal presets: named partial records applied over the current deal terms.

use super::{read_json, write_json};
use crate::error::{KolmsgError, Result};
use crate::record::{NONE_SENTINEL, Record, fields, preset_end_date};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Fields captured when saving the current terms as a preset.
///
/// The contact person and KOL name are per-message and never stored.
pub const PRESET_FIELDS: &[&str] = &[
    fields::PROFIT_SHARE,
    fields::GUARANTEED_MINIMUM,
    fields::BONUS_AMOUNT,
    fields::PERFORMANCE_THRESHOLD,
    fields::PROFIT_SHARE_BONUS,
    fields::END_DATE,
    fields::FAN_OFFER,
    fields::SEND_HANDLE,
];

const FAN_OFFER_COMBO: &str = "🔹抽免單（3 名）\n🔹單品售價 1,649（優於官網）\n🔹手把 + DOCK 充電轉接組獨家組 2,790（官網原價 3,180）\n🔺補充：組合的充電轉接器支援 NS1 代主機，本次調查發現各通路購買 ZA 的客群有 60-70% 使用 Switch 1 代主機，所以推出此組合，目前反應很不錯";

/// A named set of deal-term values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub data: Record,
}

impl Preset {
    fn new(id: &str, name: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            data: pairs.iter().copied().collect(),
        }
    }
}

/// Built-in presets, with end dates in `today`'s year.
pub fn default_presets(today: NaiveDate) -> Vec<Preset> {
    let end_date = preset_end_date(today);
    let end_date = end_date.as_str();
    let none = NONE_SENTINEL;

    vec![
        Preset::new(
            "A",
            "方案A：分潤20%",
            &[
                (fields::PROFIT_SHARE, "20"),
                (fields::GUARANTEED_MINIMUM, none),
                (fields::BONUS_AMOUNT, none),
                (fields::PERFORMANCE_THRESHOLD, none),
                (fields::PROFIT_SHARE_BONUS, "25"),
                (fields::END_DATE, end_date),
                (fields::FAN_OFFER, none),
            ],
        ),
        Preset::new(
            "B",
            "方案B：分潤15%+保底25000",
            &[
                (fields::PROFIT_SHARE, "15"),
                (fields::GUARANTEED_MINIMUM, "25000"),
                (fields::BONUS_AMOUNT, none),
                (fields::PERFORMANCE_THRESHOLD, none),
                (fields::PROFIT_SHARE_BONUS, "20"),
                (fields::END_DATE, end_date),
                (fields::FAN_OFFER, none),
            ],
        ),
        Preset::new(
            "C",
            "方案C：分潤10%+加碼10000",
            &[
                (fields::PROFIT_SHARE, "10"),
                (fields::GUARANTEED_MINIMUM, none),
                (fields::BONUS_AMOUNT, "10000"),
                (fields::PERFORMANCE_THRESHOLD, "150000"),
                (fields::PROFIT_SHARE_BONUS, "15"),
                (fields::END_DATE, end_date),
                (fields::FAN_OFFER, none),
            ],
        ),
        Preset::new(
            "THRESHOLD_TEMPLATE",
            "門檻達標模板",
            &[
                (fields::PROFIT_SHARE, "15"),
                (fields::PERFORMANCE_THRESHOLD, "200000"),
                (fields::PROFIT_SHARE_BONUS, "20"),
                (fields::END_DATE, end_date),
            ],
        ),
        Preset::new(
            "FAN_OFFER_COMBO",
            "粉絲優惠模板：組合優惠",
            &[(fields::END_DATE, end_date), (fields::FAN_OFFER, FAN_OFFER_COMBO)],
        ),
    ]
}

/// Deal presets backed by `presets.json`.
#[derive(Debug)]
pub struct PresetStore {
    path: PathBuf,
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Load presets, falling back to the built-in set when the file is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_date(path, Local::now().date_naive())
    }

    /// Load presets; built-in defaults use `today` for their end dates.
    pub fn load_with_date<P: AsRef<Path>>(path: P, today: NaiveDate) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let presets = read_json(&path)?.unwrap_or_else(|| default_presets(today));
        Ok(Self { path, presets })
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn find(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Look up a preset, failing with a user error when it does not exist.
    pub fn get(&self, id: &str) -> Result<&Preset> {
        self.find(id).ok_or_else(|| {
            KolmsgError::UserError(format!(
                "preset '{}' not found.\n\nUse `kolmsg preset list` to see available presets.",
                id
            ))
        })
    }

    /// Save the current terms as a new preset.
    ///
    /// Only [`PRESET_FIELDS`] present in `current` are stored.
    pub fn add(&mut self, name: &str, current: &Record) -> Result<&Preset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KolmsgError::UserError("方案名稱不能為空！".to_string()));
        }

        let mut data = current.clone();
        data.retain_keys(PRESET_FIELDS);

        let preset = Preset {
            id: self.next_id(),
            name: name.to_string(),
            data,
        };
        info!(id = %preset.id, name = %preset.name, "added preset");
        let index = self.presets.len();
        self.presets.push(preset);

        Ok(&self.presets[index])
    }

    /// Remove a preset by id.
    pub fn delete(&mut self, id: &str) -> Result<Preset> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| {
                KolmsgError::UserError(format!("刪除失敗，找不到對應的方案。 (id '{}')", id))
            })?;

        let removed = self.presets.remove(index);
        info!(id = %removed.id, "deleted preset");
        Ok(removed)
    }

    /// Persist the current presets.
    pub fn save(&self) -> Result<()> {
        write_json(&self.path, &self.presets)
    }

    /// Millisecond timestamp id, bumped until unique.
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
