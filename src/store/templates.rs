//! Template presets: named, user-editable message templates.

use super::{read_json, write_json};
use crate::error::{KolmsgError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Id of the built-in template.
pub const DEFAULT_TEMPLATE_ID: &str = "default-1";

/// The built-in partnership offer template.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "HI {contactPerson}，如剛剛討論，提供方案給 {kolName} 參考唷

<<< 合作模式與分潤 >>>
🔹採 {profitShare} 分潤機制[if: guaranteedMinimum|，並提供 {guaranteedMinimum} 保底]
🔹透過 {kolName} 的專屬頁面成交，提供銷售額的 {profitShare} 作為回饋(扣除物流成本)
[if: bonusAmount|🔹除分潤方案，將額外提供 {bonusAmount} 作為加碼獎勵]
[if: performanceThreshold|🔹如果業績達到 {performanceThreshold}，則分潤提升至 {profitShareBonus}]
[if: fanOffer|<<<粉絲福利>>>
{fanOffer}]

<<< 成效追蹤 >>>
🔹會為 {kolName} 建立專屬頁面與連結
🔹提供報表連結，方便追蹤轉單並調整內容節奏

<<< 時程安排 >>>
🔹初期合作至 {endDate}，後續可思考長期合作
[if: sendHandle=是|🔹會再補 7DS-ZAPA 手把，日後也可以評估薩爾達無雙的合作案喔]
[if: sendHandle=否|🔹如果有需要素材，我們都可以提供免費的素材包]

再麻煩 {kolName} 評估看看🙏期待可以合作一波~~";

/// A named template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePreset {
    pub id: String,
    pub name: String,
    pub template: String,
}

/// Built-in template list.
pub fn default_template_presets() -> Vec<TemplatePreset> {
    vec![TemplatePreset {
        id: DEFAULT_TEMPLATE_ID.to_string(),
        name: "預設範本".to_string(),
        template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
    }]
}

/// On-disk shape of `templates.json`.
#[derive(Debug, Serialize, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    active_id: String,
    templates: Vec<TemplatePreset>,
}

/// Template presets backed by `templates.json`, with one active template.
#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    active_id: String,
    templates: Vec<TemplatePreset>,
}

impl TemplateStore {
    /// Load templates, falling back to the built-in template when the file
    /// is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file: TemplateFile = read_json(&path)?.unwrap_or_else(|| TemplateFile {
            active_id: DEFAULT_TEMPLATE_ID.to_string(),
            templates: default_template_presets(),
        });

        Ok(Self {
            path,
            active_id: file.active_id,
            templates: file.templates,
        })
    }

    pub fn templates(&self) -> &[TemplatePreset] {
        &self.templates
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// The active template, or the first one if the active id is stale.
    pub fn active(&self) -> Option<&TemplatePreset> {
        self.find(&self.active_id).or_else(|| self.templates.first())
    }

    pub fn find(&self, id: &str) -> Option<&TemplatePreset> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Look up a template, failing with a user error when it does not exist.
    pub fn get(&self, id: &str) -> Result<&TemplatePreset> {
        self.find(id).ok_or_else(|| {
            KolmsgError::UserError(format!(
                "template '{}' not found.\n\nUse `kolmsg template list` to see available templates.",
                id
            ))
        })
    }

    /// Make `id` the active template.
    pub fn select(&mut self, id: &str) -> Result<()> {
        self.get(id)?;
        self.active_id = id.to_string();
        info!(id, "selected template");
        Ok(())
    }

    /// Add a new template and make it active.
    pub fn add(&mut self, name: &str, content: &str) -> Result<&TemplatePreset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KolmsgError::UserError("範本名稱不能為空！".to_string()));
        }
        if content.is_empty() {
            return Err(KolmsgError::UserError(
                "沒有可用的範本內容來儲存。".to_string(),
            ));
        }

        let preset = TemplatePreset {
            id: self.next_id(),
            name: name.to_string(),
            template: content.to_string(),
        };
        info!(id = %preset.id, name = %preset.name, "added template");

        self.active_id = preset.id.clone();
        let index = self.templates.len();
        self.templates.push(preset);
        Ok(&self.templates[index])
    }

    /// Replace the content of an existing template.
    pub fn update(&mut self, id: &str, content: &str) -> Result<()> {
        let preset = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| KolmsgError::UserError(format!("template '{}' not found", id)))?;

        preset.template = content.to_string();
        info!(id, "updated template");
        Ok(())
    }

    /// Restore the built-in content into an existing template.
    pub fn reset(&mut self, id: &str) -> Result<()> {
        self.update(id, DEFAULT_MESSAGE_TEMPLATE)
    }

    /// Remove a template. The last remaining template cannot be removed.
    ///
    /// When the active template is removed, the template that moves into its
    /// position becomes active, else the one before it.
    pub fn delete(&mut self, id: &str) -> Result<TemplatePreset> {
        if self.templates.len() <= 1 {
            return Err(KolmsgError::UserError("無法刪除最後一個範本。".to_string()));
        }

        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| KolmsgError::UserError(format!("template '{}' not found", id)))?;

        let removed = self.templates.remove(index);

        if self.active_id == removed.id {
            let next = self
                .templates
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.templates.get(i)))
                .or_else(|| self.templates.first());
            self.active_id = next.map(|t| t.id.clone()).unwrap_or_default();
        }

        info!(id = %removed.id, active = %self.active_id, "deleted template");
        Ok(removed)
    }

    /// Persist templates and the active selection.
    pub fn save(&self) -> Result<()> {
        let file = TemplateFile {
            active_id: self.active_id.clone(),
            templates: self.templates.clone(),
        };
        write_json(&self.path, &file)
    }

    fn next_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
