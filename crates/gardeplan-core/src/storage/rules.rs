//! TOML rule files.
//!
//! Specific configurations are stored at
//! `~/.config/gardeplan/rules.toml` as an array of records whose day
//! type is a plain string. Decoding is lenient: a record with an
//! unrecognized day type label does not fail the load, it is dropped
//! from the returned rule set and surfaced as an
//! [`InvalidDayType`](IssueKind::InvalidDayType) issue so the caller can
//! show it next to the checker's findings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::DayType;
use crate::error::{ConfigError, Result};
use crate::harmonize::{Issue, IssueKind};
use crate::roster::ConfigRule;

/// One stored rule, day type as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_type: String,
    #[serde(default)]
    pub quotas: BTreeMap<String, u32>,
}

impl RuleRecord {
    pub fn from_rule(rule: &ConfigRule) -> Self {
        Self {
            start_date: rule.start_date,
            end_date: rule.end_date,
            day_type: rule.applied_day_type.label().to_string(),
            quotas: rule.post_quotas.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<RuleRecord>,
}

/// Path of the rule file.
pub fn rules_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("rules.toml"))
}

/// Decode a rule file's TOML text.
///
/// Records whose day type does not parse are reported, not returned;
/// their issue index refers to the record's position in the file.
pub fn decode_rules(text: &str) -> Result<(Vec<ConfigRule>, Vec<Issue>)> {
    let file: RulesFile =
        toml::from_str(text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
    let mut rules = Vec::new();
    let mut issues = Vec::new();
    for (index, record) in file.rules.into_iter().enumerate() {
        match record.day_type.parse::<DayType>() {
            Ok(day_type) => rules.push(ConfigRule {
                start_date: record.start_date,
                end_date: record.end_date,
                applied_day_type: day_type,
                post_quotas: record.quotas,
            }),
            Err(_) => issues.push(Issue::new(
                IssueKind::InvalidDayType,
                index,
                format!(
                    "configuration {}..{} declares unknown day type \"{}\"",
                    record.start_date, record.end_date, record.day_type
                ),
            )),
        }
    }
    Ok((rules, issues))
}

/// Encode rules as TOML text with canonical day type labels.
pub fn encode_rules(rules: &[ConfigRule]) -> Result<String> {
    let file = RulesFile {
        rules: rules.iter().map(RuleRecord::from_rule).collect(),
    };
    toml::to_string_pretty(&file)
        .map_err(|e| ConfigError::EncodeFailed(e.to_string()).into())
}

/// Load the rule file at `path`; a missing file is an empty rule set.
pub fn load_rules(path: &Path) -> Result<(Vec<ConfigRule>, Vec<Issue>)> {
    if !path.exists() {
        return Ok((Vec::new(), Vec::new()));
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    decode_rules(&text)
}

/// Save `rules` to the rule file at `path`.
pub fn save_rules(path: &Path, rules: &[ConfigRule]) -> Result<()> {
    let text = encode_rules(rules)?;
    std::fs::write(path, text).map_err(|e| ConfigError::SaveFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), rules = rules.len(), "rule file saved");
    Ok(())
}
