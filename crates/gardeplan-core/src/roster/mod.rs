//! Staffing posts, base quotas and specific configurations.
//!
//! Every day type has a base quota table: how many people each post
//! needs on such a day. A [`ConfigRule`] ("specific configuration")
//! overrides those quotas for an inclusive date range and asserts the
//! day type of every date in the range. Rules are plain values: two
//! rules are the same rule exactly when range, day type and quota
//! overrides are equal.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DayType;

/// Post identifiers built into the application.
///
/// A quota key is recognized when it is one of these or when the base
/// table for the rule's day type already quotes it.
pub const STANDARD_POSTS: &[&str] = &[
    "senior",
    "interne",
    "urgences",
    "bloc",
    "reanimation",
    "pediatrie",
];

/// Whether `post` is one of the built-in post identifiers.
pub fn is_standard_post(post: &str) -> bool {
    STANDARD_POSTS.contains(&post)
}

/// Default per-post headcount for each day type.
///
/// Read-only input to the harmonization engine; a specific configuration
/// that does not quote a post falls back to these numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseQuotaTable {
    #[serde(default = "default_weekday_quotas")]
    pub weekday: BTreeMap<String, u32>,
    #[serde(default = "default_saturday_quotas")]
    pub saturday: BTreeMap<String, u32>,
    #[serde(default = "default_sunday_quotas")]
    pub sunday_or_holiday: BTreeMap<String, u32>,
}

fn quotas(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn default_weekday_quotas() -> BTreeMap<String, u32> {
    quotas(&[("senior", 1), ("interne", 1), ("urgences", 2)])
}

fn default_saturday_quotas() -> BTreeMap<String, u32> {
    quotas(&[("senior", 1), ("interne", 2), ("urgences", 2)])
}

fn default_sunday_quotas() -> BTreeMap<String, u32> {
    quotas(&[("senior", 2), ("interne", 2), ("urgences", 3)])
}

impl Default for BaseQuotaTable {
    fn default() -> Self {
        Self {
            weekday: default_weekday_quotas(),
            saturday: default_saturday_quotas(),
            sunday_or_holiday: default_sunday_quotas(),
        }
    }
}

impl BaseQuotaTable {
    /// The quota map applying to `day_type`.
    pub fn for_day_type(&self, day_type: DayType) -> &BTreeMap<String, u32> {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::SundayOrHoliday => &self.sunday_or_holiday,
        }
    }

    /// Whether `post` is a known quota key for `day_type`.
    pub fn knows_post(&self, day_type: DayType, post: &str) -> bool {
        is_standard_post(post) || self.for_day_type(day_type).contains_key(post)
    }
}

/// A specific configuration: a date range asserting a day type and
/// overriding some post quotas.
///
/// The range is inclusive on both ends. Quota keys absent from
/// `post_quotas` fall back to the base table for `applied_day_type`,
/// they do not mean zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub applied_day_type: DayType,
    #[serde(default)]
    pub post_quotas: BTreeMap<String, u32>,
}

impl ConfigRule {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, applied_day_type: DayType) -> Self {
        Self {
            start_date,
            end_date,
            applied_day_type,
            post_quotas: BTreeMap::new(),
        }
    }

    /// Add a quota override.
    pub fn with_quota(mut self, post: impl Into<String>, headcount: u32) -> Self {
        self.post_quotas.insert(post.into(), headcount);
        self
    }

    /// Whether the range is well formed (`start_date <= end_date`).
    pub fn is_date_order_valid(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Whether `date` falls inside the inclusive range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the two inclusive ranges intersect.
    pub fn overlaps(&self, other: &ConfigRule) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }

    /// Every date of the range, ascending (empty when inverted).
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end_date;
        std::iter::successors(
            Some(self.start_date).filter(|s| *s <= end),
            move |d| d.succ_opt().filter(|n| *n <= end),
        )
    }

    /// Effective headcount for `post`: the override if present, else the
    /// base quota for the asserted day type.
    pub fn quota_for(&self, post: &str, base: &BaseQuotaTable) -> Option<u32> {
        self.post_quotas
            .get(post)
            .copied()
            .or_else(|| base.for_day_type(self.applied_day_type).get(post).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn covers_is_inclusive_on_both_ends() {
        let rule = ConfigRule::new(date(2024, 12, 24), date(2024, 12, 26), DayType::SundayOrHoliday);
        assert!(rule.covers(date(2024, 12, 24)));
        assert!(rule.covers(date(2024, 12, 26)));
        assert!(!rule.covers(date(2024, 12, 27)));
    }

    #[test]
    fn overlap_detects_shared_edges() {
        let a = ConfigRule::new(date(2024, 1, 1), date(2024, 1, 10), DayType::Weekday);
        let b = ConfigRule::new(date(2024, 1, 10), date(2024, 1, 20), DayType::Weekday);
        let c = ConfigRule::new(date(2024, 1, 11), date(2024, 1, 20), DayType::Weekday);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn days_iterates_the_inclusive_range() {
        let rule = ConfigRule::new(date(2024, 2, 28), date(2024, 3, 1), DayType::Weekday);
        let days: Vec<_> = rule.days().collect();
        assert_eq!(
            days,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn inverted_range_yields_no_days() {
        let rule = ConfigRule::new(date(2024, 3, 1), date(2024, 2, 1), DayType::Weekday);
        assert!(!rule.is_date_order_valid());
        assert_eq!(rule.days().count(), 0);
    }

    #[test]
    fn quota_falls_back_to_the_base_table() {
        let base = BaseQuotaTable::default();
        let rule = ConfigRule::new(date(2024, 1, 1), date(2024, 1, 1), DayType::SundayOrHoliday)
            .with_quota("interne", 4);
        assert_eq!(rule.quota_for("interne", &base), Some(4));
        assert_eq!(rule.quota_for("senior", &base), Some(2));
        assert_eq!(rule.quota_for("bloc", &base), None);
    }

    #[test]
    fn base_table_recognizes_standard_and_quoted_posts() {
        let mut base = BaseQuotaTable::default();
        base.weekday.insert("maternite".into(), 1);
        assert!(base.knows_post(DayType::Weekday, "pediatrie")); // standard, unquoted
        assert!(base.knows_post(DayType::Weekday, "maternite")); // quoted, non-standard
        assert!(!base.knows_post(DayType::Saturday, "maternite"));
        assert!(!base.knows_post(DayType::Weekday, "zzz"));
    }

    #[test]
    fn rules_compare_by_value() {
        let a = ConfigRule::new(date(2024, 1, 1), date(2024, 1, 5), DayType::Weekday)
            .with_quota("interne", 2);
        let b = ConfigRule::new(date(2024, 1, 1), date(2024, 1, 5), DayType::Weekday)
            .with_quota("interne", 2);
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_quota("interne", 3));
    }
}
