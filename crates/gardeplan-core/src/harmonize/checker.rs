//! Consistency audit of a rule collection.

use std::ops::RangeInclusive;

use crate::calendar::{bridge_days_in_year, classify, DayType, HolidayOracle};
use crate::roster::{BaseQuotaTable, ConfigRule};

use super::{Issue, IssueKind};

/// Audit and repair engine for a caller-owned rule collection.
///
/// Borrows everything: the base quota table, the holiday oracle, and on
/// each call the rules themselves. The scan window is an explicit year
/// range so results never depend on the wall clock.
pub struct Harmonizer<'a> {
    base: &'a BaseQuotaTable,
    oracle: &'a dyn HolidayOracle,
    years: RangeInclusive<i32>,
}

impl<'a> Harmonizer<'a> {
    pub fn new(
        base: &'a BaseQuotaTable,
        oracle: &'a dyn HolidayOracle,
        years: RangeInclusive<i32>,
    ) -> Self {
        Self {
            base,
            oracle,
            years,
        }
    }

    pub fn base(&self) -> &BaseQuotaTable {
        self.base
    }

    pub fn oracle(&self) -> &dyn HolidayOracle {
        self.oracle
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.years.clone()
    }

    /// Audit `rules` and report every detectable inconsistency.
    ///
    /// Read-only and exhaustive: no early exit, no deduplication. The
    /// passes run in a fixed order (range validity, day-by-day
    /// classification, holiday and bridge coverage, quota keys, range
    /// overlaps) and iterate rules and dates in order, so the output
    /// order is deterministic for a given input.
    pub fn check(&self, rules: &[ConfigRule]) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_date_order(rules, &mut issues);
        self.check_day_types(rules, &mut issues);
        self.check_holiday_coverage(rules, &mut issues);
        self.check_post_types(rules, &mut issues);
        self.check_overlaps(rules, &mut issues);
        tracing::debug!(rules = rules.len(), issues = issues.len(), "consistency check done");
        issues
    }

    fn check_date_order(&self, rules: &[ConfigRule], issues: &mut Vec<Issue>) {
        for (index, rule) in rules.iter().enumerate() {
            if !rule.is_date_order_valid() {
                issues.push(
                    Issue::new(
                        IssueKind::DateOrderInverted,
                        index,
                        format!(
                            "configuration starts {} but ends {} before it",
                            rule.start_date, rule.end_date
                        ),
                    ),
                );
            }
        }
    }

    /// Day-granular scan: one issue per date whose classification
    /// disagrees with the asserted day type.
    fn check_day_types(&self, rules: &[ConfigRule], issues: &mut Vec<Issue>) {
        for (index, rule) in rules.iter().enumerate() {
            for day in rule.days() {
                let class = classify(day, self.oracle);
                if class.day_type != rule.applied_day_type {
                    issues.push(
                        Issue::new(
                            IssueKind::DayTypeMismatch,
                            index,
                            format!(
                                "{} is declared {} but classifies as {}",
                                day, rule.applied_day_type, class.day_type
                            ),
                        )
                        .with_date(day)
                        .with_suggested_day_type(class.day_type),
                    );
                }
            }
        }
    }

    /// Holiday and bridge restatement over the scan window.
    ///
    /// Duplicates some day-type mismatches on purpose: these issues
    /// carry the holiday- or bridge-specific wording.
    fn check_holiday_coverage(&self, rules: &[ConfigRule], issues: &mut Vec<Issue>) {
        for year in self.years() {
            for holiday in self.oracle.holidays_in_year(year) {
                for (index, rule) in rules.iter().enumerate() {
                    if rule.covers(holiday) && rule.applied_day_type != DayType::SundayOrHoliday {
                        issues.push(
                            Issue::new(
                                IssueKind::HolidayWrongType,
                                index,
                                format!(
                                    "{} is a public holiday but the covering configuration declares {}",
                                    holiday, rule.applied_day_type
                                ),
                            )
                            .with_date(holiday)
                            .with_suggested_day_type(DayType::SundayOrHoliday),
                        );
                    }
                }
            }
            for bridge in bridge_days_in_year(year, self.oracle) {
                for (index, rule) in rules.iter().enumerate() {
                    if rule.covers(bridge) && rule.applied_day_type != DayType::SundayOrHoliday {
                        issues.push(
                            Issue::new(
                                IssueKind::BridgeDayWrongType,
                                index,
                                format!(
                                    "{} is a bridge day but the covering configuration declares {}",
                                    bridge, rule.applied_day_type
                                ),
                            )
                            .with_date(bridge)
                            .with_suggested_day_type(DayType::SundayOrHoliday),
                        );
                    }
                }
            }
        }
    }

    fn check_post_types(&self, rules: &[ConfigRule], issues: &mut Vec<Issue>) {
        for (index, rule) in rules.iter().enumerate() {
            for post in rule.post_quotas.keys() {
                if !self.base.knows_post(rule.applied_day_type, post) {
                    issues.push(Issue::new(
                        IssueKind::UnknownPostType,
                        index,
                        format!(
                            "configuration {}..{} quotes unknown post \"{}\"",
                            rule.start_date, rule.end_date, post
                        ),
                    ));
                }
            }
        }
    }

    /// All-pairs overlap detection within each day-type group.
    ///
    /// Three mutually overlapping rules produce three issues, not two.
    fn check_overlaps(&self, rules: &[ConfigRule], issues: &mut Vec<Issue>) {
        for day_type in DayType::ALL {
            let mut group: Vec<usize> = (0..rules.len())
                .filter(|&i| rules[i].applied_day_type == day_type)
                .collect();
            group.sort_by_key(|&i| (rules[i].start_date, i));
            for (pos, &a) in group.iter().enumerate() {
                for &b in &group[pos + 1..] {
                    if rules[a].overlaps(&rules[b]) {
                        issues.push(
                            Issue::new(
                                IssueKind::OverlappingConfigs,
                                a,
                                format!(
                                    "configurations {}..{} and {}..{} overlap for {}",
                                    rules[a].start_date,
                                    rules[a].end_date,
                                    rules[b].start_date,
                                    rules[b].end_date,
                                    day_type
                                ),
                            )
                            .with_other_rule(b),
                        );
                    }
                }
            }
        }
    }
}
