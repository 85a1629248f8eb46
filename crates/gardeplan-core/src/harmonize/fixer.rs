//! Automatic repair of inconsistent rule collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{classify, DayType, HolidayOracle};
use crate::roster::ConfigRule;

use super::checker::Harmonizer;
use super::IssueKind;

/// Summary of one repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    /// Issues present before the pass that are gone after it.
    pub fixed_issues: usize,
    /// Issues still present after the pass.
    pub remaining_issues: usize,
    /// One line per structural change (merge, truncation, relabel, split).
    pub details: Vec<String>,
}

impl FixReport {
    /// Whether the pass changed the rule collection.
    pub fn has_changes(&self) -> bool {
        !self.details.is_empty()
    }

    /// Human-readable one-line summary.
    pub fn message(&self) -> String {
        if self.details.is_empty() {
            if self.remaining_issues == 0 {
                "No inconsistencies found.".to_string()
            } else {
                format!(
                    "{} issue(s) found, none auto-repairable.",
                    self.remaining_issues
                )
            }
        } else {
            format!(
                "Repaired {} issue(s) with {} change(s), {} remaining.",
                self.fixed_issues,
                self.details.len(),
                self.remaining_issues
            )
        }
    }
}

/// A maximal run of consecutive dates sharing one classification.
struct TypeRun {
    start: NaiveDate,
    end: NaiveDate,
    day_type: DayType,
}

/// Partition `[start, end]` into maximal same-classification runs.
fn classification_runs(
    start: NaiveDate,
    end: NaiveDate,
    oracle: &dyn HolidayOracle,
) -> Vec<TypeRun> {
    let mut runs: Vec<TypeRun> = Vec::new();
    let mut day = Some(start).filter(|s| *s <= end);
    while let Some(d) = day {
        let day_type = classify(d, oracle).day_type;
        match runs.last_mut() {
            Some(run) if run.day_type == day_type => run.end = d,
            _ => runs.push(TypeRun {
                start: d,
                end: d,
                day_type,
            }),
        }
        day = d.succ_opt().filter(|n| *n <= end);
    }
    runs
}

impl Harmonizer<'_> {
    /// Repair `rules` in place and report what changed.
    ///
    /// Runs once per call: overlap resolution first (merge rules with
    /// equal quotas, truncate the earlier of unequal ones), then
    /// day-type resolution (relabel homogeneous mislabels, split
    /// heterogeneous spans into maximal same-classification runs).
    /// Mutations are applied to a working copy that replaces the
    /// caller's collection at the end, so a reader never observes a
    /// half-repaired state. Rules that cannot be repaired safely are
    /// left untouched and show up again on the next check.
    pub fn fix(&self, rules: &mut Vec<ConfigRule>) -> FixReport {
        let snapshot = self.check(rules);
        let total = snapshot.len();
        let mut working = rules.clone();
        let mut details = Vec::new();

        // Overlap resolution. The snapshot indices go stale as soon as
        // the first mutation lands, so each pair is re-located in the
        // working copy by value; a pair already consumed by an earlier
        // merge is skipped.
        for issue in &snapshot {
            if issue.kind != IssueKind::OverlappingConfigs {
                continue;
            }
            let Some(other) = issue.other_rule else {
                continue;
            };
            self.resolve_overlap(&mut working, &rules[issue.rule], &rules[other], &mut details);
        }

        // Day-type resolution against the post-overlap state. Implicated
        // rules are collected by value first: the relabels and splits
        // below invalidate the indices of this second check too.
        let interim = self.check(&working);
        let mut implicated: Vec<ConfigRule> = Vec::new();
        for issue in &interim {
            if matches!(
                issue.kind,
                IssueKind::DayTypeMismatch
                    | IssueKind::HolidayWrongType
                    | IssueKind::BridgeDayWrongType
            ) {
                let rule = working[issue.rule].clone();
                if !implicated.contains(&rule) {
                    implicated.push(rule);
                }
            }
        }
        for rule in &implicated {
            self.resolve_day_type(&mut working, rule, &mut details);
        }

        let remaining_issues = self.check(&working).len();
        for line in &details {
            tracing::info!(change = %line, "rule repair");
        }
        *rules = working;
        FixReport {
            fixed_issues: total.saturating_sub(remaining_issues),
            remaining_issues,
            details,
        }
    }

    fn resolve_overlap(
        &self,
        working: &mut Vec<ConfigRule>,
        a: &ConfigRule,
        b: &ConfigRule,
        details: &mut Vec<String>,
    ) {
        if a == b {
            // Exact duplicates: keep the first copy.
            let Some(first) = working.iter().position(|r| r == a) else {
                return;
            };
            let Some(second) = working.iter().skip(first + 1).position(|r| r == a) else {
                return;
            };
            working.remove(first + 1 + second);
            details.push(format!(
                "removed duplicate configuration {}..{} ({})",
                a.start_date, a.end_date, a.applied_day_type
            ));
            return;
        }
        let (Some(pos_a), Some(pos_b)) = (
            working.iter().position(|r| r == a),
            working.iter().position(|r| r == b),
        ) else {
            return;
        };

        if a.post_quotas == b.post_quotas {
            // Same overrides: one rule spanning the union replaces both.
            let merged = ConfigRule {
                start_date: a.start_date.min(b.start_date),
                end_date: a.end_date.max(b.end_date),
                applied_day_type: a.applied_day_type,
                post_quotas: a.post_quotas.clone(),
            };
            working.remove(pos_a.max(pos_b));
            working.remove(pos_a.min(pos_b));
            details.push(format!(
                "merged {}..{} and {}..{} into {}..{} ({})",
                a.start_date,
                a.end_date,
                b.start_date,
                b.end_date,
                merged.start_date,
                merged.end_date,
                merged.applied_day_type
            ));
            working.push(merged);
        } else {
            // Different overrides: give way to the later-starting rule by
            // truncating the earlier one, but only if that leaves it a
            // valid range. The later rule keeps all of its data.
            let (earlier, later) = if a.start_date <= b.start_date {
                (a, b)
            } else {
                (b, a)
            };
            let Some(new_end) = later.start_date.pred_opt() else {
                return;
            };
            if earlier.start_date > new_end {
                return;
            }
            let pos = if earlier == a { pos_a } else { pos_b };
            let old_end = working[pos].end_date;
            working[pos].end_date = new_end;
            details.push(format!(
                "truncated {}..{} ({}) to end {}",
                earlier.start_date, old_end, earlier.applied_day_type, new_end
            ));
        }
    }

    fn resolve_day_type(
        &self,
        working: &mut Vec<ConfigRule>,
        rule: &ConfigRule,
        details: &mut Vec<String>,
    ) {
        let Some(pos) = working.iter().position(|r| r == rule) else {
            return;
        };
        if !rule.is_date_order_valid() {
            // An inverted range has no days to classify; the inversion
            // stays reported for the caller to resolve.
            return;
        }
        let runs = classification_runs(rule.start_date, rule.end_date, self.oracle());
        match runs.as_slice() {
            [] => {}
            [single] => {
                // Homogeneous span, the label is simply wrong.
                if single.day_type != rule.applied_day_type {
                    working[pos].applied_day_type = single.day_type;
                    details.push(format!(
                        "relabeled {}..{} from {} to {}",
                        rule.start_date, rule.end_date, rule.applied_day_type, single.day_type
                    ));
                }
            }
            many => {
                // Heterogeneous span: one replacement rule per run, each
                // keeping the original quota overrides.
                working.remove(pos);
                for run in many {
                    working.push(ConfigRule {
                        start_date: run.start,
                        end_date: run.end,
                        applied_day_type: run.day_type,
                        post_quotas: rule.post_quotas.clone(),
                    });
                }
                details.push(format!(
                    "split {}..{} ({}) into {} homogeneous configurations",
                    rule.start_date,
                    rule.end_date,
                    rule.applied_day_type,
                    many.len()
                ));
            }
        }
    }
}
