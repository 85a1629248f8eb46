//! Detected inconsistencies.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DayType;

/// Category of a detected inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The rule's start date is after its end date.
    DateOrderInverted,
    /// The rule's day type label could not be decoded.
    InvalidDayType,
    /// A date in the rule's range classifies to a different day type.
    DayTypeMismatch,
    /// A public holiday is covered by a rule not asserting sunday_or_holiday.
    HolidayWrongType,
    /// A bridge day is covered by a rule not asserting sunday_or_holiday.
    BridgeDayWrongType,
    /// A quota key is neither a standard post nor in the base table.
    UnknownPostType,
    /// Two rules of the same day type have intersecting ranges.
    OverlappingConfigs,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueKind::DateOrderInverted => "date order inverted",
            IssueKind::InvalidDayType => "invalid day type",
            IssueKind::DayTypeMismatch => "day type mismatch",
            IssueKind::HolidayWrongType => "holiday with wrong day type",
            IssueKind::BridgeDayWrongType => "bridge day with wrong day type",
            IssueKind::UnknownPostType => "unknown post type",
            IssueKind::OverlappingConfigs => "overlapping configurations",
        };
        f.write_str(label)
    }
}

/// One detected inconsistency.
///
/// Issues are derived values: a fresh check recomputes them from the
/// current rule state, so `rule` (and `other_rule` for overlaps) index
/// the collection as it was checked and go stale after any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    /// Index of the offending rule in the checked collection.
    pub rule: usize,
    /// Second rule involved, for overlap issues.
    pub other_rule: Option<usize>,
    /// The date in question, where the issue is date-specific.
    pub date: Option<NaiveDate>,
    /// The day type the classifier computed for `date`.
    pub suggested_day_type: Option<DayType>,
}

impl Issue {
    pub fn new(kind: IssueKind, rule: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            rule,
            other_rule: None,
            date: None,
            suggested_day_type: None,
        }
    }

    pub fn with_other_rule(mut self, other_rule: usize) -> Self {
        self.other_rule = Some(other_rule);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_suggested_day_type(mut self, day_type: DayType) -> Self {
        self.suggested_day_type = Some(day_type);
        self
    }
}
