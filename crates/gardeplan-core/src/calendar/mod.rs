//! Tariff classification of civil dates.
//!
//! Staffing quotas depend on the tariff category of a date:
//! - ordinary weekdays,
//! - Saturdays,
//! - Sundays and public holidays.
//!
//! A working day adjacent to public holidays can be a bridge day
//! ("pont"); it is then staffed like a Sunday or holiday. Classification
//! is pure: the same date and the same [`HolidayOracle`] always produce
//! the same answer.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub mod holidays;

pub use holidays::{FrenchHolidays, HolidayCalendar, HolidayOracle};

/// Tariff category of a date.
///
/// Exactly one category applies to every date. Precedence when several
/// conditions hold: bridge day, then actual holiday, then Sunday (all
/// three map to `SundayOrHoliday`), then Saturday, then `Weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    SundayOrHoliday,
}

impl DayType {
    /// All categories, in quota-table order.
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::SundayOrHoliday];

    /// Canonical lowercase label, as used in rule and config files.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::SundayOrHoliday => "sunday_or_holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayType {
    type Err = String;

    /// Parses the canonical labels, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "weekday" => Ok(DayType::Weekday),
            "saturday" => Ok(DayType::Saturday),
            "sunday_or_holiday" => Ok(DayType::SundayOrHoliday),
            _ => Err(format!("unknown day type: {s}")),
        }
    }
}

/// Result of classifying one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClass {
    pub day_type: DayType,
    pub is_bridge: bool,
}

/// Whether `date` is a bridge day relative to the oracle's holidays.
///
/// A date is a bridge day when any of the following holds (the checks are
/// independent; one match suffices, and a bridge day never induces
/// further bridge days):
/// - Monday before a Tuesday holiday,
/// - Friday after a Thursday holiday,
/// - Saturday one day after a Friday holiday or two days after a
///   Thursday holiday,
/// - any Monday-Friday date sandwiched between two holidays.
pub fn is_bridge_day(date: NaiveDate, oracle: &dyn HolidayOracle) -> bool {
    let holiday = |d: Option<NaiveDate>| d.is_some_and(|d| oracle.is_holiday(d));
    let prev = date.pred_opt();
    let next = date.succ_opt();
    let two_back = date.checked_sub_days(Days::new(2));

    match date.weekday() {
        // The sandwich rule adds nothing on Mondays and Fridays: it is
        // strictly weaker than the single-neighbor checks.
        Weekday::Mon => holiday(next),
        Weekday::Tue | Weekday::Wed | Weekday::Thu => holiday(prev) && holiday(next),
        Weekday::Fri => holiday(prev),
        Weekday::Sat => holiday(prev) || holiday(two_back),
        Weekday::Sun => false,
    }
}

/// Classify `date` into its tariff category.
pub fn classify(date: NaiveDate, oracle: &dyn HolidayOracle) -> DayClass {
    let is_bridge = is_bridge_day(date, oracle);
    let day_type = if is_bridge || oracle.is_holiday(date) || date.weekday() == Weekday::Sun {
        DayType::SundayOrHoliday
    } else if date.weekday() == Weekday::Sat {
        DayType::Saturday
    } else {
        DayType::Weekday
    };
    DayClass { day_type, is_bridge }
}

/// Every date of `year` in ascending order (empty for years chrono
/// cannot represent).
pub fn days_in_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    std::iter::successors(first, move |d| d.succ_opt().filter(|n| n.year() == year))
}

/// All bridge days of `year`, ascending.
pub fn bridge_days_in_year(year: i32, oracle: &dyn HolidayOracle) -> Vec<NaiveDate> {
    days_in_year(year)
        .filter(|d| is_bridge_day(*d, oracle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn oracle(dates: &[NaiveDate]) -> HolidayCalendar {
        dates.iter().copied().collect()
    }

    #[test]
    fn plain_weekday() {
        let cal = oracle(&[]);
        let class = classify(date(2024, 5, 6), &cal); // Monday
        assert_eq!(class.day_type, DayType::Weekday);
        assert!(!class.is_bridge);
    }

    #[test]
    fn plain_saturday_and_sunday() {
        let cal = oracle(&[]);
        assert_eq!(classify(date(2024, 5, 4), &cal).day_type, DayType::Saturday);
        assert_eq!(classify(date(2024, 5, 5), &cal).day_type, DayType::SundayOrHoliday);
    }

    #[test]
    fn holiday_outranks_saturday() {
        let cal = oracle(&[date(2024, 6, 1)]); // a Saturday
        assert_eq!(classify(date(2024, 6, 1), &cal).day_type, DayType::SundayOrHoliday);
    }

    #[test]
    fn monday_before_tuesday_holiday_is_bridge() {
        let cal = oracle(&[date(2024, 5, 7)]); // Tuesday
        let class = classify(date(2024, 5, 6), &cal);
        assert!(class.is_bridge);
        assert_eq!(class.day_type, DayType::SundayOrHoliday);
    }

    #[test]
    fn friday_after_thursday_holiday_is_bridge() {
        let cal = oracle(&[date(2024, 5, 9)]); // Thursday
        assert!(is_bridge_day(date(2024, 5, 10), &cal));
    }

    #[test]
    fn saturday_two_days_after_thursday_holiday_is_bridge() {
        let cal = oracle(&[date(2024, 5, 9)]); // Thursday
        assert!(is_bridge_day(date(2024, 5, 11), &cal));
    }

    #[test]
    fn saturday_after_friday_holiday_is_bridge() {
        let cal = oracle(&[date(2024, 5, 17)]); // Friday
        assert!(is_bridge_day(date(2024, 5, 18), &cal));
    }

    #[test]
    fn workday_sandwiched_between_holidays_is_bridge() {
        let cal = oracle(&[date(2024, 5, 7), date(2024, 5, 9)]); // Tue + Thu
        assert!(is_bridge_day(date(2024, 5, 8), &cal)); // Wednesday
    }

    #[test]
    fn thursday_holiday_itself_is_not_a_bridge() {
        let cal = oracle(&[date(2024, 5, 9)]);
        let class = classify(date(2024, 5, 9), &cal);
        assert_eq!(class.day_type, DayType::SundayOrHoliday);
        assert!(!class.is_bridge);
    }

    #[test]
    fn no_bridge_of_a_bridge() {
        // Thursday holiday makes Friday a bridge; the following Monday
        // must not become a bridge of that bridge.
        let cal = oracle(&[date(2024, 5, 9)]);
        assert!(is_bridge_day(date(2024, 5, 10), &cal));
        assert!(!is_bridge_day(date(2024, 5, 13), &cal));
    }

    #[test]
    fn sunday_is_never_a_bridge() {
        let cal = oracle(&[date(2024, 5, 11), date(2024, 5, 13)]); // Sat + Mon
        assert!(!is_bridge_day(date(2024, 5, 12), &cal));
    }

    #[test]
    fn ascension_window_classifies_like_the_french_calendar() {
        let french = FrenchHolidays::default();
        // Ascension 2024: Thursday May 9th.
        let ascension = classify(date(2024, 5, 9), &french);
        assert_eq!(ascension.day_type, DayType::SundayOrHoliday);
        assert!(!ascension.is_bridge);
        // Friday after and the Saturday two days after are bridges.
        let friday = classify(date(2024, 5, 10), &french);
        assert!(friday.is_bridge);
        assert_eq!(friday.day_type, DayType::SundayOrHoliday);
        let saturday = classify(date(2024, 5, 11), &french);
        assert!(saturday.is_bridge);
        assert_eq!(saturday.day_type, DayType::SundayOrHoliday);
    }

    #[test]
    fn bridge_days_scan_matches_pointwise_checks() {
        let cal = oracle(&[date(2024, 5, 9)]);
        assert_eq!(
            bridge_days_in_year(2024, &cal),
            vec![date(2024, 5, 10), date(2024, 5, 11)]
        );
    }

    #[test]
    fn days_in_year_handles_leap_years() {
        assert_eq!(days_in_year(2024).count(), 366);
        assert_eq!(days_in_year(2025).count(), 365);
    }

    #[test]
    fn day_type_labels_round_trip() {
        for day_type in DayType::ALL {
            assert_eq!(day_type.label().parse::<DayType>().unwrap(), day_type);
        }
        assert_eq!("Saturday".parse::<DayType>().unwrap(), DayType::Saturday);
        assert!("someday".parse::<DayType>().is_err());
    }
}
