//! Public-holiday oracles.
//!
//! The classifier never hardcodes a jurisdiction: it asks a
//! [`HolidayOracle`] supplied by the caller. Two oracles ship with the
//! library: the French national calendar and an explicit date-set
//! calendar for tests and local variants.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Capability deciding which dates are public holidays.
///
/// Implementations must be consistent: a date returned by
/// [`holidays_in_year`](HolidayOracle::holidays_in_year) answers `true`
/// to [`is_holiday`](HolidayOracle::is_holiday) and vice versa.
pub trait HolidayOracle {
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// All holidays of `year`, ascending.
    fn holidays_in_year(&self, year: i32) -> Vec<NaiveDate>;
}

/// Explicit date-set calendar.
///
/// Holds exactly the dates it was given, nothing is derived. Useful for
/// tests and for jurisdictions the library does not model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    days: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, date: NaiveDate) {
        self.days.insert(date);
    }

    pub fn remove(&mut self, date: NaiveDate) {
        self.days.remove(&date);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl HolidayOracle for HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    fn holidays_in_year(&self, year: i32) -> Vec<NaiveDate> {
        self.days
            .iter()
            .copied()
            .filter(|d| d.year() == year)
            .collect()
    }
}

/// The French national holiday calendar.
///
/// Eight fixed dates (New Year, Labour Day, Victory Day, Bastille Day,
/// Assumption, All Saints, Armistice, Christmas) plus the three
/// Easter-derived public holidays (Easter Monday, Ascension, Whit
/// Monday). Local closure days (e.g. the Alsace-Moselle additions) can
/// be layered on with [`with_extra_days`](FrenchHolidays::with_extra_days).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrenchHolidays {
    #[serde(default)]
    extra: BTreeSet<NaiveDate>,
}

impl FrenchHolidays {
    pub fn new() -> Self {
        Self::default()
    }

    /// National calendar plus caller-declared closure days.
    pub fn with_extra_days<I: IntoIterator<Item = NaiveDate>>(extra: I) -> Self {
        Self {
            extra: extra.into_iter().collect(),
        }
    }

    /// Easter Sunday of `year`, by the anonymous Gregorian computus.
    pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
        let a = year.rem_euclid(19);
        let b = year.div_euclid(100);
        let c = year.rem_euclid(100);
        let d = b / 4;
        let e = b % 4;
        let f = (b + 8) / 25;
        let g = (b - f + 1) / 3;
        let h = (19 * a + b - d - g + 15) % 30;
        let i = c / 4;
        let k = c % 4;
        let l = (32 + 2 * e + 2 * i - h - k) % 7;
        let m = (a + 11 * h + 22 * l) / 451;
        let month = (h + l - 7 * m + 114) / 31;
        let day = (h + l - 7 * m + 114) % 31 + 1;
        NaiveDate::from_ymd_opt(year, month as u32, day as u32)
    }

    fn national_holidays(year: i32) -> Vec<NaiveDate> {
        let fixed = [
            (1, 1),   // Jour de l'an
            (5, 1),   // Fete du travail
            (5, 8),   // Victoire 1945
            (7, 14),  // Fete nationale
            (8, 15),  // Assomption
            (11, 1),  // Toussaint
            (11, 11), // Armistice 1918
            (12, 25), // Noel
        ];
        let mut days: Vec<NaiveDate> = fixed
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .collect();
        if let Some(easter) = Self::easter_sunday(year) {
            // Lundi de Paques, Ascension, lundi de Pentecote.
            for offset in [1, 39, 50] {
                if let Some(day) = easter.checked_add_days(Days::new(offset)) {
                    days.push(day);
                }
            }
        }
        days.sort();
        days
    }
}

impl HolidayOracle for FrenchHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.extra.contains(&date) || Self::national_holidays(date.year()).contains(&date)
    }

    fn holidays_in_year(&self, year: i32) -> Vec<NaiveDate> {
        let mut days = Self::national_holidays(year);
        days.extend(self.extra.iter().copied().filter(|d| d.year() == year));
        days.sort();
        days.dedup();
        days
    }
}
