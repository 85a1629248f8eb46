//! # Gardeplan Core Library
//!
//! This library provides the core scheduling logic for Gardeplan, an
//! on-call staffing planner for medical shift posts. It implements a
//! CLI-first philosophy where all operations are available via a
//! standalone CLI binary, with any graphical front end being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Calendar**: pure classification of civil dates into tariff
//!   categories (weekday, Saturday, Sunday-or-holiday), including bridge
//!   days ("ponts") adjacent to public holidays
//! - **Roster**: base staffing quotas per day type and date-ranged
//!   specific configurations overriding them
//! - **Harmonization**: consistency audit of specific configurations
//!   against the calendar, with automatic repair of contradictions
//! - **Storage**: TOML-based configuration and rule files
//!
//! ## Key Components
//!
//! - [`classify`]: date classification entry point
//! - [`HolidayOracle`]: public-holiday capability, with the French
//!   national calendar and explicit date-set calendars built in
//! - [`Harmonizer`]: the `check`/`fix` engine over a rule collection
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod harmonize;
pub mod roster;
pub mod storage;

pub use calendar::holidays::{FrenchHolidays, HolidayCalendar, HolidayOracle};
pub use calendar::{bridge_days_in_year, classify, is_bridge_day, DayClass, DayType};
pub use error::{ConfigError, CoreError, Result};
pub use harmonize::{FixReport, Harmonizer, Issue, IssueKind};
pub use roster::{BaseQuotaTable, ConfigRule, STANDARD_POSTS};
pub use storage::Config;
