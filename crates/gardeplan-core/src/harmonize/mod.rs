//! Consistency audit and automatic repair of specific configurations.
//!
//! The [`Harmonizer`] owns nothing: it borrows the base quota table and
//! the holiday oracle, scans a caller-owned rule collection, and either
//! reports [`Issue`]s (`check`, read-only) or repairs them in place
//! (`fix`, single writer).

mod checker;
mod fixer;
mod issue;

pub use checker::Harmonizer;
pub use fixer::FixReport;
pub use issue::{Issue, IssueKind};
