//! Deprecation notices for commands scheduled for removal.
//!
//! Produces the plain banner text and the "should block execution" flag;
//! rendering (colors, help-page injection) belongs to the hosting CLI
//! framework.

use chrono::NaiveDate;

use crate::domain::error::{SdkError, SdkResult};

const INDENT: &str = "  ";
const SEPARATOR_WIDTH: usize = 69;

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> SdkResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        SdkError::BadRequest(format!(
            "Invalid date '{value}'. Expected format YYYY-MM-DD."
        ))
    })
}

/// Metadata describing a deprecated command.
#[derive(Debug, Clone)]
pub struct DeprecationNotice {
    /// Date when the command will be removed.
    pub removal_date: NaiveDate,
    /// Date when the deprecation started.
    pub deprecated_date: Option<NaiveDate>,
    /// Version where the deprecation was introduced.
    pub version: Option<String>,
    /// Suggested replacement command.
    pub alternative: Option<String>,
    /// Explanation for the deprecation.
    pub reason: Option<String>,
    /// Refuse to run the command once the removal date has passed.
    pub enforce_removal: bool,
}

impl DeprecationNotice {
    /// Create a notice with only the mandatory removal date set.
    pub fn new(removal_date: NaiveDate) -> Self {
        Self {
            removal_date,
            deprecated_date: None,
            version: None,
            alternative: None,
            reason: None,
            enforce_removal: false,
        }
    }

    /// Days from `today` until removal; negative once the date has passed.
    pub fn days_until_removal(&self, today: NaiveDate) -> i64 {
        self.removal_date.signed_duration_since(today).num_days()
    }

    /// Whether execution must be refused as of `today`.
    pub fn should_block(&self, today: NaiveDate) -> bool {
        self.enforce_removal && self.days_until_removal(today) < 0
    }

    /// Plain warning-banner lines for `today`.
    pub fn banner(&self, today: NaiveDate) -> Vec<String> {
        let days_left = self.days_until_removal(today);
        let removal_str = self.removal_date.format("%Y-%m-%d").to_string();
        let sep = "=".repeat(SEPARATOR_WIDTH);

        let mut lines = vec![
            format!("{INDENT}{sep}"),
            format!("{INDENT}WARNING: This command is DEPRECATED"),
        ];

        if let Some(since) = self.deprecated_date {
            lines.push(format!("{INDENT}Deprecated since: {}", since.format("%Y-%m-%d")));
        }
        if let Some(version) = &self.version {
            lines.push(format!("{INDENT}Deprecated in version: {version}"));
        }

        if days_left > 30 {
            lines.push(format!(
                "{INDENT}Scheduled for removal on: {removal_str} ({days_left} days left)"
            ));
        } else if days_left > 0 {
            lines.push(format!(
                "{INDENT}Will be REMOVED in {days_left} days on: {removal_str}"
            ));
        } else if days_left == 0 {
            lines.push(format!("{INDENT}Will be REMOVED TODAY on: {removal_str}"));
        } else {
            lines.push(format!(
                "{INDENT}REMOVAL DATE PASSED on: {removal_str} ({} days ago)",
                days_left.abs()
            ));
        }

        if let Some(alternative) = &self.alternative {
            lines.push(format!("{INDENT}Use instead: {alternative}"));
        }
        if let Some(reason) = &self.reason {
            lines.push(format!("{INDENT}Reason: {reason}"));
        }

        lines.push(format!("{INDENT}{sep}"));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("valid test date")
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("not-a-date").unwrap_err();
        assert_eq!(err.code(), 400);
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_banner_far_future() {
        let notice = DeprecationNotice::new(date("2026-12-31"));
        let lines = notice.banner(date("2026-01-01"));
        assert!(lines[1].contains("DEPRECATED"));
        assert!(lines
            .iter()
            .any(|l| l.contains("Scheduled for removal on: 2026-12-31 (364 days left)")));
    }

    #[test]
    fn test_banner_imminent_and_today() {
        let notice = DeprecationNotice::new(date("2026-01-10"));
        let soon = notice.banner(date("2026-01-05"));
        assert!(soon.iter().any(|l| l.contains("Will be REMOVED in 5 days")));

        let today = notice.banner(date("2026-01-10"));
        assert!(today.iter().any(|l| l.contains("REMOVED TODAY")));
    }

    #[test]
    fn test_banner_past_removal_lists_all_fields() {
        let mut notice = DeprecationNotice::new(date("2026-01-01"));
        notice.deprecated_date = Some(date("2025-06-01"));
        notice.version = Some("2.3.0".into());
        notice.alternative = Some("tool configure".into());
        notice.reason = Some("superseded".into());

        let lines = notice.banner(date("2026-01-11"));
        assert!(lines.iter().any(|l| l.contains("REMOVAL DATE PASSED on: 2026-01-01 (10 days ago)")));
        assert!(lines.iter().any(|l| l.contains("Deprecated since: 2025-06-01")));
        assert!(lines.iter().any(|l| l.contains("Deprecated in version: 2.3.0")));
        assert!(lines.iter().any(|l| l.contains("Use instead: tool configure")));
        assert!(lines.iter().any(|l| l.contains("Reason: superseded")));
    }

    #[test]
    fn test_should_block_requires_enforcement_and_passed_date() {
        let mut notice = DeprecationNotice::new(date("2026-01-01"));
        assert!(!notice.should_block(date("2026-02-01")));

        notice.enforce_removal = true;
        assert!(!notice.should_block(date("2026-01-01")));
        assert!(notice.should_block(date("2026-01-02")));
    }
}
