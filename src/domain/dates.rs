//! Publication-window resolution for the audit command.

use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::{format_description, time};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

/// Strict `YYYY-MM-DD` with zero padding; anything else is rejected.
pub const FLAG_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Window width applied when one or both bounds are omitted.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum DateRangeError {
    #[error("invalid date format for --{flag}: `{value}`, expected YYYY-MM-DD")]
    Malformed { flag: &'static str, value: String },
    #[error("date for --{flag} is outside the supported calendar range")]
    OutOfRange { flag: &'static str },
}

/// A fully resolved pair of calendar dates bounding the publication query.
///
/// No ordering between `after` and `before` is enforced; a reversed window
/// is passed through and yields an empty result set at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    after: Date,
    before: Date,
}

impl DateWindow {
    /// Resolve the effective window from the optional command flags.
    ///
    /// Both absent: the trailing `DEFAULT_LOOKBACK_DAYS` days up to `today`.
    /// Only `before`: `after` backs off `DEFAULT_LOOKBACK_DAYS` days from it.
    /// Only `after`: `before` is `today`. Both present: used as-is.
    pub fn resolve(
        before: Option<&str>,
        after: Option<&str>,
        today: Date,
    ) -> Result<Self, DateRangeError> {
        let before = before.map(|raw| parse_flag("date-before", raw)).transpose()?;
        let after = after.map(|raw| parse_flag("date-after", raw)).transpose()?;

        let (after, before) = match (after, before) {
            (None, None) => (back_off(today, "date-after")?, today),
            (None, Some(before)) => (back_off(before, "date-after")?, before),
            (Some(after), None) => (after, today),
            (Some(after), Some(before)) => (after, before),
        };

        Ok(Self { after, before })
    }

    pub fn after(&self) -> Date {
        self.after
    }

    pub fn before(&self) -> Date {
        self.before
    }

    /// Inclusive lower bound: `after` at 00:00:00 UTC.
    pub fn lower_bound(&self) -> OffsetDateTime {
        PrimitiveDateTime::new(self.after, time!(00:00:00)).assume_utc()
    }

    /// Inclusive upper bound: `before` at 23:59:59 UTC.
    pub fn upper_bound(&self) -> OffsetDateTime {
        PrimitiveDateTime::new(self.before, time!(23:59:59)).assume_utc()
    }
}

fn parse_flag(flag: &'static str, value: &str) -> Result<Date, DateRangeError> {
    Date::parse(value, FLAG_DATE_FORMAT).map_err(|_| DateRangeError::Malformed {
        flag,
        value: value.to_string(),
    })
}

fn back_off(date: Date, flag: &'static str) -> Result<Date, DateRangeError> {
    date.checked_sub(Duration::days(DEFAULT_LOOKBACK_DAYS))
        .ok_or(DateRangeError::OutOfRange { flag })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn omitted_flags_default_to_trailing_thirty_days() {
        let window = DateWindow::resolve(None, None, date!(2024 - 03 - 15)).expect("window");
        assert_eq!(window.after(), date!(2024 - 02 - 14));
        assert_eq!(window.before(), date!(2024 - 03 - 15));
    }

    #[test]
    fn before_alone_backs_off_the_lower_bound() {
        let window =
            DateWindow::resolve(Some("2024-01-01"), None, date!(2024 - 06 - 01)).expect("window");
        assert_eq!(window.after(), date!(2023 - 12 - 02));
        assert_eq!(window.before(), date!(2024 - 01 - 01));
    }

    #[test]
    fn after_alone_closes_the_window_at_today() {
        let window =
            DateWindow::resolve(None, Some("2023-12-01"), date!(2024 - 01 - 20)).expect("window");
        assert_eq!(window.after(), date!(2023 - 12 - 01));
        assert_eq!(window.before(), date!(2024 - 01 - 20));
    }

    #[test]
    fn explicit_pair_is_used_verbatim() {
        let window = DateWindow::resolve(
            Some("2024-01-01"),
            Some("2023-12-01"),
            date!(2024 - 06 - 01),
        )
        .expect("window");
        assert_eq!(window.after(), date!(2023 - 12 - 01));
        assert_eq!(window.before(), date!(2024 - 01 - 01));
    }

    #[test]
    fn reversed_window_is_accepted_silently() {
        let window = DateWindow::resolve(
            Some("2023-01-01"),
            Some("2024-01-01"),
            date!(2024 - 06 - 01),
        )
        .expect("window");
        assert!(window.after() > window.before());
    }

    #[test]
    fn malformed_values_name_the_offending_flag() {
        let err = DateWindow::resolve(Some("2024/01/01"), None, date!(2024 - 06 - 01))
            .expect_err("slash separators rejected");
        assert!(matches!(
            err,
            DateRangeError::Malformed {
                flag: "date-before",
                ..
            }
        ));

        let err = DateWindow::resolve(None, Some("Jan-1-2024"), date!(2024 - 06 - 01))
            .expect_err("month names rejected");
        assert!(matches!(
            err,
            DateRangeError::Malformed {
                flag: "date-after",
                ..
            }
        ));
    }

    #[test]
    fn unpadded_components_are_rejected() {
        let err = DateWindow::resolve(Some("2024-1-1"), None, date!(2024 - 06 - 01))
            .expect_err("unpadded digits rejected");
        assert!(matches!(err, DateRangeError::Malformed { .. }));
    }

    #[test]
    fn bounds_cover_the_full_days() {
        let window = DateWindow::resolve(
            Some("2024-01-31"),
            Some("2024-01-01"),
            date!(2024 - 06 - 01),
        )
        .expect("window");
        assert_eq!(
            window.lower_bound(),
            PrimitiveDateTime::new(date!(2024 - 01 - 01), time!(00:00:00)).assume_utc()
        );
        assert_eq!(
            window.upper_bound(),
            PrimitiveDateTime::new(date!(2024 - 01 - 31), time!(23:59:59)).assume_utc()
        );
    }
}
