//! Immutable cron triggers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::error::EngineError;

/// Cron based firing schedule bound to one handle.
///
/// There are no setters: a changed expression means a new trigger, and the
/// handle carrying the old one has to be replaced.
#[derive(Debug, Clone)]
pub struct Trigger {
    expression: String,
    schedule: Schedule,
}

impl Trigger {
    /// Parse a seconds-first cron expression (6 or 7 fields).
    ///
    /// `?` is accepted in any field and means the same as `*`.
    pub fn cron(expression: &str) -> Result<Self, EngineError> {
        let normalized = normalize(expression);
        let schedule = Schedule::from_str(&normalized).map_err(|e| EngineError::InvalidCron {
            expression: expression.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            expression: expression.to_string(),
            schedule,
        })
    }

    /// The expression this trigger was built from, as given.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First fire time strictly after `after`.
    pub fn next_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(after).next()
    }

    /// Next fire time from now.
    pub fn next_fire_time(&self) -> Option<DateTime<Utc>> {
        self.schedule.upcoming(Utc).next()
    }
}

impl PartialEq for Trigger {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for Trigger {}

fn normalize(expression: &str) -> String {
    expression
        .split_whitespace()
        .map(|field| if field == "?" { "*" } else { field })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quartz_question_mark() {
        let trigger = Trigger::cron("0/5 * * * * ?").unwrap();
        assert_eq!(trigger.expression(), "0/5 * * * * ?");
        assert!(trigger.next_fire_time().is_some());
    }

    #[test]
    fn test_invalid_expression() {
        let err = Trigger::cron("not a cron").unwrap_err();
        assert!(matches!(err, EngineError::InvalidCron { .. }));
    }

    #[test]
    fn test_next_after_every_five_seconds() {
        let trigger = Trigger::cron("0/5 * * * * ?").unwrap();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 1).unwrap();
        let next = trigger.next_after(&start).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 5).unwrap());
    }

    #[test]
    fn test_hourly() {
        let trigger = Trigger::cron("0 0 * * * ?").unwrap();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 1).unwrap();
        let next = trigger.next_after(&start).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_equality_by_expression() {
        assert_eq!(
            Trigger::cron("0 0 * * * *").unwrap(),
            Trigger::cron("0 0 * * * *").unwrap()
        );
        assert_ne!(
            Trigger::cron("0 0 * * * *").unwrap(),
            Trigger::cron("0 30 * * * *").unwrap()
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize(" 0  0 * * *   ? "), "0 0 * * * *");
    }
}
