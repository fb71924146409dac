//! Emergency recipient schedule
//!
//! Parses the configured schedule table (`time window -> comma-separated
//! recipients`) and resolves which recipients are on call at a given moment.
//! A window is `HH:MM-HH:MM`, optionally prefixed by a weekday name; the `*`
//! entry always applies. Windows whose end precedes their start wrap past
//! midnight.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use faultline_core::domain::DomainError;

/// One parsed schedule window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Restricts the window to one weekday (the day the window *starts*)
    pub weekday: Option<Weekday>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Parses `"HH:MM-HH:MM"` or `"Weekday HH:MM-HH:MM"`.
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimeWindow(spec.to_string());

        let (weekday, range) = match spec.trim().split_once(' ') {
            Some((day, range)) => {
                let weekday = day.parse::<Weekday>().map_err(|_| invalid())?;
                (Some(weekday), range.trim())
            }
            None => (None, spec.trim()),
        };

        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| invalid())?;

        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    /// Whether `now` falls inside this window.
    ///
    /// Wrapping windows (`start > end`) cover `start..midnight` on the
    /// window's day and `midnight..=end` on the following day.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        let time = now.time();
        // Seconds are ignored; windows have minute resolution.
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);

        if self.start <= self.end {
            let in_range = self.start <= time && time <= self.end;
            match self.weekday {
                Some(day) => in_range && now.weekday() == day,
                None => in_range,
            }
        } else {
            match self.weekday {
                Some(day) => {
                    (time >= self.start && now.weekday() == day)
                        || (time <= self.end && now.weekday() == day.succ())
                }
                None => time >= self.start || time <= self.end,
            }
        }
    }
}

/// A parsed emergency schedule.
#[derive(Debug, Clone, Default)]
pub struct EmergencySchedule {
    /// Windowed entries: (window, recipients)
    entries: Vec<(TimeWindow, Vec<String>)>,
    /// Recipients from the `*` wildcard entry
    wildcard: Vec<String>,
}

impl EmergencySchedule {
    /// Parses the configuration table.
    ///
    /// # Errors
    /// Fails on the first window that does not parse; the `*` key is exempt.
    pub fn from_map(table: &BTreeMap<String, String>) -> Result<Self, DomainError> {
        let mut schedule = EmergencySchedule::default();
        for (window, addresses) in table {
            let recipients = split_addresses(addresses);
            if window == "*" {
                schedule.wildcard.extend(recipients);
            } else {
                schedule.entries.push((TimeWindow::parse(window)?, recipients));
            }
        }
        Ok(schedule)
    }

    /// Resolves who should receive an emergency notification at `now`.
    ///
    /// The result is the union of all matching windows, the wildcard entry,
    /// and the administrator address.
    pub fn resolve_recipients(&self, now: NaiveDateTime, admin: &str) -> BTreeSet<String> {
        let mut recipients = BTreeSet::new();
        for (window, addresses) in &self.entries {
            if window.contains(now) {
                recipients.extend(addresses.iter().cloned());
            }
        }
        recipients.extend(self.wildcard.iter().cloned());
        recipients.insert(admin.to_string());
        recipients
    }
}

fn split_addresses(addresses: &str) -> Vec<String> {
    addresses
        .split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}
