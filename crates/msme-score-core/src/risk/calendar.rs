use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::benchmarks::{sector_obligations, CalendarEntry, FilingCategory, COMPLIANCE_CALENDAR};
use crate::profile::Sector;

/// How far ahead statutory calendar dates are surfaced.
pub const LOOKAHEAD_DAYS: i64 = 45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDeadline {
    pub name: String,
    pub category: FilingCategory,
    /// `None` for obligations that run through the whole month
    pub due_date: Option<NaiveDate>,
    pub days_until: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringObligation {
    pub name: String,
    pub frequency: String,
    pub advance_days: u32,
}

/// Next occurrence of a fixed-day entry on or after `today`.
fn next_occurrence(entry: &CalendarEntry, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), entry.month, day)?;
    if this_year >= today {
        Some(this_year)
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, entry.month, day)
    }
}

/// Calendar filings falling due within `LOOKAHEAD_DAYS` of `today`, nearest
/// first. Month-long obligations are listed while their month is current.
pub fn upcoming_deadlines(today: NaiveDate) -> Vec<UpcomingDeadline> {
    let mut upcoming: Vec<UpcomingDeadline> = COMPLIANCE_CALENDAR
        .iter()
        .filter_map(|entry| match entry.day {
            Some(day) => {
                let due = next_occurrence(entry, day, today)?;
                let days = (due - today).num_days();
                (days <= LOOKAHEAD_DAYS).then(|| UpcomingDeadline {
                    name: entry.name.to_string(),
                    category: entry.category,
                    due_date: Some(due),
                    days_until: Some(days),
                })
            }
            None => (entry.month == today.month()).then(|| UpcomingDeadline {
                name: entry.name.to_string(),
                category: entry.category,
                due_date: None,
                days_until: None,
            }),
        })
        .collect();

    upcoming.sort_by_key(|d| d.days_until.unwrap_or(0));
    upcoming
}

pub fn recurring_obligations(sector: Sector) -> Vec<RecurringObligation> {
    sector_obligations(sector)
        .iter()
        .map(|o| RecurringObligation {
            name: o.name.to_string(),
            frequency: o.frequency.to_string(),
            advance_days: o.advance_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_window_in_early_march() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let names: Vec<String> = upcoming_deadlines(today).into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "Advance Tax (Q4)",
                "FY Closing Filings",
                "GSTR-9 Annual Return",
            ]
        );
    }

    #[test]
    fn test_year_wrap() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let upcoming = upcoming_deadlines(today);
        let first = &upcoming[0];
        assert_eq!(first.name, "Calendar Year Closure (shops/establishments)");
        assert_eq!(first.days_until, Some(11));
        let advance = upcoming.iter().find(|d| d.name == "Advance Tax (Q3)").unwrap();
        assert_eq!(advance.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(advance.days_until, Some(26));
    }

    #[test]
    fn test_month_long_entry_listed_in_its_month() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        let upcoming = upcoming_deadlines(today);
        assert!(upcoming
            .iter()
            .any(|d| d.name == "Festival Season Labour Compliance" && d.days_until.is_none()));
    }

    #[test]
    fn test_recurring_by_sector() {
        assert_eq!(recurring_obligations(Sector::Manufacturing).len(), 4);
        assert!(recurring_obligations(Sector::Other).is_empty());
    }
}
