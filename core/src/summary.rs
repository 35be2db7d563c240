//! Read-only aggregations over a finished run.

use crate::{
    calendar::DayCalendar,
    event::ActivityEvent,
    pattern::PatternKind,
    registry::Account,
    types::{AccountId, ActivityCount},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One account's activity on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub display_name: String,
    pub site: String,
    pub contact_email: String,
    pub secret: String,
    pub pattern: PatternKind,
    pub activity_count: ActivityCount,
}

/// Flatten calendars into per-day rows sorted by (date, account_id).
pub fn daily_rows(calendars: &[(Account, DayCalendar)]) -> Vec<DailyActivity> {
    let mut rows: Vec<DailyActivity> = calendars
        .iter()
        .flat_map(|(account, cal)| {
            cal.iter().map(move |(date, count)| DailyActivity {
                date,
                account_id: account.id,
                display_name: account.display_name.clone(),
                site: account.site.clone(),
                contact_email: account.contact_email.clone(),
                secret: account.secret.clone(),
                pattern: account.pattern,
                activity_count: count,
            })
        })
        .collect();
    rows.sort_by_key(|r| (r.date, r.account_id));
    rows
}

/// Events per calendar date across all accounts.
pub fn daily_totals(events: &[ActivityEvent]) -> BTreeMap<NaiveDate, u64> {
    let mut totals = BTreeMap::new();
    for e in events {
        *totals.entry(e.timestamp.date()).or_insert(0) += 1;
    }
    totals
}

/// Events per pattern.
pub fn pattern_totals(events: &[ActivityEvent]) -> BTreeMap<PatternKind, u64> {
    let mut totals = BTreeMap::new();
    for e in events {
        *totals.entry(e.pattern).or_insert(0) += 1;
    }
    totals
}

/// The date with the most events; earliest wins ties.
pub fn busiest_day(events: &[ActivityEvent]) -> Option<(NaiveDate, u64)> {
    daily_totals(events)
        .into_iter()
        .fold(None, |best, (date, n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((date, n)),
        })
}
