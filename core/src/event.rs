//! Event expansion: one timestamped event per unit of activity.
//!
//! RULE: Events are derived output. They are rebuilt from calendars on
//! every run and never edited in place.

use crate::{
    calendar::DayCalendar,
    pattern::PatternKind,
    registry::Account,
    rng::{RngBank, StreamSlot},
    types::AccountId,
};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp: NaiveDateTime,
    pub account_id: AccountId,
    pub display_name: String,
    pub site: String,
    pub contact_email: String,
    pub secret: String,
    pub pattern: PatternKind,
}

impl ActivityEvent {
    fn for_account(account: &Account, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            account_id: account.id,
            display_name: account.display_name.clone(),
            site: account.site.clone(),
            contact_email: account.contact_email.clone(),
            secret: account.secret.clone(),
            pattern: account.pattern,
        }
    }
}

/// Expand every (account, day, count) into `count` events at random
/// times of day, merged into one sequence sorted by timestamp.
///
/// Each account draws its times from its own stream, so the output
/// depends only on the seed and the accounts, not on their order.
/// Ties keep account order (stable sort).
pub fn expand(calendars: &[(Account, DayCalendar)], bank: &RngBank) -> Vec<ActivityEvent> {
    let capacity: u64 = calendars.iter().map(|(_, cal)| cal.total()).sum();
    let mut events = Vec::with_capacity(capacity as usize);

    for (account, calendar) in calendars {
        let mut rng = bank.for_account(StreamSlot::Expander, account.id);
        for (date, count) in calendar.iter() {
            for _ in 0..count {
                let hour = rng.range_inclusive(0, 23);
                let minute = rng.range_inclusive(0, 59);
                let second = rng.range_inclusive(0, 59);
                let time = time_of_day(hour, minute, second);
                events.push(ActivityEvent::for_account(account, date.and_time(time)));
            }
        }
    }

    events.sort_by_key(|e| e.timestamp);
    events
}

/// Midnight plus the given offset. `NaiveTime` addition wraps at 24h,
/// so this cannot fail.
fn time_of_day(hour: u32, minute: u32, second: u32) -> NaiveTime {
    let seconds = i64::from(hour) * 3_600 + i64::from(minute) * 60 + i64::from(second);
    NaiveTime::MIN + Duration::seconds(seconds)
}
