//! Pattern-driven calendar generation.
//!
//! A DayCalendar maps each active day of the window to an activity
//! count. Days with no activity are absent; a stored count is always >= 1.
//!
//! Each PatternKind has one pure rule function. The rule only sees day
//! offsets in [0, days) and writes through `CalendarBuilder`, which is
//! the single place that turns offsets into dates.

use crate::{
    pattern::PatternKind,
    rng::ActivityRng,
    types::{ActivityCount, DayOffset},
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average days per month used to scale a monthly rate over the window.
pub const DAYS_PER_MONTH: f64 = 30.44;

pub const BURST_STEP_DAYS: (u32, u32) = (60, 120);
pub const BURST_LENGTH_DAYS: (u32, u32) = (3, 7);
pub const BURST_COUNT: (u32, u32) = (2, 6);
pub const WEEKLY_COUNT: (u32, u32) = (1, 2);
pub const MONTHLY_BLOCK_DAYS: u32 = 30;
pub const MONTHLY_COUNT: (u32, u32) = (1, 3);
pub const LURKER_TAIL_DAYS: u32 = 30;
pub const LURKER_SPAN_DAYS: (u32, u32) = (14, 30);
pub const LURKER_COUNT: (u32, u32) = (2, 5);
pub const WEEKEND_COUNT: (u32, u32) = (1, 3);
pub const WEEKEND_STRAY_WEEKDAY_CHANCE: f64 = 0.05;
pub const WEEKDAY_COUNT: (u32, u32) = (1, 2);
pub const DAILY_ACTIVE_CHANCE: f64 = 0.8;
pub const DAILY_COUNT: (u32, u32) = (1, 2);

/// Activity per day for one account over one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCalendar {
    pub start_date: NaiveDate,
    pub simulation_days: u32,
    days: BTreeMap<NaiveDate, ActivityCount>,
}

impl DayCalendar {
    pub fn empty(start_date: NaiveDate, simulation_days: u32) -> Self {
        Self {
            start_date,
            simulation_days,
            days: BTreeMap::new(),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<ActivityCount> {
        self.days.get(&date).copied()
    }

    /// Active days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, ActivityCount)> + '_ {
        self.days.iter().map(|(d, c)| (*d, *c))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of all activity counts.
    pub fn total(&self) -> u64 {
        self.days.values().map(|&c| u64::from(c)).sum()
    }

    /// First date past the window.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(i64::from(self.simulation_days))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date()
    }
}

/// Inputs for one account's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRequest {
    pub pattern: PatternKind,
    pub start_date: NaiveDate,
    pub simulation_days: u32,
    pub monthly_min: u32,
    pub monthly_max: u32,
}

/// Write access to a calendar in window-offset terms.
pub struct CalendarBuilder {
    calendar: DayCalendar,
}

impl CalendarBuilder {
    fn new(start_date: NaiveDate, simulation_days: u32) -> Self {
        Self {
            calendar: DayCalendar::empty(start_date, simulation_days),
        }
    }

    pub fn days(&self) -> u32 {
        self.calendar.simulation_days
    }

    pub fn date_at(&self, offset: DayOffset) -> NaiveDate {
        self.calendar.start_date + Duration::days(i64::from(offset))
    }

    /// 0 = Monday .. 6 = Sunday.
    pub fn weekday_at(&self, offset: DayOffset) -> u32 {
        self.date_at(offset).weekday().num_days_from_monday()
    }

    /// Overwrite the count for `offset`. Out-of-window offsets and zero
    /// counts are dropped.
    pub fn set(&mut self, offset: DayOffset, count: ActivityCount) {
        if offset >= self.days() || count == 0 {
            return;
        }
        let date = self.date_at(offset);
        self.calendar.days.insert(date, count);
    }

    /// Add one activity to `offset`.
    pub fn increment(&mut self, offset: DayOffset) {
        if offset >= self.days() {
            return;
        }
        let date = self.date_at(offset);
        *self.calendar.days.entry(date).or_insert(0) += 1;
    }

    fn finish(self) -> DayCalendar {
        self.calendar
    }
}

type PatternRule = fn(&CalendarRequest, &mut CalendarBuilder, &mut ActivityRng);

/// Indexed by `PatternKind as usize`, in `PatternKind::ALL` order.
const RULES: [PatternRule; 8] = [
    bursty,
    weekly,
    monthly,
    lurker_then_active,
    weekend,
    weekday,
    uniform_random,
    daily,
];

fn rule_for(pattern: PatternKind) -> PatternRule {
    RULES[pattern as usize]
}

/// Produce the calendar for one account. Total over any input: short or
/// empty windows yield sparse or empty calendars.
pub fn generate(request: &CalendarRequest, rng: &mut ActivityRng) -> DayCalendar {
    let mut builder = CalendarBuilder::new(request.start_date, request.simulation_days);
    if request.simulation_days > 0 {
        rule_for(request.pattern)(request, &mut builder, rng);
    }
    builder.finish()
}

fn draw(rng: &mut ActivityRng, (lo, hi): (u32, u32)) -> u32 {
    rng.range_inclusive(lo, hi)
}

fn bursty(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    let days = cal.days();
    let mut offset = 0u32;
    while offset < days {
        let length = draw(rng, BURST_LENGTH_DAYS);
        for day in offset..offset.saturating_add(length).min(days) {
            let count = draw(rng, BURST_COUNT);
            cal.set(day, count);
        }
        offset = offset.saturating_add(draw(rng, BURST_STEP_DAYS));
    }
}

fn weekly(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    let chosen = rng.range_inclusive(0, 6);
    for day in 0..cal.days() {
        if cal.weekday_at(day) == chosen {
            let count = draw(rng, WEEKLY_COUNT);
            cal.set(day, count);
        }
    }
}

fn monthly(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    let days = cal.days();
    let mut block_start = 0u32;
    while block_start < days {
        let last_in_block = (MONTHLY_BLOCK_DAYS - 1).min(days - 1 - block_start);
        let offset = rng.range_inclusive(0, last_in_block);
        let count = draw(rng, MONTHLY_COUNT);
        cal.set(block_start + offset, count);
        block_start = block_start.saturating_add(MONTHLY_BLOCK_DAYS);
    }
}

fn lurker_then_active(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    let days = cal.days();
    let earliest = days / 2;
    let latest = earliest.max(days.saturating_sub(LURKER_TAIL_DAYS));
    let activation = rng.range_inclusive(earliest, latest);
    let span = draw(rng, LURKER_SPAN_DAYS);
    for day in activation..activation.saturating_add(span).min(days) {
        let count = draw(rng, LURKER_COUNT);
        cal.set(day, count);
    }
}

fn weekend(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    for day in 0..cal.days() {
        if cal.weekday_at(day) >= 5 {
            let count = draw(rng, WEEKEND_COUNT);
            cal.set(day, count);
        } else if rng.chance(WEEKEND_STRAY_WEEKDAY_CHANCE) {
            cal.set(day, 1);
        }
    }
}

fn weekday(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    for day in 0..cal.days() {
        if cal.weekday_at(day) < 5 {
            let count = draw(rng, WEEKDAY_COUNT);
            cal.set(day, count);
        }
    }
}

fn daily(_req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    for day in 0..cal.days() {
        if rng.chance(DAILY_ACTIVE_CHANCE) {
            let count = draw(rng, DAILY_COUNT);
            cal.set(day, count);
        }
    }
}

fn uniform_random(req: &CalendarRequest, cal: &mut CalendarBuilder, rng: &mut ActivityRng) {
    let days = cal.days();
    let (lo, hi) = uniform_action_bounds(req.monthly_min, req.monthly_max, days);
    let actions = rng.range_inclusive(lo, hi);
    for _ in 0..actions {
        let offset = rng.next_u64_below(u64::from(days)) as DayOffset;
        cal.increment(offset);
    }
}

/// Inclusive bounds on the total action count of a uniform-random
/// account: the monthly range scaled by `days / DAYS_PER_MONTH`, floored.
pub fn uniform_action_bounds(monthly_min: u32, monthly_max: u32, days: u32) -> (u32, u32) {
    let total_months = f64::from(days) / DAYS_PER_MONTH;
    let lo = (f64::from(monthly_min) * total_months).floor() as u32;
    let hi = (f64::from(monthly_max) * total_months).floor() as u32;
    (lo, hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pattern: PatternKind, days: u32) -> CalendarRequest {
        CalendarRequest {
            pattern,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            simulation_days: days,
            monthly_min: 10,
            monthly_max: 30,
        }
    }

    #[test]
    fn rule_table_matches_pattern_order() {
        // 2024-01-01 is a Monday, so a 7-day window is exactly one week.
        let mut rng = ActivityRng::from_seed(1);
        let cal = generate(&request(PatternKind::Weekday, 7), &mut rng);
        assert_eq!(cal.len(), 5);

        let mut rng = ActivityRng::from_seed(1);
        let cal = generate(&request(PatternKind::Weekend, 7), &mut rng);
        assert!(cal.get(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()).is_some());
        assert!(cal.get(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()).is_some());

        let mut rng = ActivityRng::from_seed(1);
        let cal = generate(&request(PatternKind::Weekly, 7), &mut rng);
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn builder_drops_zero_and_out_of_window_writes() {
        let mut b = CalendarBuilder::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 3);
        b.set(0, 0);
        b.set(3, 4);
        b.increment(10);
        b.set(2, 2);
        let cal = b.finish();
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.total(), 2);
    }

    #[test]
    fn uniform_bounds_scale_with_window() {
        assert_eq!(uniform_action_bounds(20, 20, 92), (60, 60));
        assert_eq!(uniform_action_bounds(50, 200, 0), (0, 0));
        let (lo, hi) = uniform_action_bounds(50, 200, 365);
        assert_eq!((lo, hi), (599, 2398));
    }

    #[test]
    fn lurker_on_single_day_window_is_minimal() {
        let mut rng = ActivityRng::from_seed(5);
        let cal = generate(&request(PatternKind::LurkerThenActive, 1), &mut rng);
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn zero_day_window_is_empty_for_every_pattern() {
        for p in PatternKind::ALL {
            let mut rng = ActivityRng::from_seed(9);
            assert!(generate(&request(p, 0), &mut rng).is_empty());
        }
    }
}
