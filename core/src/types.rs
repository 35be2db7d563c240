//! Shared primitive types used across the entire generator.

/// A stable account identifier. Assigned from 0 in load order.
pub type AccountId = u64;

/// A 0-indexed day offset from the start of the simulation window.
pub type DayOffset = u32;

/// The master seed for a run.
pub type Seed = u64;

/// Number of activities (posts/comments) on one day.
pub type ActivityCount = u32;
