//! The fixed set of temporal activity patterns and their assignment weights.

use crate::{
    error::{SimResult, ValidationError},
    rng::ActivityRng,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A named rule governing which days an account is active.
/// Variants are indexed into the generator table in `calendar.rs`;
/// NEVER reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Bursty,
    Weekly,
    Monthly,
    #[serde(alias = "lurker_active")]
    LurkerThenActive,
    Weekend,
    Weekday,
    #[serde(alias = "random")]
    UniformRandom,
    Daily,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Bursty,
        PatternKind::Weekly,
        PatternKind::Monthly,
        PatternKind::LurkerThenActive,
        PatternKind::Weekend,
        PatternKind::Weekday,
        PatternKind::UniformRandom,
        PatternKind::Daily,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bursty           => "bursty",
            Self::Weekly           => "weekly",
            Self::Monthly          => "monthly",
            Self::LurkerThenActive => "lurker_then_active",
            Self::Weekend          => "weekend",
            Self::Weekday          => "weekday",
            Self::UniformRandom    => "uniform_random",
            Self::Daily            => "daily",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "lurker_active" => return Ok(Self::LurkerThenActive),
            "random"        => return Ok(Self::UniformRandom),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label() == normalized)
            .ok_or_else(|| format!("unknown pattern '{s}'"))
    }
}

/// Relative weights used when assigning a pattern to a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    pub bursty: u32,
    pub weekly: u32,
    pub monthly: u32,
    pub lurker_then_active: u32,
    pub weekend: u32,
    pub weekday: u32,
    pub uniform_random: u32,
    pub daily: u32,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            bursty:             20,
            weekly:             25,
            monthly:            10,
            lurker_then_active: 10,
            weekend:            10,
            weekday:            10,
            uniform_random:     10,
            daily:              15,
        }
    }
}

impl PatternWeights {
    /// Weights in `PatternKind::ALL` order.
    pub fn as_array(&self) -> [u32; 8] {
        [
            self.bursty,
            self.weekly,
            self.monthly,
            self.lurker_then_active,
            self.weekend,
            self.weekday,
            self.uniform_random,
            self.daily,
        ]
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.as_array().iter().all(|&w| w == 0) {
            return Err(ValidationError::InvalidPatternWeights.into());
        }
        Ok(())
    }

    /// Weighted draw over the fixed pattern set.
    pub fn choose(&self, rng: &mut ActivityRng) -> SimResult<PatternKind> {
        rng.pick_weighted(&self.as_array())
            .map(|idx| PatternKind::ALL[idx])
            .ok_or_else(|| ValidationError::InvalidPatternWeights.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for p in PatternKind::ALL {
            assert_eq!(p.label().parse::<PatternKind>().unwrap(), p);
        }
    }

    #[test]
    fn legacy_labels_are_accepted() {
        assert_eq!("lurker_active".parse::<PatternKind>().unwrap(), PatternKind::LurkerThenActive);
        assert_eq!("random".parse::<PatternKind>().unwrap(), PatternKind::UniformRandom);
        assert!("hourly".parse::<PatternKind>().is_err());
    }

    #[test]
    fn serializes_as_snake_case_label() {
        let json = serde_json::to_string(&PatternKind::LurkerThenActive).unwrap();
        assert_eq!(json, "\"lurker_then_active\"");
    }

    #[test]
    fn single_nonzero_weight_always_wins() {
        let weights = PatternWeights {
            bursty: 0, weekly: 0, monthly: 0, lurker_then_active: 0,
            weekend: 0, weekday: 5, uniform_random: 0, daily: 0,
        };
        let mut rng = ActivityRng::from_seed(3);
        for _ in 0..50 {
            assert_eq!(weights.choose(&mut rng).unwrap(), PatternKind::Weekday);
        }
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let weights = PatternWeights {
            bursty: 0, weekly: 0, monthly: 0, lurker_then_active: 0,
            weekend: 0, weekday: 0, uniform_random: 0, daily: 0,
        };
        assert!(weights.validate().is_err());
    }
}
