//! Run parameters and process-wide generator settings.

use crate::{
    error::{SimError, SimResult, ValidationError},
    pattern::PatternWeights,
    types::Seed,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Per-run inputs supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub seed: Seed,
    pub monthly_min: u32,
    pub monthly_max: u32,
}

impl SimulationParameters {
    /// Parameters covering `days` days from `start_date`.
    /// Fails when the window runs past the last representable date.
    pub fn for_days(
        start_date: NaiveDate,
        days: u32,
        seed: Seed,
        monthly_min: u32,
        monthly_max: u32,
    ) -> SimResult<Self> {
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(ValidationError::WindowOutOfRange { start: start_date, days })?;
        Ok(Self {
            start_date,
            end_date,
            seed,
            monthly_min,
            monthly_max,
        })
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.end_date <= self.start_date {
            return Err(ValidationError::InvalidWindow {
                start: self.start_date,
                end: self.end_date,
            }
            .into());
        }
        if self.monthly_max < self.monthly_min {
            return Err(ValidationError::InvalidMonthlyRange {
                min: self.monthly_min,
                max: self.monthly_max,
            }
            .into());
        }
        Ok(())
    }

    /// Length of the half-open window. Zero when the window is inverted.
    pub fn simulation_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }
}

/// Static generator settings, loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub pattern_weights: PatternWeights,
    pub default_monthly_min: u32,
    pub default_monthly_max: u32,
    pub default_window_days: u32,
    pub default_seed: Seed,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pattern_weights:     PatternWeights::default(),
            default_monthly_min: 50,
            default_monthly_max: 200,
            default_window_days: 365,
            default_seed:        42,
        }
    }
}

impl SimConfig {
    /// Load settings from a JSON file. Omitted keys keep their defaults.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Other(anyhow::anyhow!("Cannot read {path}: {e}")))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("config: loaded {path}");
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.pattern_weights.validate()?;
        if self.default_monthly_max < self.default_monthly_min {
            return Err(ValidationError::InvalidMonthlyRange {
                min: self.default_monthly_min,
                max: self.default_monthly_max,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_on_or_before_start_is_rejected() {
        let p = SimulationParameters {
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 1),
            seed: 1,
            monthly_min: 0,
            monthly_max: 0,
        };
        assert!(p.validate().is_err());
        assert_eq!(p.simulation_days(), 0);
    }

    #[test]
    fn inverted_monthly_range_is_rejected() {
        let p = SimulationParameters::for_days(date(2024, 1, 1), 10, 1, 20, 10).unwrap();
        assert!(matches!(
            p.validate(),
            Err(SimError::Validation(ValidationError::InvalidMonthlyRange { min: 20, max: 10 }))
        ));
    }

    #[test]
    fn window_past_the_calendar_is_rejected_not_panicking() {
        let err = SimulationParameters::for_days(date(2024, 1, 1), 4_000_000_000, 1, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            SimError::Validation(ValidationError::WindowOutOfRange { days: 4_000_000_000, .. })
        ));
        let near_end = NaiveDate::MAX;
        assert!(SimulationParameters::for_days(near_end, 1, 1, 0, 0).is_err());
    }

    #[test]
    fn for_days_sets_an_exclusive_end() {
        let p = SimulationParameters::for_days(date(2024, 2, 27), 3, 1, 0, 0).unwrap();
        assert_eq!(p.end_date, date(2024, 3, 1));
        assert_eq!(p.simulation_days(), 3);
    }

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_reads_settings_from_file() {
        let file = write_config(r#"{ "default_seed": 9, "pattern_weights": { "daily": 0 } }"#);
        let cfg = SimConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.default_seed, 9);
        assert_eq!(cfg.pattern_weights.daily, 0);
        assert_eq!(cfg.pattern_weights.weekly, 25);
    }

    #[test]
    fn load_rejects_all_zero_weights() {
        let file = write_config(
            r#"{ "pattern_weights": { "bursty": 0, "weekly": 0, "monthly": 0,
                 "lurker_then_active": 0, "weekend": 0, "weekday": 0,
                 "uniform_random": 0, "daily": 0 } }"#,
        );
        let err = SimConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SimError::Validation(ValidationError::InvalidPatternWeights)));
    }

    #[test]
    fn load_reports_unreadable_and_malformed_files() {
        let missing = SimConfig::load("/nonexistent/activity-config.json").unwrap_err();
        assert!(matches!(missing, SimError::Other(_)));

        let file = write_config("{ not json");
        let malformed = SimConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(malformed, SimError::Serialization(_)));
    }

    #[test]
    fn partial_config_json_keeps_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{ "default_seed": 7 }"#).unwrap();
        assert_eq!(cfg.default_seed, 7);
        assert_eq!(cfg.default_monthly_min, 50);
        assert_eq!(cfg.pattern_weights, PatternWeights::default());
    }
}
