//! The run driver.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Validate parameters and the account list.
//!   2. Seed a fresh RngBank from the run's seed.
//!   3. Generate one calendar per account, in id order.
//!   4. Expand calendars into one time-ordered event sequence.
//!
//! RULES:
//!   - The engine holds no state between runs.
//!   - All randomness flows through the RngBank.
//!   - Validation failures abort before any generation; no partial output.

use crate::{
    calendar::{self, CalendarRequest, DayCalendar},
    config::{SimConfig, SimulationParameters},
    error::{SimResult, ValidationError},
    event::{self, ActivityEvent},
    registry::{Account, AccountRegistry},
    rng::{RngBank, StreamSlot},
    types::Seed,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRun {
    pub seed: Seed,
    pub start_date: NaiveDate,
    pub simulation_days: u32,
    pub calendars: Vec<(Account, DayCalendar)>,
    pub events: Vec<ActivityEvent>,
}

impl SimRun {
    pub fn total_events(&self) -> usize {
        self.events.len()
    }
}

pub struct SimEngine {
    pub config: SimConfig,
}

impl SimEngine {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// An empty registry wired to this engine's pattern weights.
    pub fn new_registry(&self, seed: Seed) -> SimResult<AccountRegistry> {
        AccountRegistry::new(seed, self.config.pattern_weights.clone())
    }

    /// One complete run over `registry`'s accounts.
    pub fn run(
        &self,
        registry: &AccountRegistry,
        params: &SimulationParameters,
    ) -> SimResult<SimRun> {
        self.run_accounts(registry.accounts(), params)
    }

    /// Same as `run` for a borrowed account slice.
    pub fn run_accounts(
        &self,
        accounts: &[Account],
        params: &SimulationParameters,
    ) -> SimResult<SimRun> {
        params.validate()?;
        if accounts.is_empty() {
            return Err(ValidationError::EmptyAccountList.into());
        }

        let simulation_days = params.simulation_days();
        let bank = RngBank::new(params.seed);
        log::info!(
            "run: seed={} start={} days={} accounts={}",
            params.seed,
            params.start_date,
            simulation_days,
            accounts.len()
        );

        let calendars: Vec<(Account, DayCalendar)> = accounts
            .iter()
            .map(|account| {
                let request = CalendarRequest {
                    pattern: account.pattern,
                    start_date: params.start_date,
                    simulation_days,
                    monthly_min: params.monthly_min,
                    monthly_max: params.monthly_max,
                };
                let mut rng = bank.for_account(StreamSlot::Calendar, account.id);
                let cal = calendar::generate(&request, &mut rng);
                log::debug!(
                    "run: account={} pattern={} active_days={} actions={}",
                    account.id,
                    account.pattern,
                    cal.len(),
                    cal.total()
                );
                (account.clone(), cal)
            })
            .collect();

        let events = event::expand(&calendars, &bank);
        if events.is_empty() {
            log::warn!("run: no activity generated over {simulation_days} days");
        }
        log::info!("run: generated {} events", events.len());

        Ok(SimRun {
            seed: params.seed,
            start_date: params.start_date,
            simulation_days,
            calendars,
            events,
        })
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
