//! Synthetic account-activity generation.
//!
//! Accounts are assigned one of a fixed set of temporal patterns; a run
//! turns (accounts, parameters) into a time-ordered event sequence,
//! reproducibly for a given seed.

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod handle_generator;
pub mod pattern;
pub mod registry;
pub mod rng;
pub mod summary;
pub mod types;
