//! Ordered consumption simulation.
//!
//! Confirms that every consumer of a candidate subset can be fed from the
//! members it depends on without eating a supplier down to nothing.
//! Unlike the filters this check is stateful and order-sensitive; the state
//! lives in a per-run map and never touches the pool.
//!
//! # Key Types
//!
//! - [`SimulationConfig`]: attribute names, [`FeedingRule`], [`TieBreak`],
//!   [`SurvivalRule`]
//! - [`ConsumptionSimulator`]: runs one candidate
//! - [`SimulationOutcome`]: [`Verdict`], the [`FeedEvent`] log and the
//!   remaining values

mod config;
mod runner;
mod types;

pub use config::{FeedingRule, SimulationConfig, SurvivalRule, TieBreak};
pub use runner::ConsumptionSimulator;
pub use types::{FeedEvent, SimulationOutcome, Verdict};
