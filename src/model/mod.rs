//! Problem model: pool entities, group requirements and solver outputs.
//!
//! # Key Components
//!
//! - **Entities**: [`Entity`] with numeric [`Attribute`]s, traits and
//!   dependency links, collected in a validated [`Pool`]
//! - **Groups**: [`GroupRequirement`] with its [`Axis`] targets and
//!   [`Strategy`]
//! - **Outputs**: [`Selection`] for one group, [`Assignment`] across groups
//!
//! Inputs are read-only once built; solvers derive their per-run state
//! separately and never write it back.

mod entity;
mod group;
mod selection;

pub use entity::{Attribute, Entity, Pool, Range, Role};
pub use group::{Axis, GroupRequirement, Strategy};
pub use selection::{Assignment, AxisReading, Selection};
