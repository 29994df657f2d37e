//! Ordered consumption simulation.
//!
//! # Algorithm
//!
//! 1. Give every member a remaining counter equal to its provided value
//! 2. Visit members by descending provided value (ties by name)
//! 3. Producers are skipped; a consumer ranks its live sources (links in
//!    the subset with remaining > 0) by remaining value, highest first,
//!    breaking ties per [`TieBreak`]
//! 4. The consumer eats per [`FeedingRule`]; a need left uncovered stops
//!    the run with [`Verdict::Starved`]
//! 5. After all consumers ate, members held to the [`SurvivalRule`] that
//!    sit at or below zero make the run [`Verdict::Depleted`]

use std::collections::{BTreeMap, HashMap};

use super::config::{FeedingRule, SimulationConfig, SurvivalRule, TieBreak};
use super::types::{FeedEvent, SimulationOutcome, Verdict};
use crate::error::SelectError;
use crate::model::Entity;

/// Runs the feeding process over a candidate subset.
///
/// The run is a pure function of the member set and the configuration:
/// the input order of `members` does not matter and repeating a run gives
/// the same outcome.
///
/// # Examples
///
/// ```
/// use u_select::model::{Entity, Role};
/// use u_select::simulate::{ConsumptionSimulator, SimulationConfig};
///
/// let a = Entity::new("A").with_role(Role::Producer).with_attribute("provided", 10.0);
/// let b = Entity::new("B")
///     .with_attribute("provided", 0.0)
///     .with_attribute("needed", 8.0)
///     .with_link("A");
///
/// let config = SimulationConfig::default();
/// let outcome = ConsumptionSimulator::new(&config).run("habitat", &[&a, &b]).unwrap();
/// assert!(outcome.is_success());
/// assert_eq!(outcome.remaining["A"], 2.0);
/// ```
pub struct ConsumptionSimulator<'c> {
    config: &'c SimulationConfig,
}

/// Per-run state, rebuilt for every candidate.
struct Run<'m> {
    members: &'m [&'m Entity],
    slot: HashMap<&'m str, usize>,
    remaining: Vec<f64>,
    eaten: Vec<bool>,
    events: Vec<FeedEvent>,
}

impl<'c> ConsumptionSimulator<'c> {
    pub fn new(config: &'c SimulationConfig) -> Self {
        Self { config }
    }

    /// Simulates feeding for `members`, the candidate of group `group`.
    ///
    /// Fails only with [`SelectError::Ambiguity`] under [`TieBreak::Reject`].
    pub fn run(&self, group: &str, members: &[&Entity]) -> Result<SimulationOutcome, SelectError> {
        let provided: Vec<f64> = members
            .iter()
            .map(|e| e.scalar(&self.config.provided_attribute).unwrap_or(0.0))
            .collect();
        let mut run = Run {
            members,
            slot: members
                .iter()
                .enumerate()
                .map(|(i, e)| (e.name.as_str(), i))
                .collect(),
            remaining: provided.clone(),
            eaten: vec![false; members.len()],
            events: Vec::new(),
        };

        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| {
            provided[b]
                .total_cmp(&provided[a])
                .then_with(|| members[a].name.cmp(&members[b].name))
        });

        for i in order {
            let eater = members[i];
            if eater.is_producer() {
                continue;
            }
            let need = eater.scalar(&self.config.needed_attribute).unwrap_or(0.0);
            let sources = self.rank_sources(group, eater, &run)?;

            let shortfall = match self.config.feeding {
                FeedingRule::SingleSource => match sources.first() {
                    Some(&s) if run.remaining[s] >= need => {
                        run.eat(eater, s, need);
                        None
                    }
                    Some(&s) => Some(need - run.remaining[s]),
                    None => Some(need),
                },
                FeedingRule::Split if sources.is_empty() => Some(need),
                FeedingRule::Split => {
                    let mut left = need;
                    for s in sources {
                        if left <= 0.0 {
                            break;
                        }
                        let amount = left.min(run.remaining[s]);
                        run.eat(eater, s, amount);
                        left -= amount;
                    }
                    (left > 0.0).then_some(left)
                }
            };

            if let Some(shortfall) = shortfall {
                let verdict = Verdict::Starved {
                    consumer: eater.name.clone(),
                    shortfall,
                };
                return Ok(run.finish(verdict));
            }
        }

        let mut depleted: Vec<String> = (0..members.len())
            .filter(|&i| run.remaining[i] <= 0.0)
            .filter(|&i| match self.config.survival {
                SurvivalRule::AllMembers => true,
                SurvivalRule::Suppliers => members[i].is_producer() || run.eaten[i],
            })
            .map(|i| members[i].name.clone())
            .collect();
        depleted.sort();
        let verdict = if depleted.is_empty() {
            Verdict::Survived
        } else {
            Verdict::Depleted { entities: depleted }
        };
        Ok(run.finish(verdict))
    }

    /// Live sources of `eater`, best first.
    fn rank_sources(&self, group: &str, eater: &Entity, run: &Run<'_>) -> Result<Vec<usize>, SelectError> {
        let remaining = &run.remaining;
        let mut live: Vec<usize> = Vec::with_capacity(eater.links.len());
        for link in &eater.links {
            if let Some(&s) = run.slot.get(link.as_str()) {
                if remaining[s] > 0.0 && !live.contains(&s) {
                    live.push(s);
                }
            }
        }

        // stable, so equal values keep link order
        live.sort_by(|&a, &b| remaining[b].total_cmp(&remaining[a]));

        match self.config.tie_break {
            TieBreak::LinkOrder => {}
            TieBreak::ByName => live.sort_by(|&a, &b| {
                remaining[b]
                    .total_cmp(&remaining[a])
                    .then_with(|| run.members[a].name.cmp(&run.members[b].name))
            }),
            TieBreak::Reject => {
                // a single source only ever comes from the top rank
                let scope = match self.config.feeding {
                    FeedingRule::SingleSource => live.len().min(2),
                    FeedingRule::Split => live.len(),
                };
                if let Some(w) = live[..scope]
                    .windows(2)
                    .find(|w| remaining[w[0]] == remaining[w[1]])
                {
                    let tied = remaining[w[0]];
                    return Err(SelectError::Ambiguity {
                        group: group.to_string(),
                        consumer: eater.name.clone(),
                        candidates: live
                            .iter()
                            .filter(|&&s| remaining[s] == tied)
                            .map(|&s| run.members[s].name.clone())
                            .collect(),
                    });
                }
            }
        }
        Ok(live)
    }
}

impl Run<'_> {
    fn eat(&mut self, eater: &Entity, source: usize, amount: f64) {
        self.events.push(FeedEvent {
            eater: eater.name.clone(),
            source: self.members[source].name.clone(),
            amount,
            before: self.remaining[source],
        });
        self.remaining[source] -= amount;
        self.eaten[source] = true;
    }

    fn finish(self, verdict: Verdict) -> SimulationOutcome {
        SimulationOutcome {
            verdict,
            events: self.events,
            remaining: self
                .members
                .iter()
                .zip(self.remaining)
                .map(|(e, r)| (e.name.clone(), r))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}
