//! Shared search budget and termination tracking.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::SolverConfig;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Every candidate was examined; the result is exhaustive.
    Exhausted,
    /// `max_solutions` results were found.
    SolutionLimit,
    /// `max_evaluations` candidates were examined.
    EvaluationLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

impl Termination {
    /// Whether the search covered the whole space.
    pub fn is_complete(self) -> bool {
        self == Termination::Exhausted
    }

    fn code(self) -> u8 {
        match self {
            Termination::Exhausted => 0,
            Termination::SolutionLimit => 1,
            Termination::EvaluationLimit => 2,
            Termination::TimeLimit => 3,
            Termination::Cancelled => 4,
        }
    }

    fn from_code(code: u8) -> Self {
        match code {
            1 => Termination::SolutionLimit,
            2 => Termination::EvaluationLimit,
            3 => Termination::TimeLimit,
            4 => Termination::Cancelled,
            _ => Termination::Exhausted,
        }
    }
}

/// Limits and counters of one search, shareable across worker threads.
///
/// Workers call [`tick`](Budget::tick) before each candidate and
/// [`admit`](Budget::admit) for each result. The first limit hit is
/// latched and makes every later `tick` fail.
#[derive(Debug)]
pub struct Budget {
    max_evaluations: Option<u64>,
    deadline: Option<Instant>,
    max_solutions: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
    evaluated: AtomicU64,
    found: AtomicUsize,
    stop: AtomicU8,
}

impl Budget {
    pub fn new(config: &SolverConfig, cancel: Option<Arc<AtomicBool>>) -> Self {
        Self {
            max_evaluations: config.max_evaluations,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            max_solutions: config.max_solutions,
            cancel,
            evaluated: AtomicU64::new(0),
            found: AtomicUsize::new(0),
            stop: AtomicU8::new(Termination::Exhausted.code()),
        }
    }

    /// A budget without limits.
    pub fn unlimited() -> Self {
        Self::new(&SolverConfig::default(), None)
    }

    /// Claims one evaluation, or reports why the search must stop.
    pub fn tick(&self) -> Result<(), Termination> {
        if let Some(t) = self.stopped() {
            return Err(t);
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(self.halt(Termination::Cancelled));
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(self.halt(Termination::TimeLimit));
            }
        }
        let n = self.evaluated.fetch_add(1, Ordering::Relaxed);
        if self.max_evaluations.is_some_and(|max| n >= max) {
            self.evaluated.fetch_sub(1, Ordering::Relaxed);
            return Err(self.halt(Termination::EvaluationLimit));
        }
        Ok(())
    }

    /// Counts a found result; `false` when it falls beyond `max_solutions`
    /// and must be dropped.
    pub fn admit(&self) -> bool {
        let n = self.found.fetch_add(1, Ordering::Relaxed) + 1;
        match self.max_solutions {
            Some(max) if n > max => false,
            Some(max) if n == max => {
                self.halt(Termination::SolutionLimit);
                true
            }
            _ => true,
        }
    }

    /// The latched stop reason, if any.
    pub fn stopped(&self) -> Option<Termination> {
        match Termination::from_code(self.stop.load(Ordering::Acquire)) {
            Termination::Exhausted => None,
            t => Some(t),
        }
    }

    /// Final status: the stop reason, or [`Termination::Exhausted`].
    pub fn termination(&self) -> Termination {
        self.stopped().unwrap_or(Termination::Exhausted)
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated.load(Ordering::Relaxed)
    }

    /// First writer wins; returns the latched reason.
    fn halt(&self, reason: Termination) -> Termination {
        match self.stop.compare_exchange(
            Termination::Exhausted.code(),
            reason.code(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => reason,
            Err(current) => Termination::from_code(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_stops() {
        let b = Budget::unlimited();
        for _ in 0..1000 {
            assert!(b.tick().is_ok());
            assert!(b.admit());
        }
        assert_eq!(b.evaluated(), 1000);
        assert_eq!(b.termination(), Termination::Exhausted);
    }

    #[test]
    fn test_evaluation_limit() {
        let b = Budget::new(&SolverConfig::default().with_max_evaluations(3), None);
        assert!(b.tick().is_ok());
        assert!(b.tick().is_ok());
        assert!(b.tick().is_ok());
        assert_eq!(b.tick(), Err(Termination::EvaluationLimit));
        assert_eq!(b.evaluated(), 3);
        assert_eq!(b.termination(), Termination::EvaluationLimit);
    }

    #[test]
    fn test_solution_limit_latches() {
        let b = Budget::new(&SolverConfig::default().with_max_solutions(2), None);
        assert!(b.admit());
        assert!(b.stopped().is_none());
        assert!(b.admit());
        assert_eq!(b.stopped(), Some(Termination::SolutionLimit));
        assert!(!b.admit());
        assert_eq!(b.tick(), Err(Termination::SolutionLimit));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let b = Budget::new(&SolverConfig::default(), Some(flag.clone()));
        assert!(b.tick().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert_eq!(b.tick(), Err(Termination::Cancelled));
        // the first reason sticks
        flag.store(false, Ordering::Relaxed);
        assert_eq!(b.tick(), Err(Termination::Cancelled));
    }

    #[test]
    fn test_time_limit() {
        let b = Budget::new(&SolverConfig::default().with_time_limit_ms(0), None);
        assert_eq!(b.tick(), Err(Termination::TimeLimit));
        assert!(!b.termination().is_complete());
    }
}
