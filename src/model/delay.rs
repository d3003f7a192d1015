//! Delay sources for arrival spacing and trim times.
//!
//! The actors never pick a distribution themselves; they hold a boxed
//! [`DelaySource`] and ask it for the next [`Duration`]. `Duration` cannot be
//! negative, so non-negativity holds by construction.
//!
//! - [`FixedDelay`] - the same value every time (zero delays in tests)
//! - [`UniformDelay`] - uniform over a [`DelayRange`], optionally seeded
//! - [`ScriptedDelay`] - a fixed sequence, for deterministic tests
//! - any `FnMut() -> Duration` closure

use crate::framework::SimulationError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Something that produces one non-negative duration per call.
pub trait DelaySource: Send + 'static {
    fn next_delay(&mut self) -> Duration;
}

impl<F> DelaySource for F
where
    F: FnMut() -> Duration + Send + 'static,
{
    fn next_delay(&mut self) -> Duration {
        self()
    }
}

/// An inclusive range of milliseconds.
///
/// Parses from `"MIN..MAX"` (e.g. `"1..3"`) or a single value (`"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, SimulationError> {
        let range = Self { min_ms, max_ms };
        range.validate()?;
        Ok(range)
    }

    pub fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.min_ms > self.max_ms {
            return Err(SimulationError::InvalidConfig(format!(
                "delay range {self} has min greater than max"
            )));
        }
        Ok(())
    }

    /// An unseeded uniform source over this range.
    pub fn source(self) -> UniformDelay {
        UniformDelay::new(self)
    }
}

impl Display for DelayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}ms", self.min_ms, self.max_ms)
    }
}

impl FromStr for DelayRange {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            let part = part.trim();
            part.parse::<u64>().map_err(|_| {
                SimulationError::InvalidConfig(format!(
                    "`{part}` is not a non-negative number of milliseconds"
                ))
            })
        };
        match s.split_once("..") {
            Some((min, max)) => Self::new(parse(min)?, parse(max)?),
            None => Ok(Self::fixed(parse(s)?)),
        }
    }
}

/// Always the same delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn zero() -> Self {
        Self(Duration::ZERO)
    }
}

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// Uniformly distributed delays, sampled at microsecond resolution.
#[derive(Debug)]
pub struct UniformDelay {
    min_us: u64,
    max_us: u64,
    rng: SmallRng,
}

impl UniformDelay {
    pub fn new(range: DelayRange) -> Self {
        Self::with_rng(range, SmallRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(range: DelayRange, seed: u64) -> Self {
        Self::with_rng(range, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(range: DelayRange, rng: SmallRng) -> Self {
        let min_us = range.min_ms.saturating_mul(1_000);
        let max_us = range.max_ms.saturating_mul(1_000).max(min_us);
        Self { min_us, max_us, rng }
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::from_micros(self.rng.gen_range(self.min_us..=self.max_us))
    }
}

/// Plays back a fixed list of delays, then repeats the last one forever.
///
/// An empty script yields zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDelay {
    script: VecDeque<Duration>,
    last: Duration,
}

impl ScriptedDelay {
    pub fn new(script: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: Duration::ZERO,
        }
    }

    pub fn millis(script: impl IntoIterator<Item = u64>) -> Self {
        Self::new(script.into_iter().map(Duration::from_millis))
    }
}

impl DelaySource for ScriptedDelay {
    fn next_delay(&mut self) -> Duration {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_ranges_and_single_values() {
        assert_eq!("1..3".parse::<DelayRange>().unwrap(), DelayRange { min_ms: 1, max_ms: 3 });
        assert_eq!(" 5 ".parse::<DelayRange>().unwrap(), DelayRange::fixed(5));
        assert_eq!("0..0".parse::<DelayRange>().unwrap(), DelayRange::fixed(0));
    }

    #[test]
    fn test_rejects_negative_and_inverted_ranges() {
        for bad in ["-1..3", "3..1", "abc", "1..", ""] {
            let err = bad.parse::<DelayRange>().unwrap_err();
            assert!(matches!(err, SimulationError::InvalidConfig(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_uniform_delay_stays_in_range() {
        let mut source = UniformDelay::seeded(DelayRange { min_ms: 1, max_ms: 7 }, 42);
        for _ in 0..1_000 {
            let delay = source.next_delay();
            assert!(delay >= Duration::from_millis(1) && delay <= Duration::from_millis(7));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let range = DelayRange { min_ms: 0, max_ms: 100 };
        let mut a = UniformDelay::seeded(range, 7);
        let mut b = UniformDelay::seeded(range, 7);
        let left: Vec<_> = (0..16).map(|_| a.next_delay()).collect();
        let right: Vec<_> = (0..16).map(|_| b.next_delay()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_script_repeats_its_last_value() {
        let mut source = ScriptedDelay::millis([3, 1]);
        let delays: Vec<_> = (0..4).map(|_| source.next_delay()).collect();
        assert_eq!(delays, [3, 1, 1, 1].map(Duration::from_millis));
        assert_eq!(ScriptedDelay::default().next_delay(), Duration::ZERO);
    }

    #[test]
    fn test_closures_are_delay_sources() {
        let mut calls = 0u64;
        let mut source = move || {
            calls += 1;
            Duration::from_millis(calls)
        };
        assert_eq!(DelaySource::next_delay(&mut source), Duration::from_millis(1));
        assert_eq!(DelaySource::next_delay(&mut source), Duration::from_millis(2));
    }
}
