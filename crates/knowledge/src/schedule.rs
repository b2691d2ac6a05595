//! Progressive rate schedules
//!
//! A schedule is an ordered list of brackets that must be ascending,
//! non-overlapping, gapless and cover `[0, ∞)`. Tax accrues marginally: each
//! bracket taxes only the slice of the base that falls inside it, so the
//! total is continuous at every bracket boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `(threshold_low, threshold_high, rate)` slice of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub low: f64,
    /// `f64::INFINITY` on the top bracket
    pub high: f64,
    /// Marginal rate applied inside the bracket, as a fraction
    pub rate: f64,
}

impl Bracket {
    pub const fn new(low: f64, high: f64, rate: f64) -> Self {
        Self { low, high, rate }
    }
}

/// Violations of the schedule invariant
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("schedule has no brackets")]
    Empty,
    #[error("first bracket must start at 0, starts at {0}")]
    BadOrigin(f64),
    #[error("bracket {index} leaves a gap or overlaps: ends at {high}, next starts at {next_low}")]
    Discontinuous {
        index: usize,
        high: f64,
        next_low: f64,
    },
    #[error("top bracket must be unbounded")]
    BoundedTop,
    #[error("bracket {index} has an invalid rate {rate}")]
    BadRate { index: usize, rate: f64 },
}

/// Ordered, validated bracket table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    brackets: Vec<Bracket>,
}

impl RateSchedule {
    /// Build a schedule, rejecting tables that violate the invariant
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, ScheduleError> {
        let Some(first) = brackets.first() else {
            return Err(ScheduleError::Empty);
        };
        if first.low != 0.0 {
            return Err(ScheduleError::BadOrigin(first.low));
        }
        for (index, pair) in brackets.windows(2).enumerate() {
            if pair[0].high != pair[1].low {
                return Err(ScheduleError::Discontinuous {
                    index,
                    high: pair[0].high,
                    next_low: pair[1].low,
                });
            }
        }
        if brackets.last().map(|b| b.high) != Some(f64::INFINITY) {
            return Err(ScheduleError::BoundedTop);
        }
        for (index, bracket) in brackets.iter().enumerate() {
            if !(bracket.rate.is_finite() && bracket.rate >= 0.0) {
                return Err(ScheduleError::BadRate {
                    index,
                    rate: bracket.rate,
                });
            }
        }
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Marginal tax on `base`: each bracket reached contributes
    /// `(min(base, high) − low) × rate`.
    pub fn tax_on(&self, base: f64) -> f64 {
        if base <= 0.0 {
            return 0.0;
        }
        self.brackets
            .iter()
            .take_while(|b| b.low < base)
            .map(|b| (base.min(b.high) - b.low) * b.rate)
            .sum()
    }

    /// Rate of the bracket the top of `base` falls into
    pub fn marginal_rate(&self, base: f64) -> f64 {
        self.brackets
            .iter()
            .find(|b| base >= b.low && base < b.high)
            .map(|b| b.rate)
            .unwrap_or(0.0)
    }
}
