//! Deterministic tax calculators
//!
//! Every calculator is a pure function from numeric inputs, an optional
//! regime/category selector and the knowledge base to a
//! [`fiscal_core::TaxAssessment`]. Identical inputs against an unchanged
//! knowledge base always produce identical output; nothing here touches the
//! network, the disk or the clock.
//!
//! Amount-to-role binding (largest amount = sale price and the like) is
//! deliberately quarantined in [`binding`]: calculators take already-bound
//! inputs, so a future extraction scheme with explicit field tagging can
//! replace the positional heuristics without touching calculator logic.

use thiserror::Error;

pub mod binding;
pub mod corporate;
pub mod gains;
pub mod income;
pub mod indirect;
pub mod inheritance;
pub mod withholding;

pub use binding::PropertyGainInputs;

/// Why a computation intent could not be satisfied. Never surfaces to the
/// caller: the engine falls through to a less specific response branch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("no amount found for {0}")]
    MissingAmount(&'static str),
    #[error("a capital-gain computation needs both sale and purchase amounts")]
    MissingGainAmounts,
    #[error("no holding period stated for the real-property gain")]
    MissingHoldingPeriod,
}

pub(crate) mod support {
    use fiscal_core::money::{format_amount, format_rate, round_currency};
    use fiscal_core::BreakdownLine;
    use fiscal_knowledge::RateSchedule;

    /// One breakdown line per bracket the base reaches
    pub(crate) fn bracket_lines(schedule: &RateSchedule, base: f64) -> Vec<BreakdownLine> {
        schedule
            .brackets()
            .iter()
            .take_while(|b| b.low < base)
            .map(|b| {
                let slice = (base.min(b.high) - b.low) * b.rate;
                let label = if b.high.is_infinite() {
                    format!(
                        "Above {} at {}%",
                        format_amount(b.low),
                        format_rate(b.rate)
                    )
                } else {
                    format!(
                        "{} – {} at {}%",
                        format_amount(b.low),
                        format_amount(b.high),
                        format_rate(b.rate)
                    )
                };
                BreakdownLine::new(label, round_currency(slice))
            })
            .collect()
    }
}
