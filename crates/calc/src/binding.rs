//! Amount-to-role binding strategies
//!
//! Extraction tags amounts by textual position only, so each calculator has
//! a named strategy here that decides which amount plays which role. The
//! heuristics are documented per function; they are kept for compatibility
//! with observed behaviour and are the single place to replace once
//! extraction can tag fields explicitly.

use fiscal_core::{QueryFacts, Relationship, WithholdingIncome};

use crate::CalcError;

/// Bound inputs for the real-property gain calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyGainInputs {
    pub sale_price: f64,
    pub purchase_price: f64,
    pub holding_years: u32,
}

/// Income tax binds the first amount mentioned as gross income
pub fn bind_income(facts: &QueryFacts) -> Result<f64, CalcError> {
    facts
        .entities
        .first_amount()
        .ok_or(CalcError::MissingAmount("an income tax computation"))
}

/// The aggregate path consumes every extracted amount as one taxable base
pub fn bind_aggregate(facts: &QueryFacts) -> Result<Vec<f64>, CalcError> {
    if facts.entities.amounts.is_empty() {
        return Err(CalcError::MissingAmount("an aggregate income computation"));
    }
    Ok(facts.entities.amounts.clone())
}

/// Corporate tax binds the first amount as annual profit
pub fn bind_corporate(facts: &QueryFacts) -> Result<(f64, Option<&str>), CalcError> {
    let profit = facts
        .entities
        .first_amount()
        .ok_or(CalcError::MissingAmount("a corporate tax computation"))?;
    Ok((profit, facts.regime.as_deref()))
}

/// Indirect tax binds the first amount as the net (pre-tax) amount
pub fn bind_indirect(facts: &QueryFacts) -> Result<(f64, Option<&str>), CalcError> {
    let amount = facts
        .entities
        .first_amount()
        .ok_or(CalcError::MissingAmount("an indirect tax computation"))?;
    Ok((amount, facts.category.as_deref()))
}

/// Real-property gains bind the largest amount as the sale price and the
/// smallest as the purchase price; the holding period must be stated.
pub fn bind_property_gain(facts: &QueryFacts) -> Result<PropertyGainInputs, CalcError> {
    if facts.entities.amounts.len() < 2 {
        return Err(CalcError::MissingGainAmounts);
    }
    let sale_price = facts.entities.largest_amount().unwrap_or_default();
    let purchase_price = facts.entities.smallest_amount().unwrap_or_default();
    let holding_years = facts
        .holding_years
        .ok_or(CalcError::MissingHoldingPeriod)?;
    Ok(PropertyGainInputs {
        sale_price,
        purchase_price,
        holding_years,
    })
}

/// Movable-property gains: with two or more amounts the gain is largest
/// minus smallest; a single amount is read as the gain itself.
pub fn bind_savings_gain(facts: &QueryFacts) -> Result<f64, CalcError> {
    match facts.entities.amounts.len() {
        0 => Err(CalcError::MissingAmount("a capital-gain computation")),
        1 => Ok(facts.entities.amounts[0]),
        _ => {
            let largest = facts.entities.largest_amount().unwrap_or_default();
            let smallest = facts.entities.smallest_amount().unwrap_or_default();
            Ok(largest - smallest)
        }
    }
}

/// Inheritance binds the first amount as the transferred value; an
/// unrecognised kinship falls into the residual exemption group.
pub fn bind_inheritance(facts: &QueryFacts) -> Result<(f64, Relationship), CalcError> {
    let amount = facts
        .entities
        .first_amount()
        .ok_or(CalcError::MissingAmount("an inheritance tax computation"))?;
    Ok((amount, facts.relationship.unwrap_or_default()))
}

/// Withholding binds the first amount as the income paid out
pub fn bind_withholding(
    facts: &QueryFacts,
) -> Result<(f64, Option<&str>, WithholdingIncome), CalcError> {
    let amount = facts
        .entities
        .first_amount()
        .ok_or(CalcError::MissingAmount("a withholding computation"))?;
    Ok((amount, facts.country.as_deref(), facts.withholding_income()))
}
