//! Capital gains
//!
//! Real property: the rate is a non-increasing step function of the holding
//! period, reaching zero at the exemption year. Movable property: a flat
//! rate on the gain above the fixed personal exemption.

use fiscal_core::money::{effective_rate, format_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, TaxAssessment};
use fiscal_knowledge::KnowledgeBase;

use crate::PropertyGainInputs;

/// Real-property capital gain
pub fn property_gain(inputs: PropertyGainInputs, kb: &KnowledgeBase) -> TaxAssessment {
    let rules = &kb.property_gains;
    let gain = (inputs.sale_price - inputs.purchase_price).max(0.0);
    let rate = rules.rate_for_years(inputs.holding_years);
    let tax = round_currency(gain * rate);

    let regime = if rate == 0.0 {
        format!(
            "exempt after {} full years of holding",
            rules.zero_year
        )
    } else {
        format!("held {} full years", inputs.holding_years)
    };

    TaxAssessment {
        kind: CalculationKind::PropertyGain,
        taxable_base: gain,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, gain),
        regime: Some(regime),
        breakdown: vec![
            BreakdownLine::new("Sale price", round_currency(inputs.sale_price)),
            BreakdownLine::new("Purchase price", round_currency(inputs.purchase_price)),
            BreakdownLine::new("Taxable gain", round_currency(gain)),
            BreakdownLine::new(format!("Tax at {}%", format_rate(rate)), tax),
        ],
    }
}

/// Movable-property (savings) capital gain
pub fn savings_gain(gain: f64, kb: &KnowledgeBase) -> TaxAssessment {
    let rules = &kb.savings_gains;
    let gain = gain.max(0.0);
    let taxable = (gain - rules.exemption).max(0.0);
    let tax = round_currency(taxable * rules.rate);

    TaxAssessment {
        kind: CalculationKind::SavingsGain,
        taxable_base: taxable,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, taxable),
        regime: Some(format!(
            "flat {}% above a {} exemption",
            format_rate(rules.rate),
            fiscal_core::money::format_amount(rules.exemption)
        )),
        breakdown: vec![
            BreakdownLine::new("Gross gain", round_currency(gain)),
            BreakdownLine::new("Personal exemption", -rules.exemption),
            BreakdownLine::new("Taxable gain", round_currency(taxable)),
            BreakdownLine::new(format!("Tax at {}%", format_rate(rules.rate)), tax),
        ],
    }
}
