//! General indirect tax (IGI)
//!
//! Category keyword selects the rate; tax = amount × rate and the gross is
//! quoted alongside the net.

use fiscal_core::money::{effective_rate, format_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, TaxAssessment};
use fiscal_knowledge::KnowledgeBase;

/// Indirect tax on a net amount under an optional category
pub fn indirect_tax(amount: f64, category: Option<&str>, kb: &KnowledgeBase) -> TaxAssessment {
    let rules = &kb.indirect;
    let (rate, category_label) = rules.rate_for(category);

    let amount = amount.max(0.0);
    let tax = round_currency(amount * rate);
    let gross = round_currency(amount + tax);

    TaxAssessment {
        kind: CalculationKind::IndirectTax,
        taxable_base: amount,
        tax,
        gross_total: Some(gross),
        effective_rate: effective_rate(tax, amount),
        regime: Some(category_label.to_string()),
        breakdown: vec![
            BreakdownLine::new("Net amount", amount),
            BreakdownLine::new(format!("IGI at {}%", format_rate(rate)), tax),
            BreakdownLine::new("Gross amount", gross),
        ],
    }
}
