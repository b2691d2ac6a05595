//! Inheritance and gift tax
//!
//! The relationship-dependent exemption comes off the transferred amount
//! first; the progressive schedule then accrues only on the portion above
//! each bracket floor.

use fiscal_core::money::{effective_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, Relationship, TaxAssessment};
use fiscal_knowledge::KnowledgeBase;

use crate::support::bracket_lines;

/// Inheritance/gift tax on a transferred amount for a kinship group
pub fn inheritance_tax(
    amount: f64,
    relationship: Relationship,
    kb: &KnowledgeBase,
) -> TaxAssessment {
    let rules = &kb.inheritance;
    let exemption = rules.exemption_for(relationship);

    let amount = amount.max(0.0);
    let taxable = (amount - exemption).max(0.0);
    let tax = round_currency(rules.schedule.tax_on(taxable));

    let mut breakdown = vec![
        BreakdownLine::new("Transferred amount", round_currency(amount)),
        BreakdownLine::new(
            format!("Exemption ({})", relationship.label()),
            -exemption,
        ),
        BreakdownLine::new("Taxable remainder", round_currency(taxable)),
    ];
    breakdown.extend(bracket_lines(&rules.schedule, taxable));

    TaxAssessment {
        kind: CalculationKind::InheritanceTax,
        taxable_base: taxable,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, taxable),
        regime: Some(format!("{} exemption", relationship.label())),
        breakdown,
    }
}
