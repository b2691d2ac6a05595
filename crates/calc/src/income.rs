//! Personal income tax
//!
//! Residents: taxable base = gross − standard deduction, then the marginal
//! bracket schedule. Non-residents bypass the progressive path entirely and
//! pay the flat statutory rate on the gross amount. The aggregate path sums
//! several amounts into one base and routes it through the same schedule,
//! keeping one breakdown line per original amount.

use fiscal_core::money::{effective_rate, format_amount, format_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, Residency, TaxAssessment};
use fiscal_knowledge::KnowledgeBase;

use crate::support::bracket_lines;

/// Progressive income tax on a single gross amount
pub fn progressive_income_tax(
    gross: f64,
    residency: Residency,
    kb: &KnowledgeBase,
) -> TaxAssessment {
    let rules = &kb.income;

    if residency == Residency::NonResident {
        // Flat special case: no deduction, no brackets
        let tax = round_currency(gross * rules.non_resident_flat_rate);
        return TaxAssessment {
            kind: CalculationKind::IncomeTax,
            taxable_base: gross,
            tax,
            gross_total: None,
            effective_rate: effective_rate(tax, gross),
            regime: Some("non-resident flat rate".to_string()),
            breakdown: vec![
                BreakdownLine::new("Gross income", round_currency(gross)),
                BreakdownLine::new(
                    format!(
                        "Flat rate {}%",
                        format_rate(rules.non_resident_flat_rate)
                    ),
                    tax,
                ),
            ],
        };
    }

    let taxable = (gross - rules.standard_deduction).max(0.0);
    let tax = round_currency(rules.schedule.tax_on(taxable));

    let mut breakdown = vec![
        BreakdownLine::new("Gross income", round_currency(gross)),
        BreakdownLine::new("Standard deduction", -rules.standard_deduction),
        BreakdownLine::new("Taxable base", round_currency(taxable)),
    ];
    breakdown.extend(bracket_lines(&rules.schedule, taxable));

    TaxAssessment {
        kind: CalculationKind::IncomeTax,
        taxable_base: taxable,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, taxable),
        regime: None,
        breakdown,
    }
}

/// Aggregate path: several extracted amounts summed into one taxable base
pub fn aggregate_income_tax(
    amounts: &[f64],
    residency: Residency,
    kb: &KnowledgeBase,
) -> TaxAssessment {
    let total: f64 = amounts.iter().sum();
    let mut assessment = progressive_income_tax(total, residency, kb);
    assessment.kind = CalculationKind::AggregateIncomeTax;

    let component_lines: Vec<BreakdownLine> = amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            BreakdownLine::new(
                format!("Income component {} ({})", i + 1, format_amount(*amount)),
                round_currency(*amount),
            )
        })
        .collect();
    // Components lead the breakdown, ahead of the schedule lines
    let mut breakdown = component_lines;
    breakdown.extend(assessment.breakdown);
    assessment.breakdown = breakdown;
    assessment
}
