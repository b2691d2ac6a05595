//! Non-resident withholding
//!
//! Flat statutory rate unless a bilateral treaty override exists for the
//! stated country and income type, in which case the treaty rate supersedes
//! the flat one.

use fiscal_core::money::{effective_rate, format_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, TaxAssessment, WithholdingIncome};
use fiscal_knowledge::KnowledgeBase;

/// Withholding on income paid to a non-resident
pub fn withholding_tax(
    amount: f64,
    country: Option<&str>,
    income: WithholdingIncome,
    kb: &KnowledgeBase,
) -> TaxAssessment {
    let rules = &kb.withholding;

    let (rate, regime) = match country.and_then(|c| rules.treaty_rate(c, income)) {
        Some((treaty_rate, treaty)) => {
            tracing::debug!(
                country = treaty.country,
                rate = treaty_rate,
                "treaty rate supersedes the statutory flat rate"
            );
            (
                treaty_rate,
                format!("{} treaty rate ({})", treaty.display_name, income.label()),
            )
        }
        None => (rules.flat_rate, "statutory flat rate".to_string()),
    };

    let amount = amount.max(0.0);
    let tax = round_currency(amount * rate);

    TaxAssessment {
        kind: CalculationKind::Withholding,
        taxable_base: amount,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, amount),
        regime: Some(regime),
        breakdown: vec![
            BreakdownLine::new("Income paid", round_currency(amount)),
            BreakdownLine::new(format!("Withholding at {}%", format_rate(rate)), tax),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treaty_overrides_flat_rate() {
        let kb = KnowledgeBase::shared();
        let assessment =
            withholding_tax(10_000.0, Some("spain"), WithholdingIncome::Dividend, kb);
        // Treaty dividend rate (5%), not the 10% statutory flat rate
        assert_eq!(assessment.tax, 500.0);
        assert_eq!(assessment.effective_rate, "5.00");
        assert!(assessment.regime.as_deref().unwrap().contains("Spain"));
    }

    #[test]
    fn test_unknown_country_uses_flat_rate() {
        let kb = KnowledgeBase::shared();
        let assessment = withholding_tax(10_000.0, None, WithholdingIncome::Dividend, kb);
        assert_eq!(assessment.tax, 1_000.0);
        assert_eq!(
            assessment.regime.as_deref(),
            Some("statutory flat rate")
        );
    }

    #[test]
    fn test_other_income_ignores_treaty_table() {
        let kb = KnowledgeBase::shared();
        let assessment =
            withholding_tax(10_000.0, Some("spain"), WithholdingIncome::Other, kb);
        assert_eq!(assessment.tax, 1_000.0);
    }
}
