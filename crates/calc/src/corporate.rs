//! Corporate tax
//!
//! The rate comes from the named regime (general, patent box, holding). Once
//! profit exceeds the reporting threshold the statutory minimum applies and
//! the final liability is `max(profit × rate, minimum)`.

use fiscal_core::money::{effective_rate, format_rate, round_currency};
use fiscal_core::{BreakdownLine, CalculationKind, TaxAssessment};
use fiscal_knowledge::KnowledgeBase;

/// Corporate tax on annual profit under an optional special regime
pub fn corporate_tax(profit: f64, regime: Option<&str>, kb: &KnowledgeBase) -> TaxAssessment {
    let rules = &kb.corporate;
    let (rate, regime_label) = rules.rate_for(regime);

    let profit = profit.max(0.0);
    let rate_tax = round_currency(profit * rate);
    let minimum_applies = profit > rules.reporting_threshold;
    let tax = if minimum_applies {
        if rules.minimum_tax > rate_tax {
            tracing::debug!(
                profit,
                minimum = rules.minimum_tax,
                "statutory minimum exceeds the regime tax"
            );
        }
        rate_tax.max(rules.minimum_tax)
    } else {
        rate_tax
    };

    let mut breakdown = vec![
        BreakdownLine::new("Taxable profit", round_currency(profit)),
        BreakdownLine::new(format!("Tax at {}%", format_rate(rate)), rate_tax),
    ];
    if minimum_applies && tax > rate_tax {
        breakdown.push(BreakdownLine::new(
            "Statutory minimum tax applied",
            rules.minimum_tax,
        ));
    }

    TaxAssessment {
        kind: CalculationKind::CorporateTax,
        taxable_base: profit,
        tax,
        gross_total: None,
        effective_rate: effective_rate(tax, profit),
        regime: Some(regime_label.to_string()),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_regime() {
        let kb = KnowledgeBase::shared();
        let assessment = corporate_tax(120_000.0, None, kb);
        assert_eq!(assessment.tax, 12_000.0);
        assert_eq!(assessment.effective_rate, "10.00");
        assert_eq!(assessment.regime.as_deref(), Some("general regime"));
    }

    #[test]
    fn test_special_regime_rate() {
        let kb = KnowledgeBase::shared();
        let assessment = corporate_tax(100_000.0, Some("patent_box"), kb);
        assert_eq!(assessment.tax, 2_000.0);
        assert_eq!(assessment.effective_rate, "2.00");
    }

    #[test]
    fn test_minimum_binds_for_low_rate_regimes() {
        let kb = KnowledgeBase::shared();
        // Holding regime taxes at 0%, but above the reporting threshold the
        // statutory minimum is due.
        let assessment = corporate_tax(500_000.0, Some("holding"), kb);
        assert_eq!(assessment.tax, kb.corporate.minimum_tax);
        assert!(assessment
            .breakdown
            .iter()
            .any(|l| l.label.contains("minimum")));
    }

    #[test]
    fn test_minimum_does_not_apply_below_threshold() {
        let kb = KnowledgeBase::shared();
        let assessment = corporate_tax(100_000.0, Some("holding"), kb);
        assert_eq!(assessment.tax, 0.0);
        assert_eq!(assessment.effective_rate, "0.00");
    }

    #[test]
    fn test_unknown_regime_falls_back_to_general() {
        let kb = KnowledgeBase::shared();
        let assessment = corporate_tax(50_000.0, Some("mystery"), kb);
        assert_eq!(assessment.tax, 5_000.0);
        assert_eq!(assessment.regime.as_deref(), Some("general regime"));
    }
}
