//! Intent classification
//!
//! The classifier walks a priority-ordered table of (pattern → intent) rules
//! and returns the first match, falling back to [`Intent::General`]. The
//! table order is part of the observable contract: computation intents are
//! tried before informational ones, informational before meta-intents.

use serde::{Deserialize, Serialize};

use crate::patterns::INTENT_RULES;

/// Classified purpose of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    // Computation intents
    ComputePropertyGain,
    ComputeSavingsGain,
    ComputeInheritance,
    ComputeWithholding,
    ComputeCorporateTax,
    ComputeIndirectTax,
    ComputeIncomeTax,
    // Informational intents
    ExplainIncomeTax,
    ExplainCorporateTax,
    ExplainIndirectTax,
    ExplainGains,
    ExplainInheritance,
    ExplainResidency,
    ExplainDeductions,
    // Meta-intents
    Comparison,
    Optimization,
    // Fallback
    General,
}

impl Intent {
    /// Stable machine tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ComputePropertyGain => "compute_property_gain",
            Intent::ComputeSavingsGain => "compute_savings_gain",
            Intent::ComputeInheritance => "compute_inheritance",
            Intent::ComputeWithholding => "compute_withholding",
            Intent::ComputeCorporateTax => "compute_corporate_tax",
            Intent::ComputeIndirectTax => "compute_indirect_tax",
            Intent::ComputeIncomeTax => "compute_income_tax",
            Intent::ExplainIncomeTax => "explain_income_tax",
            Intent::ExplainCorporateTax => "explain_corporate_tax",
            Intent::ExplainIndirectTax => "explain_indirect_tax",
            Intent::ExplainGains => "explain_gains",
            Intent::ExplainInheritance => "explain_inheritance",
            Intent::ExplainResidency => "explain_residency",
            Intent::ExplainDeductions => "explain_deductions",
            Intent::Comparison => "comparison",
            Intent::Optimization => "optimization",
            Intent::General => "general",
        }
    }

    /// Whether this intent routes to a calculator
    pub fn is_computational(&self) -> bool {
        matches!(
            self,
            Intent::ComputePropertyGain
                | Intent::ComputeSavingsGain
                | Intent::ComputeInheritance
                | Intent::ComputeWithholding
                | Intent::ComputeCorporateTax
                | Intent::ComputeIndirectTax
                | Intent::ComputeIncomeTax
        )
    }

    /// Membership of the fixed complex-intent set used by the complexity
    /// scorer
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            Intent::Comparison
                | Intent::Optimization
                | Intent::ComputeInheritance
                | Intent::ComputeWithholding
        )
    }

    /// Informational branch a computation intent falls through to when its
    /// entities are insufficient
    pub fn informational_fallback(&self) -> Option<Intent> {
        match self {
            Intent::ComputeIncomeTax => Some(Intent::ExplainIncomeTax),
            Intent::ComputeCorporateTax => Some(Intent::ExplainCorporateTax),
            Intent::ComputeIndirectTax => Some(Intent::ExplainIndirectTax),
            Intent::ComputePropertyGain | Intent::ComputeSavingsGain => {
                Some(Intent::ExplainGains)
            }
            Intent::ComputeInheritance => Some(Intent::ExplainInheritance),
            Intent::ComputeWithholding => Some(Intent::ExplainResidency),
            _ => None,
        }
    }
}

/// Classify normalised text; unmatched input yields [`Intent::General`]
pub fn classify(normalized: &str) -> Intent {
    for (regex, intent) in priority_rules() {
        if regex.is_match(normalized) {
            return *intent;
        }
    }
    Intent::General
}

/// The classification table in priority order, exposed for regression tests
pub fn priority_rules() -> &'static [(regex::Regex, Intent)] {
    &INTENT_RULES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_computation_before_informational() {
        // Mentions income tax both ways; the computation rule must win
        // because it appears earlier in the table.
        let intent = classify(&normalize("How much income tax will I pay on 50000?"));
        assert_eq!(intent, Intent::ComputeIncomeTax);

        let intent = classify(&normalize("What is income tax?"));
        assert_eq!(intent, Intent::ExplainIncomeTax);
    }

    #[test]
    fn test_table_order_is_locked() {
        // The priority order is a design invariant: computation intents
        // first, then informational, then meta. A reordering is observable
        // behaviour and must fail here.
        let order: Vec<Intent> = priority_rules().iter().map(|(_, i)| *i).collect();
        let first_informational = order
            .iter()
            .position(|i| !i.is_computational())
            .expect("table has informational rules");
        assert!(
            order[..first_informational]
                .iter()
                .all(|i| i.is_computational()),
            "computation rules must precede all others"
        );
        let first_meta = order
            .iter()
            .position(|i| matches!(i, Intent::Comparison | Intent::Optimization))
            .expect("table has meta rules");
        assert!(
            order[first_meta..]
                .iter()
                .all(|i| matches!(i, Intent::Comparison | Intent::Optimization)),
            "meta rules must come last"
        );
    }

    #[test]
    fn test_multilingual_classification() {
        assert_eq!(
            classify(&normalize("Quant pagaré d'IRPF amb un salari de 45.000?")),
            Intent::ComputeIncomeTax
        );
        assert_eq!(
            classify(&normalize("¿Cuánto IGI se paga por 1200 de servicios?")),
            Intent::ComputeIndirectTax
        );
        assert_eq!(
            classify(&normalize("Comment fonctionne l'impôt sur le revenu?")),
            Intent::ExplainIncomeTax
        );
        assert_eq!(
            classify(&normalize("He venut el meu pis per 300.000")),
            Intent::ComputePropertyGain
        );
    }

    #[test]
    fn test_unmatched_falls_back_to_general() {
        assert_eq!(classify(&normalize("xyz")), Intent::General);
        assert_eq!(classify(""), Intent::General);
        assert_eq!(classify(&normalize("hola")), Intent::General);
    }

    #[test]
    fn test_non_resident_routes_to_withholding() {
        assert_eq!(
            classify(&normalize(
                "As a non-resident I receive 10000 in dividends from Spain"
            )),
            Intent::ComputeWithholding
        );
    }

    #[test]
    fn test_inheritance_with_amount_is_computational() {
        assert_eq!(
            classify(&normalize("My children inherit 200000, what tax is due?")),
            Intent::ComputeInheritance
        );
        assert_eq!(
            classify(&normalize("How does inheritance tax work?")),
            Intent::ExplainInheritance
        );
    }
}
