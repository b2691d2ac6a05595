//! Compiled rule tables
//!
//! The knowledge base is refreshed out of band: when the law changes, these
//! tables are edited and the crate is recompiled with a new revision tag.
//! Nothing here is read from disk or the network at runtime.

use fiscal_core::{LegalReference, Relationship};

use crate::rules::{
    ConsumptionCategory, CorporateTaxRules, IncomeTaxRules, IndirectTaxRules, InheritanceRules,
    PropertyGainRules, SavingsGainRules, SpecialRegime, TreatyRate, WithholdingRules,
};
use crate::schedule::{Bracket, RateSchedule};
use crate::KnowledgeBase;

/// Revision tag of the compiled tables
pub const KNOWLEDGE_BASE_VERSION: &str = "2024.1";

pub(crate) fn compiled() -> KnowledgeBase {
    KnowledgeBase {
        version: KNOWLEDGE_BASE_VERSION,
        income: income_tax(),
        corporate: corporate_tax(),
        indirect: indirect_tax(),
        property_gains: property_gains(),
        savings_gains: savings_gains(),
        inheritance: inheritance(),
        withholding: withholding(),
    }
}

fn income_tax() -> IncomeTaxRules {
    IncomeTaxRules {
        schedule: RateSchedule::new(vec![
            Bracket::new(0.0, 24_000.0, 0.0),
            Bracket::new(24_000.0, 40_000.0, 0.05),
            Bracket::new(40_000.0, f64::INFINITY, 0.10),
        ])
        .expect("income tax schedule is well-formed"),
        standard_deduction: 3_000.0,
        non_resident_flat_rate: 0.10,
        references: vec![
            LegalReference::new("Llei 5/2014", &["3", "52", "59"]),
        ],
    }
}

fn corporate_tax() -> CorporateTaxRules {
    CorporateTaxRules {
        general_rate: 0.10,
        regimes: vec![
            SpecialRegime {
                key: "patent_box",
                label: "intangible-assets (patent box) regime",
                rate: 0.02,
            },
            SpecialRegime {
                key: "holding",
                label: "foreign-securities holding regime",
                rate: 0.0,
            },
        ],
        minimum_tax: 3_000.0,
        reporting_threshold: 150_000.0,
        references: vec![
            LegalReference::new("Llei 95/2010", &["41", "43"]),
        ],
    }
}

fn indirect_tax() -> IndirectTaxRules {
    IndirectTaxRules {
        general_rate: 0.045,
        categories: vec![
            ConsumptionCategory {
                key: "services",
                label: "banking and financial services (increased rate)",
                rate: 0.095,
                keywords: &[
                    "servei", "servicio", "service", "banc", "bank", "financ", "assegur",
                    "insurance", "seguro",
                ],
            },
            ConsumptionCategory {
                key: "reduced",
                label: "food and press (reduced rate)",
                rate: 0.01,
                keywords: &[
                    "aliment", "food", "menjar", "comida", "nourriture", "premsa", "prensa",
                    "press",
                ],
            },
            ConsumptionCategory {
                key: "super_reduced",
                label: "health and education (super-reduced rate)",
                rate: 0.0,
                keywords: &[
                    "salut", "salud", "health", "hospital", "medic", "médic", "educaci",
                    "education", "school", "escola", "escuela", "école",
                ],
            },
        ],
        references: vec![
            LegalReference::new("Llei 11/2012", &["57", "58", "59"]),
        ],
    }
}

fn property_gains() -> PropertyGainRules {
    PropertyGainRules {
        steps: vec![
            (1, 0.15),
            (2, 0.14),
            (3, 0.13),
            (4, 0.12),
            (5, 0.10),
            (6, 0.08),
            (7, 0.06),
            (8, 0.05),
            (9, 0.04),
            (10, 0.03),
            (11, 0.02),
            (12, 0.01),
        ],
        zero_year: 13,
        references: vec![
            LegalReference::new("Llei 21/2006", &["5", "9"]),
        ],
    }
}

fn savings_gains() -> SavingsGainRules {
    SavingsGainRules {
        rate: 0.10,
        exemption: 3_000.0,
        references: vec![
            LegalReference::new("Llei 5/2014", &["5", "24"]),
        ],
    }
}

fn inheritance() -> InheritanceRules {
    InheritanceRules {
        exemptions: vec![
            (Relationship::Child, 47_000.0),
            (Relationship::Spouse, 40_000.0),
            (Relationship::Parent, 25_000.0),
            (Relationship::Sibling, 15_000.0),
            (Relationship::Other, 8_000.0),
        ],
        schedule: RateSchedule::new(vec![
            Bracket::new(0.0, 50_000.0, 0.05),
            Bracket::new(50_000.0, 150_000.0, 0.10),
            Bracket::new(150_000.0, f64::INFINITY, 0.15),
        ])
        .expect("inheritance schedule is well-formed"),
        references: vec![
            LegalReference::new("Llei 46/2014", &["12", "18"]),
        ],
    }
}

fn withholding() -> WithholdingRules {
    WithholdingRules {
        flat_rate: 0.10,
        treaties: vec![
            TreatyRate {
                country: "spain",
                display_name: "Spain",
                dividends: 0.05,
                interest: 0.05,
                royalties: 0.05,
            },
            TreatyRate {
                country: "france",
                display_name: "France",
                dividends: 0.05,
                interest: 0.05,
                royalties: 0.05,
            },
            TreatyRate {
                country: "luxembourg",
                display_name: "Luxembourg",
                dividends: 0.05,
                interest: 0.0,
                royalties: 0.05,
            },
            TreatyRate {
                country: "portugal",
                display_name: "Portugal",
                dividends: 0.05,
                interest: 0.10,
                royalties: 0.05,
            },
            TreatyRate {
                country: "uae",
                display_name: "United Arab Emirates",
                dividends: 0.0,
                interest: 0.0,
                royalties: 0.0,
            },
        ],
        references: vec![
            LegalReference::new("Llei 94/2010", &["15", "20"]),
        ],
    }
}
