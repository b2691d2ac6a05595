//! Per-topic fiscal rule sets
//!
//! Each struct here is one immutable rule set: rates, thresholds, exemptions,
//! special regimes and the citations that substantiate them. They are built
//! once by the compiled tables and never mutated afterwards.

use serde::{Deserialize, Serialize};

use fiscal_core::{LegalReference, Relationship, WithholdingIncome};

use crate::schedule::RateSchedule;

/// Fiscal topics the knowledge base covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiscalTopic {
    IncomeTax,
    CorporateTax,
    IndirectTax,
    PropertyGains,
    SavingsGains,
    Inheritance,
    NonResident,
}

impl FiscalTopic {
    pub fn name(&self) -> &'static str {
        match self {
            FiscalTopic::IncomeTax => "Personal income tax (IRPF)",
            FiscalTopic::CorporateTax => "Corporate tax (IS)",
            FiscalTopic::IndirectTax => "General indirect tax (IGI)",
            FiscalTopic::PropertyGains => "Real-property capital gains",
            FiscalTopic::SavingsGains => "Capital gains on movable property",
            FiscalTopic::Inheritance => "Inheritance and gift tax",
            FiscalTopic::NonResident => "Non-resident income tax (IRNR)",
        }
    }

    /// Stable machine tag
    pub fn tag(&self) -> &'static str {
        match self {
            FiscalTopic::IncomeTax => "income_tax",
            FiscalTopic::CorporateTax => "corporate_tax",
            FiscalTopic::IndirectTax => "indirect_tax",
            FiscalTopic::PropertyGains => "property_gains",
            FiscalTopic::SavingsGains => "savings_gains",
            FiscalTopic::Inheritance => "inheritance",
            FiscalTopic::NonResident => "non_resident",
        }
    }
}

/// Named special regime with its own rate
#[derive(Debug, Clone, Serialize)]
pub struct SpecialRegime {
    pub key: &'static str,
    pub label: &'static str,
    pub rate: f64,
}

/// Personal income tax: progressive schedule plus a flat non-resident bypass
#[derive(Debug, Clone)]
pub struct IncomeTaxRules {
    pub schedule: RateSchedule,
    /// Standard deduction subtracted before the schedule applies
    pub standard_deduction: f64,
    /// Flat rate replacing the progressive path for non-residents
    pub non_resident_flat_rate: f64,
    pub references: Vec<LegalReference>,
}

/// Corporate tax: regime-selected rate with a statutory minimum
#[derive(Debug, Clone)]
pub struct CorporateTaxRules {
    pub general_rate: f64,
    pub regimes: Vec<SpecialRegime>,
    /// Minimum tax due once profit exceeds the reporting threshold
    pub minimum_tax: f64,
    pub reporting_threshold: f64,
    pub references: Vec<LegalReference>,
}

impl CorporateTaxRules {
    /// Rate and label for a regime key; unknown keys fall back to the
    /// general regime.
    pub fn rate_for(&self, regime: Option<&str>) -> (f64, &'static str) {
        if let Some(key) = regime {
            if let Some(special) = self.regimes.iter().find(|r| r.key == key) {
                return (special.rate, special.label);
            }
        }
        (self.general_rate, "general regime")
    }
}

/// One consumption-tax category with its rate and trigger keywords
#[derive(Debug, Clone)]
pub struct ConsumptionCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub rate: f64,
    /// Keyword stems that select this category
    pub keywords: &'static [&'static str],
}

/// General indirect tax: category-keyed flat rates
#[derive(Debug, Clone)]
pub struct IndirectTaxRules {
    pub general_rate: f64,
    pub categories: Vec<ConsumptionCategory>,
    pub references: Vec<LegalReference>,
}

impl IndirectTaxRules {
    /// Rate and label for a category key; unknown keys use the general rate
    pub fn rate_for(&self, category: Option<&str>) -> (f64, &'static str) {
        if let Some(key) = category {
            if let Some(cat) = self.categories.iter().find(|c| c.key == key) {
                return (cat.rate, cat.label);
            }
        }
        (self.general_rate, "general rate")
    }

    /// Category key whose keywords appear in the text, if any
    pub fn category_for_text(&self, text: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| text.contains(k)))
            .map(|c| c.key)
    }
}

/// Real-property gains: a step rate that only falls as holding years grow
#[derive(Debug, Clone)]
pub struct PropertyGainRules {
    /// `(max_year, rate)` pairs, ascending by year; the rate applies to
    /// holdings of up to and including `max_year` full years
    pub steps: Vec<(u32, f64)>,
    /// Holdings of this many years or more are fully exempt
    pub zero_year: u32,
    pub references: Vec<LegalReference>,
}

impl PropertyGainRules {
    /// Rate for a holding period in full years; 0 at/after `zero_year`
    pub fn rate_for_years(&self, years: u32) -> f64 {
        if years >= self.zero_year {
            return 0.0;
        }
        self.steps
            .iter()
            .find(|(max_year, _)| years <= *max_year)
            .map(|(_, rate)| *rate)
            .unwrap_or(0.0)
    }
}

/// Movable-property gains: flat rate above a fixed personal exemption
#[derive(Debug, Clone)]
pub struct SavingsGainRules {
    pub rate: f64,
    pub exemption: f64,
    pub references: Vec<LegalReference>,
}

/// Inheritance and gift tax: relationship exemption plus a progressive schedule
#[derive(Debug, Clone)]
pub struct InheritanceRules {
    pub exemptions: Vec<(Relationship, f64)>,
    pub schedule: RateSchedule,
    pub references: Vec<LegalReference>,
}

impl InheritanceRules {
    pub fn exemption_for(&self, relationship: Relationship) -> f64 {
        self.exemptions
            .iter()
            .find(|(r, _)| *r == relationship)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }
}

/// Bilateral-treaty override rates for one partner country
#[derive(Debug, Clone, Serialize)]
pub struct TreatyRate {
    /// Lookup key, lowercase
    pub country: &'static str,
    pub display_name: &'static str,
    pub dividends: f64,
    pub interest: f64,
    pub royalties: f64,
}

/// Non-resident withholding: flat statutory rate with treaty overrides
#[derive(Debug, Clone)]
pub struct WithholdingRules {
    pub flat_rate: f64,
    pub treaties: Vec<TreatyRate>,
    pub references: Vec<LegalReference>,
}

impl WithholdingRules {
    /// Treaty override for `(country, income)`, when one exists
    pub fn treaty_rate(
        &self,
        country: &str,
        income: WithholdingIncome,
    ) -> Option<(f64, &TreatyRate)> {
        let treaty = self.treaties.iter().find(|t| t.country == country)?;
        let rate = match income {
            WithholdingIncome::Dividend => treaty.dividends,
            WithholdingIncome::Interest => treaty.interest,
            WithholdingIncome::Royalty => treaty.royalties,
            WithholdingIncome::Other => return None,
        };
        Some((rate, treaty))
    }
}
