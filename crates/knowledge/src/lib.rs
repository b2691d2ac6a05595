//! Compiled legal-rules knowledge base
//!
//! Static, versioned tables of rates, thresholds, exemptions, special regimes
//! and legal citations per fiscal topic. The base is constructed once behind
//! a `Lazy` and shared immutably by every engine instance; refreshing it is
//! an out-of-band recompile, never a runtime mutation.

use once_cell::sync::Lazy;

use fiscal_core::LegalReference;

pub mod rules;
pub mod schedule;
mod tables;

pub use rules::{
    ConsumptionCategory, CorporateTaxRules, FiscalTopic, IncomeTaxRules, IndirectTaxRules,
    InheritanceRules, PropertyGainRules, SavingsGainRules, SpecialRegime, TreatyRate,
    WithholdingRules,
};
pub use schedule::{Bracket, RateSchedule, ScheduleError};
pub use tables::KNOWLEDGE_BASE_VERSION;

static SHARED: Lazy<KnowledgeBase> = Lazy::new(tables::compiled);

/// The full rule base, one immutable value per process
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub(crate) version: &'static str,
    pub income: IncomeTaxRules,
    pub corporate: CorporateTaxRules,
    pub indirect: IndirectTaxRules,
    pub property_gains: PropertyGainRules,
    pub savings_gains: SavingsGainRules,
    pub inheritance: InheritanceRules,
    pub withholding: WithholdingRules,
}

impl KnowledgeBase {
    /// Shared immutable instance built from the compiled tables
    pub fn shared() -> &'static KnowledgeBase {
        &SHARED
    }

    /// Revision tag of the compiled tables
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Citations for a topic, in the order the tables declare them
    pub fn references_for(&self, topic: FiscalTopic) -> &[LegalReference] {
        match topic {
            FiscalTopic::IncomeTax => &self.income.references,
            FiscalTopic::CorporateTax => &self.corporate.references,
            FiscalTopic::IndirectTax => &self.indirect.references,
            FiscalTopic::PropertyGains => &self.property_gains.references,
            FiscalTopic::SavingsGains => &self.savings_gains.references,
            FiscalTopic::Inheritance => &self.inheritance.references,
            FiscalTopic::NonResident => &self.withholding.references,
        }
    }
}
