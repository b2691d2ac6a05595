//! Response synthesis
//!
//! Fixed templates per branch: computation responses embed the calculator
//! breakdown and the topic's citations; informational intents get a static
//! explanatory block; the fallback is a capability overview. Confidence is a
//! fixed constant per branch. Any internal failure is converted into the
//! apology response before it can reach the caller.

use fiscal_core::money::{format_amount, format_rate};
use fiscal_core::{dedup_references, AiResponse, TaxAssessment};
use fiscal_knowledge::{FiscalTopic, KnowledgeBase};
use fiscal_nlu::Intent;

pub(crate) const COMPUTATION_CONFIDENCE: f32 = 0.9;
pub(crate) const INFORMATIONAL_CONFIDENCE: f32 = 0.8;
pub(crate) const GENERAL_CONFIDENCE: f32 = 0.6;
pub(crate) const APOLOGY_CONFIDENCE: f32 = 0.1;

/// Knowledge-base topic whose citations back an intent
pub(crate) fn topic_for(intent: Intent) -> Option<FiscalTopic> {
    match intent {
        Intent::ComputeIncomeTax | Intent::ExplainIncomeTax | Intent::ExplainDeductions => {
            Some(FiscalTopic::IncomeTax)
        }
        Intent::ComputeCorporateTax | Intent::ExplainCorporateTax => {
            Some(FiscalTopic::CorporateTax)
        }
        Intent::ComputeIndirectTax | Intent::ExplainIndirectTax => {
            Some(FiscalTopic::IndirectTax)
        }
        Intent::ComputePropertyGain | Intent::ExplainGains => Some(FiscalTopic::PropertyGains),
        Intent::ComputeSavingsGain => Some(FiscalTopic::SavingsGains),
        Intent::ComputeInheritance | Intent::ExplainInheritance => {
            Some(FiscalTopic::Inheritance)
        }
        Intent::ComputeWithholding | Intent::ExplainResidency => {
            Some(FiscalTopic::NonResident)
        }
        Intent::Comparison | Intent::Optimization | Intent::General => None,
    }
}

fn citation_sentence(kb: &KnowledgeBase, topic: FiscalTopic) -> String {
    let citations: Vec<String> = kb
        .references_for(topic)
        .iter()
        .map(|r| r.citation())
        .collect();
    format!("Legal basis: {}.", citations.join("; "))
}

/// Assemble the computation template around a calculator result
pub(crate) fn compose_computation(
    intent: Intent,
    assessment: TaxAssessment,
    kb: &KnowledgeBase,
) -> AiResponse {
    let topic = topic_for(intent).unwrap_or(FiscalTopic::IncomeTax);
    let references = dedup_references(kb.references_for(topic).to_vec());

    let mut text = format!("{} assessment\n", capitalize(assessment.kind.label()));
    for line in &assessment.breakdown {
        text.push_str(&format!("  {}: {}\n", line.label, format_amount(line.amount)));
    }
    text.push_str(&format!(
        "Tax due: {} (effective rate {}%).",
        format_amount(assessment.tax),
        assessment.effective_rate
    ));
    if let Some(regime) = &assessment.regime {
        text.push_str(&format!(" Applied: {regime}."));
    }
    text.push(' ');
    text.push_str(&citation_sentence(kb, topic));

    AiResponse {
        text,
        confidence: COMPUTATION_CONFIDENCE,
        law_references: references,
        entities: Default::default(),
        calculations: Some(assessment),
        follow_up_questions: computation_follow_ups(intent),
        suggestions: computation_suggestions(intent),
        analysis: None,
    }
}

fn computation_follow_ups(intent: Intent) -> Vec<String> {
    match intent {
        Intent::ComputeIncomeTax => vec![
            "Would you like the full bracket table?".into(),
            "Shall I include other income, such as rental or dividends?".into(),
        ],
        Intent::ComputeCorporateTax => vec![
            "Does your company qualify for a special regime?".into(),
            "Would you like the filing calendar?".into(),
        ],
        Intent::ComputeIndirectTax => vec![
            "Do you need another category, for example food or health?".into(),
        ],
        Intent::ComputePropertyGain => vec![
            "Was the property your main residence?".into(),
            "Would you like the year-by-year rate table?".into(),
        ],
        Intent::ComputeSavingsGain => vec![
            "Were these shares held through an investment fund?".into(),
        ],
        Intent::ComputeInheritance => vec![
            "Would you like the exemption table for other relatives?".into(),
        ],
        Intent::ComputeWithholding => vec![
            "Is there a tax treaty with your country of residence?".into(),
        ],
        _ => vec!["Is there anything else I can compute for you?".into()],
    }
}

fn computation_suggestions(intent: Intent) -> Vec<String> {
    match intent {
        Intent::ComputeIncomeTax => {
            vec!["Contributions to an approved pension plan reduce the taxable base.".into()]
        }
        Intent::ComputePropertyGain => {
            vec!["Holding the property longer lowers the applicable rate step.".into()]
        }
        _ => vec![],
    }
}

/// Static explanatory block for an informational intent
pub(crate) fn compose_informational(intent: Intent, kb: &KnowledgeBase) -> AiResponse {
    let topic = topic_for(intent);
    let references = topic
        .map(|t| dedup_references(kb.references_for(t).to_vec()))
        .unwrap_or_default();

    let mut text = informational_block(intent, kb);
    if let Some(topic) = topic {
        text.push(' ');
        text.push_str(&citation_sentence(kb, topic));
    }

    AiResponse {
        text,
        confidence: INFORMATIONAL_CONFIDENCE,
        law_references: references,
        entities: Default::default(),
        calculations: None,
        follow_up_questions: informational_follow_ups(intent),
        suggestions: vec![],
        analysis: None,
    }
}

fn informational_block(intent: Intent, kb: &KnowledgeBase) -> String {
    match intent {
        Intent::ExplainIncomeTax => format!(
            "Personal income tax is progressive: income up to {} is exempt, the band up \
             to {} is taxed at {}%, and income above that at {}%. A standard deduction \
             of {} applies before the brackets. Non-residents instead pay a flat {}% on \
             Andorran-source income.",
            format_amount(kb.income.schedule.brackets()[0].high),
            format_amount(kb.income.schedule.brackets()[1].high),
            format_rate(kb.income.schedule.brackets()[1].rate),
            format_rate(kb.income.schedule.brackets()[2].rate),
            format_amount(kb.income.standard_deduction),
            format_rate(kb.income.non_resident_flat_rate),
        ),
        Intent::ExplainCorporateTax => format!(
            "Corporate tax is {}% of profit under the general regime. Special regimes \
             (patent box, foreign-securities holdings) carry their own rates, and a \
             statutory minimum of {} applies once profit exceeds {}.",
            format_rate(kb.corporate.general_rate),
            format_amount(kb.corporate.minimum_tax),
            format_amount(kb.corporate.reporting_threshold),
        ),
        Intent::ExplainIndirectTax => format!(
            "The general indirect tax (IGI) is {}% on most goods and services, with a \
             reduced {}% rate, a super-reduced 0% rate for health and education, and an \
             increased {}% rate for banking and financial services.",
            format_rate(kb.indirect.general_rate),
            format_rate(kb.indirect.rate_for(Some("reduced")).0),
            format_rate(kb.indirect.rate_for(Some("services")).0),
        ),
        Intent::ExplainGains => format!(
            "Gains on real property are taxed on a sliding scale that falls with every \
             year of holding and reaches zero after {} full years. Gains on movable \
             property pay a flat {}% above a {} personal exemption.",
            kb.property_gains.zero_year,
            format_rate(kb.savings_gains.rate),
            format_amount(kb.savings_gains.exemption),
        ),
        Intent::ExplainInheritance => {
            "Inheritance and gift tax subtracts a relationship-dependent exemption from \
             the transferred amount, then applies progressive brackets to the remainder. \
             Close relatives enjoy the largest exemptions."
                .to_string()
        }
        Intent::ExplainResidency => format!(
            "You are a tax resident if you spend more than 183 days a year in the \
             country or your centre of economic interests is here. Non-residents pay a \
             flat {}% withholding on local income, unless a bilateral treaty sets a \
             lower rate.",
            format_rate(kb.withholding.flat_rate),
        ),
        Intent::ExplainDeductions => format!(
            "The standard deduction of {} applies to every resident taxpayer. Further \
             reductions exist for dependants, pension contributions and main-residence \
             investment.",
            format_amount(kb.income.standard_deduction),
        ),
        Intent::Comparison => {
            "Both options can be quantified: tell me the amounts involved and I will \
             compute each side so you can compare the outcomes directly."
                .to_string()
        }
        Intent::Optimization => {
            "Common levers are the standard deduction, pension contributions, the \
             holding-period scale on property gains and treaty rates for cross-border \
             income. Give me your figures and I will quantify each one."
                .to_string()
        }
        _ => capability_overview(),
    }
}

fn informational_follow_ups(intent: Intent) -> Vec<String> {
    match intent {
        Intent::ExplainIncomeTax | Intent::ExplainDeductions => vec![
            "Shall I compute the tax on a specific income?".into(),
            "Are you asking as a resident or a non-resident?".into(),
        ],
        Intent::ExplainCorporateTax => vec![
            "Shall I compute the tax on your expected profit?".into(),
        ],
        Intent::ExplainIndirectTax => vec![
            "Shall I compute the IGI on a specific amount?".into(),
        ],
        Intent::ExplainGains => vec![
            "Tell me the sale price, purchase price and years held and I will compute it.".into(),
        ],
        Intent::ExplainInheritance => vec![
            "Tell me the amount and your relationship to the deceased and I will compute it.".into(),
        ],
        Intent::ExplainResidency => vec![
            "Shall I compute the withholding on a specific payment?".into(),
        ],
        Intent::Comparison | Intent::Optimization => vec![
            "Which amounts should I use for the comparison?".into(),
        ],
        _ => vec!["What would you like to know about Andorran taxes?".into()],
    }
}

fn capability_overview() -> String {
    "I can answer questions about Andorran taxation: personal income tax (IRPF), \
     corporate tax (IS), the general indirect tax (IGI), capital gains on property and \
     securities, inheritance and gift tax, and non-resident withholding. Ask me to \
     explain a tax or give me figures and I will compute it."
        .to_string()
}

/// Fallback for messages no rule matches
pub(crate) fn compose_general() -> AiResponse {
    AiResponse {
        text: capability_overview(),
        confidence: GENERAL_CONFIDENCE,
        law_references: vec![],
        entities: Default::default(),
        calculations: None,
        follow_up_questions: vec![
            "How much income tax would I pay on 50.000?".into(),
            "What is the IGI rate for services?".into(),
            "How are capital gains on a flat taxed?".into(),
        ],
        suggestions: vec![],
        analysis: None,
    }
}

/// Fixed low-confidence apology; used when anything unexpected fails
pub(crate) fn apology() -> AiResponse {
    AiResponse {
        text: "I am sorry, something went wrong while preparing your answer. Could you \
               rephrase the question?"
            .to_string(),
        confidence: APOLOGY_CONFIDENCE,
        law_references: vec![],
        entities: Default::default(),
        calculations: None,
        follow_up_questions: vec!["Could you state the question differently?".into()],
        suggestions: vec![],
        analysis: None,
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
