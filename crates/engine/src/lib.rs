//! Fiscal question engine
//!
//! Single entry point over the whole pipeline:
//!
//! ```text
//! text → normalize → classify intent → extract entities → compute/template
//!      → synthesize response → (log, append history) → AiResponse
//! ```
//!
//! The engine is synchronous and stateless per call against the read-only
//! knowledge base. The only mutable state is the caller-owned
//! [`ConversationContext`], mutated in place, and the engine's session-keyed
//! interaction log. `process_message` never fails: every internal error or
//! panic becomes the fixed apology response.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Utc;
use tracing::{debug, warn};

use fiscal_calc::{binding, corporate, gains, income, indirect, inheritance, withholding};
use fiscal_calc::CalcError;
use fiscal_core::{
    AiResponse, ConversationContext, QueryAnalysis, QueryFacts, Residency, TaxAssessment,
};
use fiscal_knowledge::KnowledgeBase;
use fiscal_nlu::{
    classify, normalize, read_sentiment, score_complexity, EntityExtractor, Intent, Language,
};

mod log;
mod synthesizer;
mod topics;

pub use crate::log::{ContextSnapshot, InteractionLogEntry, InteractionLogs, MAX_LOG_ENTRIES};
pub use topics::tag_topics;

/// The engine: knowledge base, extractor and the per-session diagnostic log
pub struct FiscalEngine {
    kb: &'static KnowledgeBase,
    extractor: EntityExtractor,
    logs: InteractionLogs,
}

impl FiscalEngine {
    /// Build an engine over the shared compiled knowledge base
    pub fn new() -> Self {
        Self {
            kb: KnowledgeBase::shared(),
            extractor: EntityExtractor::new(),
            logs: InteractionLogs::new(),
        }
    }

    /// Revision tag of the rule tables this engine answers from
    pub fn knowledge_version(&self) -> &'static str {
        self.kb.version()
    }

    /// Process one message. Always returns a well-formed response; mutates
    /// the caller-owned context in place (bounded history, session state)
    /// and appends to this session's interaction log.
    pub fn process_message(&self, text: &str, context: &mut ConversationContext) -> AiResponse {
        let residency = context.residency();

        let (response, intent, language) =
            match catch_unwind(AssertUnwindSafe(|| self.answer(text, residency))) {
                Ok(answered) => answered,
                Err(_) => {
                    warn!("unexpected internal failure; returning the apology response");
                    (synthesizer::apology(), Intent::General, None)
                }
            };

        context.session_state.last_intent = Some(intent.as_str().to_string());
        if let Some(language) = language {
            context.session_state.detected_language = Some(language.code().to_string());
        }
        context.record_exchange(text, response.text.clone(), topics::tag_topics(text));

        self.logs.record(
            &context.session_id,
            InteractionLogEntry {
                timestamp: Utc::now(),
                query: text.to_string(),
                response_text: response.text.clone(),
                confidence: response.confidence,
                context_snapshot: ContextSnapshot {
                    message_count: context.message_count,
                    recent_topics: context.recent_topics(3),
                },
                law_references: response.law_references.clone(),
            },
        );

        response
    }

    /// Async wrapper for caller-API uniformity; resolves in the same
    /// scheduling turn.
    pub async fn process_message_async(
        &self,
        text: &str,
        context: &mut ConversationContext,
    ) -> AiResponse {
        self.process_message(text, context)
    }

    /// Diagnostic snapshot of one session's interaction log
    pub fn interaction_log(&self, session_id: &str) -> Vec<InteractionLogEntry> {
        self.logs.snapshot(session_id)
    }

    fn answer(&self, text: &str, residency: Residency) -> (AiResponse, Intent, Option<Language>) {
        let normalized = normalize(text);
        let intent = classify(&normalized);

        let mut facts = self.extractor.analyze(&normalized);
        facts.category = self
            .kb
            .indirect
            .category_for_text(&normalized)
            .map(str::to_string);

        let sentiment = read_sentiment(&normalized);
        let language = Language::detect(&normalized);
        let complexity =
            score_complexity(&normalized, intent, facts.entities.amounts.len());
        debug!(
            intent = intent.as_str(),
            amounts = facts.entities.amounts.len(),
            complexity,
            "classified message"
        );

        let (mut response, effective_intent) = self.respond(intent, &facts, residency);

        response.entities = facts.entities;
        response.analysis = Some(QueryAnalysis {
            sentiment: sentiment.label,
            complexity_score: complexity,
            language: language.map(|l| l.code().to_string()),
        });

        (response, effective_intent, language)
    }

    /// Select and fill the response branch. A computation intent whose
    /// entities are insufficient falls through to its informational branch,
    /// and from there to the general fallback.
    fn respond(
        &self,
        intent: Intent,
        facts: &QueryFacts,
        residency: Residency,
    ) -> (AiResponse, Intent) {
        if intent.is_computational() {
            match self.compute(intent, facts, residency) {
                Ok(assessment) => {
                    return (
                        synthesizer::compose_computation(intent, assessment, self.kb),
                        intent,
                    );
                }
                Err(error) => {
                    debug!(
                        intent = intent.as_str(),
                        %error,
                        "computation fell through to a less specific branch"
                    );
                    let fallback = intent.informational_fallback().unwrap_or(Intent::General);
                    return (self.informational(fallback), fallback);
                }
            }
        }
        (self.informational(intent), intent)
    }

    fn informational(&self, intent: Intent) -> AiResponse {
        if intent == Intent::General {
            synthesizer::compose_general()
        } else {
            synthesizer::compose_informational(intent, self.kb)
        }
    }

    /// Route a computation intent through its binding strategy and
    /// calculator
    fn compute(
        &self,
        intent: Intent,
        facts: &QueryFacts,
        residency: Residency,
    ) -> Result<TaxAssessment, CalcError> {
        match intent {
            Intent::ComputeIncomeTax => {
                // The complexity flag routes multi-amount questions through
                // the aggregate path.
                if facts.entities.complexity && facts.entities.amounts.len() > 1 {
                    let amounts = binding::bind_aggregate(facts)?;
                    Ok(income::aggregate_income_tax(&amounts, residency, self.kb))
                } else {
                    let gross = binding::bind_income(facts)?;
                    Ok(income::progressive_income_tax(gross, residency, self.kb))
                }
            }
            Intent::ComputeCorporateTax => {
                let (profit, regime) = binding::bind_corporate(facts)?;
                Ok(corporate::corporate_tax(profit, regime, self.kb))
            }
            Intent::ComputeIndirectTax => {
                let (amount, category) = binding::bind_indirect(facts)?;
                Ok(indirect::indirect_tax(amount, category, self.kb))
            }
            Intent::ComputePropertyGain => {
                let inputs = binding::bind_property_gain(facts)?;
                Ok(gains::property_gain(inputs, self.kb))
            }
            Intent::ComputeSavingsGain => {
                let gain = binding::bind_savings_gain(facts)?;
                Ok(gains::savings_gain(gain, self.kb))
            }
            Intent::ComputeInheritance => {
                let (amount, relationship) = binding::bind_inheritance(facts)?;
                Ok(inheritance::inheritance_tax(amount, relationship, self.kb))
            }
            Intent::ComputeWithholding => {
                let (amount, country, income_kind) = binding::bind_withholding(facts)?;
                Ok(withholding::withholding_tax(
                    amount,
                    country,
                    income_kind,
                    self.kb,
                ))
            }
            _ => Err(CalcError::MissingAmount("a computation")),
        }
    }
}

impl Default for FiscalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_scenario_end_to_end() {
        let engine = FiscalEngine::new();
        let mut context = ConversationContext::new();
        let response =
            engine.process_message("How much income tax will I pay on 50.000?", &mut context);

        let calc = response.calculations.expect("calculator ran");
        assert_eq!(calc.taxable_base, 47_000.0);
        assert_eq!(calc.tax, 1_500.0);
        assert_eq!(calc.effective_rate, "3.19");
        assert!(!response.law_references.is_empty());
        assert_eq!(context.message_count, 1);
        assert_eq!(
            context.session_state.last_intent.as_deref(),
            Some("compute_income_tax")
        );
    }

    #[test]
    fn test_short_ambiguous_message_gets_general_fallback() {
        let engine = FiscalEngine::new();
        let mut context = ConversationContext::new();
        let response = engine.process_message("hola", &mut context);

        assert!(response.calculations.is_none());
        assert_eq!(response.confidence, synthesizer::GENERAL_CONFIDENCE);
        assert!(!response.follow_up_questions.is_empty());
    }

    #[test]
    fn test_compute_without_amount_falls_through() {
        let engine = FiscalEngine::new();
        let mut context = ConversationContext::new();
        let response = engine.process_message("How much income tax would I pay?", &mut context);

        // No amount to bind: the computation intent degrades to the
        // informational branch rather than erroring.
        assert!(response.calculations.is_none());
        assert_eq!(response.confidence, synthesizer::INFORMATIONAL_CONFIDENCE);
        assert_eq!(
            context.session_state.last_intent.as_deref(),
            Some("explain_income_tax")
        );
    }

    #[test]
    fn test_aggregate_path_via_complexity_flag() {
        let engine = FiscalEngine::new();
        let mut context = ConversationContext::new();
        let response = engine.process_message(
            "How much income tax on my salary of 30.000 plus rental income of 20.000?",
            &mut context,
        );

        let calc = response.calculations.expect("aggregate calculator ran");
        assert_eq!(calc.kind, fiscal_core::CalculationKind::AggregateIncomeTax);
        assert_eq!(calc.taxable_base, 47_000.0);
        assert_eq!(calc.tax, 1_500.0);
    }
}
