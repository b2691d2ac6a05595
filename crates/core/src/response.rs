//! The response envelope returned by `process_message`
//!
//! Always well-formed: the engine converts every internal failure into the
//! fixed apology response before it reaches the host application.

use serde::{Deserialize, Serialize};

use crate::entities::ExtractedEntities;
use crate::reference::LegalReference;

/// Which calculator produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    IncomeTax,
    AggregateIncomeTax,
    CorporateTax,
    IndirectTax,
    PropertyGain,
    SavingsGain,
    InheritanceTax,
    Withholding,
}

impl CalculationKind {
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::IncomeTax => "personal income tax",
            CalculationKind::AggregateIncomeTax => "aggregate personal income tax",
            CalculationKind::CorporateTax => "corporate tax",
            CalculationKind::IndirectTax => "indirect tax (IGI)",
            CalculationKind::PropertyGain => "real-property capital gain",
            CalculationKind::SavingsGain => "capital gain on movable property",
            CalculationKind::InheritanceTax => "inheritance and gift tax",
            CalculationKind::Withholding => "non-resident withholding",
        }
    }
}

/// One labelled monetary line of a calculation breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: f64,
}

impl BreakdownLine {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Result of one deterministic tax computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub kind: CalculationKind,
    /// Base the rate schedule or flat rate was applied to
    pub taxable_base: f64,
    /// Tax due, rounded to the nearest currency unit
    pub tax: f64,
    /// Base plus tax, for taxes quoted gross (consumption tax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<f64>,
    /// Two-decimal percentage string; "0.00" when the base is zero
    pub effective_rate: String,
    /// Applicable special regime or exemption label, when one was selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regime: Option<String>,
    /// Per-bracket / per-component lines
    #[serde(default)]
    pub breakdown: Vec<BreakdownLine>,
}

/// Sentiment label produced by the lexical scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
    Urgent,
}

/// Heuristic annotations computed alongside the answer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryAnalysis {
    /// Lexical sentiment label
    pub sentiment: Sentiment,
    /// Complexity score, clamped to [0, 10]
    pub complexity_score: u8,
    /// Detected question language (ISO 639-1), when recognisable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Final answer returned to the host application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    /// Rendered answer text
    pub text: String,
    /// Static per-branch confidence in [0, 1]
    pub confidence: f32,
    /// Deduplicated citations, in first-mention order
    #[serde(default)]
    pub law_references: Vec<LegalReference>,
    /// Entities extracted from the question
    #[serde(default)]
    pub entities: ExtractedEntities,
    /// Present when a calculator ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculations: Option<TaxAssessment>,
    /// Prompts the host can offer as quick replies
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
    /// Optional optimisation hints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Heuristic annotations (sentiment, complexity, language)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<QueryAnalysis>,
}
