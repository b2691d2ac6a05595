//! Core types for the fiscal question engine
//!
//! This crate holds the data model shared by every other crate:
//! - Conversation context (caller-owned, bounded history)
//! - Extracted entities and the query facts the calculators bind from
//! - The response envelope returned to the host application
//! - Legal references and money formatting helpers

pub mod context;
pub mod entities;
pub mod money;
pub mod reference;
pub mod response;

pub use context::{
    ContextMessage, ConversationContext, Residency, SessionState, UserProfile,
    MAX_PREVIOUS_MESSAGES,
};
pub use entities::{ExtractedEntities, IncomeType, QueryFacts, Relationship, WithholdingIncome};
pub use reference::{dedup_references, LegalReference};
pub use response::{
    AiResponse, BreakdownLine, CalculationKind, QueryAnalysis, Sentiment, TaxAssessment,
};
