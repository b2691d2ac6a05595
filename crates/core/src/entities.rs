//! Entities extracted from a single message
//!
//! [`ExtractedEntities`] is the minimal structure the pipeline derives per
//! call; [`QueryFacts`] adds the auxiliary captures (holding years,
//! relationship, treaty country, consumption category, corporate regime) that
//! the calculator binding strategies consume. Neither outlives the response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Income categories recognised by presence-based keyword matching
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Salary,
    Dividends,
    Rental,
    Freelance,
}

impl IncomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeType::Salary => "salary",
            IncomeType::Dividends => "dividends",
            IncomeType::Rental => "rental",
            IncomeType::Freelance => "freelance",
        }
    }
}

/// Kinship category used by the inheritance calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Child,
    Spouse,
    Parent,
    Sibling,
    #[default]
    Other,
}

impl Relationship {
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::Child => "children",
            Relationship::Spouse => "spouse",
            Relationship::Parent => "parents",
            Relationship::Sibling => "siblings",
            Relationship::Other => "other",
        }
    }
}

/// Income category for non-resident withholding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WithholdingIncome {
    Dividend,
    Interest,
    Royalty,
    #[default]
    Other,
}

impl WithholdingIncome {
    pub fn label(&self) -> &'static str {
        match self {
            WithholdingIncome::Dividend => "dividends",
            WithholdingIncome::Interest => "interest",
            WithholdingIncome::Royalty => "royalties",
            WithholdingIncome::Other => "other income",
        }
    }
}

/// Numeric and categorical entities extracted from one message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Monetary amounts in the order they appear in the text
    #[serde(default)]
    pub amounts: Vec<f64>,
    /// Income categories mentioned anywhere in the message
    #[serde(default)]
    pub income_types: BTreeSet<IncomeType>,
    /// Set when more than one amount or income type is present; routes the
    /// query to the aggregate calculation path
    #[serde(default)]
    pub complexity: bool,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty() && self.income_types.is_empty()
    }

    /// First amount in textual order
    pub fn first_amount(&self) -> Option<f64> {
        self.amounts.first().copied()
    }

    /// Largest extracted amount
    pub fn largest_amount(&self) -> Option<f64> {
        self.amounts.iter().copied().fold(None, |acc, a| match acc {
            Some(best) if best >= a => Some(best),
            _ => Some(a),
        })
    }

    /// Smallest extracted amount
    pub fn smallest_amount(&self) -> Option<f64> {
        self.amounts.iter().copied().fold(None, |acc, a| match acc {
            Some(best) if best <= a => Some(best),
            _ => Some(a),
        })
    }
}

/// Everything the router and binding strategies know about one message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFacts {
    pub entities: ExtractedEntities,
    /// Holding period in full years, when the message states one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding_years: Option<u32>,
    /// Kinship mentioned in an inheritance/gift question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    /// Treaty-country key mentioned in the message (e.g. "spain")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Consumption-tax category keyword (e.g. "services")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Corporate special-regime keyword (e.g. "patent_box")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regime: Option<String>,
}

impl QueryFacts {
    /// Withholding income category implied by the extracted income types
    pub fn withholding_income(&self) -> WithholdingIncome {
        if self.entities.income_types.contains(&IncomeType::Dividends) {
            WithholdingIncome::Dividend
        } else {
            WithholdingIncome::Other
        }
    }
}
