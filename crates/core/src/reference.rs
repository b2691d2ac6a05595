//! Legal citations attached to answers
//!
//! A reference is purely descriptive; it never drives computation.

use serde::{Deserialize, Serialize};

/// Citation of the law substantiating a computed or explained rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalReference {
    /// Law identifier, e.g. "Llei 5/2014"
    pub law_id: String,
    /// Articles within the law
    #[serde(default)]
    pub articles: Vec<String>,
    /// Implementing decrees, when relevant
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decrees: Vec<String>,
}

impl LegalReference {
    pub fn new(law_id: impl Into<String>, articles: &[&str]) -> Self {
        Self {
            law_id: law_id.into(),
            articles: articles.iter().map(|a| a.to_string()).collect(),
            decrees: Vec::new(),
        }
    }

    pub fn with_decree(mut self, decree: impl Into<String>) -> Self {
        self.decrees.push(decree.into());
        self
    }

    /// Render as a short citation string, e.g. "Llei 5/2014, arts. 3, 52"
    pub fn citation(&self) -> String {
        if self.articles.is_empty() {
            self.law_id.clone()
        } else if self.articles.len() == 1 {
            format!("{}, art. {}", self.law_id, self.articles[0])
        } else {
            format!("{}, arts. {}", self.law_id, self.articles.join(", "))
        }
    }
}

/// Deduplicate by law id, preserving first-seen order
pub fn dedup_references(references: Vec<LegalReference>) -> Vec<LegalReference> {
    let mut out: Vec<LegalReference> = Vec::new();
    for reference in references {
        if !out.iter().any(|r| r.law_id == reference.law_id) {
            out.push(reference);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_formatting() {
        let reference = LegalReference::new("Llei 5/2014", &["3", "52"]);
        assert_eq!(reference.citation(), "Llei 5/2014, arts. 3, 52");

        let reference = LegalReference::new("Llei 11/2012", &["57"]);
        assert_eq!(reference.citation(), "Llei 11/2012, art. 57");
    }

    #[test]
    fn test_dedup_preserves_order() {
        let refs = vec![
            LegalReference::new("Llei 5/2014", &["3"]),
            LegalReference::new("Llei 11/2012", &["57"]),
            LegalReference::new("Llei 5/2014", &["52"]),
        ];
        let deduped = dedup_references(refs);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].law_id, "Llei 5/2014");
        assert_eq!(deduped[1].law_id, "Llei 11/2012");
    }
}
