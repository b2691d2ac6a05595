//! Question-language detection
//!
//! A lightweight marker-word vote across the four supported languages. The
//! result annotates the response and session state; answers themselves are
//! rendered by the host UI, so nothing downstream branches on it.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Languages the pattern library covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Catalan,
    Spanish,
    French,
    English,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Catalan => "ca",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::English => "en",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Catalan => "Catalan",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::English => "English",
        }
    }

    /// Detect the dominant language of normalised text, if any marker words
    /// are present at all
    pub fn detect(normalized: &str) -> Option<Language> {
        const MARKERS: &[(Language, &[&str])] = &[
            (
                Language::Catalan,
                &[
                    "quant", "impost", "pagaré", "pagar", "renda", "societats", "guany",
                    "herència", "lloguer", "anys", "meu", "meva", "què", "és", "amb",
                ],
            ),
            (
                Language::Spanish,
                &[
                    "cuánto", "cuanto", "impuesto", "renta", "sociedades", "ganancia",
                    "herencia", "alquiler", "años", "qué", "cómo", "del", "por", "para",
                ],
            ),
            (
                Language::French,
                &[
                    "combien", "impôt", "revenu", "sociétés", "plus-value", "héritage",
                    "loyer", "ans", "mon", "quel", "payer", "je", "est", "pour",
                ],
            ),
            (
                Language::English,
                &[
                    "how", "much", "tax", "income", "what", "pay", "years", "the", "my",
                    "is", "on", "will",
                ],
            ),
        ];

        let words: std::collections::HashSet<&str> = normalized.unicode_words().collect();
        let mut best: Option<(Language, usize)> = None;
        for (language, markers) in MARKERS {
            let hits = markers.iter().filter(|m| words.contains(**m)).count();
            if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
                best = Some((*language, hits));
            }
        }
        best.map(|(language, _)| language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_language() {
        assert_eq!(
            Language::detect("quant impost pagaré amb la meva renda?"),
            Some(Language::Catalan)
        );
        assert_eq!(
            Language::detect("cuánto impuesto sobre la renta por el alquiler"),
            Some(Language::Spanish)
        );
        assert_eq!(
            Language::detect("combien d'impôt sur le revenu pour mon loyer"),
            Some(Language::French)
        );
        assert_eq!(
            Language::detect("how much income tax will i pay"),
            Some(Language::English)
        );
    }

    #[test]
    fn test_no_markers_yields_none() {
        assert_eq!(Language::detect("xyz"), None);
        assert_eq!(Language::detect(""), None);
    }
}
