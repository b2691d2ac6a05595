//! Entity extraction
//!
//! Scans normalised text for monetary amounts (locale-aware separators, "k"
//! suffix), income-type tags and the auxiliary captures the calculators bind
//! from: holding years, kinship, treaty country and corporate regime.
//! Malformed numeric tokens are skipped silently and never reach `amounts`.

use tracing::debug;

use fiscal_core::{ExtractedEntities, QueryFacts, Relationship};

use crate::patterns::{
    AMOUNT_TOKEN, COUNTRY_RULES, HOLDING_YEARS, INCOME_TYPE_RULES, PERCENT_TOKEN,
    REGIME_RULES, RELATIONSHIP_RULES,
};

/// Stateless extractor over the compiled pattern library
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract everything the router and binding strategies need from one
    /// normalised message
    pub fn analyze(&self, normalized: &str) -> QueryFacts {
        QueryFacts {
            entities: self.extract_entities(normalized),
            holding_years: self.extract_holding_years(normalized),
            relationship: self.extract_relationship(normalized),
            country: self.extract_country(normalized),
            category: None, // filled by the engine from the knowledge base
            regime: self.extract_regime(normalized),
        }
    }

    /// Amounts, income types and the complexity flag
    pub fn extract_entities(&self, normalized: &str) -> ExtractedEntities {
        let amounts = self.extract_amounts(normalized);
        let income_types = INCOME_TYPE_RULES
            .iter()
            .filter(|(_, regex)| regex.is_match(normalized))
            .map(|(income_type, _)| *income_type)
            .collect::<std::collections::BTreeSet<_>>();
        let complexity = amounts.len() > 1 || income_types.len() > 1;
        ExtractedEntities {
            amounts,
            income_types,
            complexity,
        }
    }

    /// Monetary amounts in textual order. Tokens claimed by the
    /// holding-years or percentage patterns are masked out first so "3 anys"
    /// and "9,5%" never surface as amounts.
    pub fn extract_amounts(&self, normalized: &str) -> Vec<f64> {
        let masked = mask_pattern(normalized, &HOLDING_YEARS);
        let masked = mask_pattern(&masked, &PERCENT_TOKEN);

        let mut amounts = Vec::new();
        for captures in AMOUNT_TOKEN.captures_iter(&masked) {
            let raw = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let Some(value) = parse_locale_number(raw) else {
                debug!(token = raw, "skipping malformed numeric token");
                continue;
            };
            let value = if captures.get(2).is_some() {
                value * 1_000.0
            } else {
                value
            };
            amounts.push(value);
        }
        amounts
    }

    /// Holding period in full years, when stated
    pub fn extract_holding_years(&self, normalized: &str) -> Option<u32> {
        HOLDING_YEARS
            .captures(normalized)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Kinship mentioned in the message; first matching rule wins
    pub fn extract_relationship(&self, normalized: &str) -> Option<Relationship> {
        RELATIONSHIP_RULES
            .iter()
            .find(|(_, regex)| regex.is_match(normalized))
            .map(|(relationship, _)| *relationship)
    }

    /// Treaty-partner country key, when one is named
    pub fn extract_country(&self, normalized: &str) -> Option<String> {
        COUNTRY_RULES
            .iter()
            .find(|(_, regex)| regex.is_match(normalized))
            .map(|(key, _)| key.to_string())
    }

    /// Corporate special-regime key, when one is named
    pub fn extract_regime(&self, normalized: &str) -> Option<String> {
        REGIME_RULES
            .iter()
            .find(|(_, regex)| regex.is_match(normalized))
            .map(|(key, _)| key.to_string())
    }
}

/// Replace every match of `regex` with spaces, preserving offsets
fn mask_pattern(text: &str, regex: &regex::Regex) -> String {
    let mut out = text.to_string();
    for m in regex.find_iter(text) {
        out.replace_range(m.range(), &" ".repeat(m.len()));
    }
    out
}

/// Resolve a numeric token with either `1.234,56` or `1,234.56` separator
/// conventions. Returns `None` for ragged groupings such as "1,23,45".
fn parse_locale_number(raw: &str) -> Option<f64> {
    let token = raw.trim_matches(|c| c == '.' || c == ',');
    if token.is_empty() {
        return None;
    }
    let dots = token.matches('.').count();
    let commas = token.matches(',').count();

    let canonical = if dots > 0 && commas > 0 {
        // The separator that occurs last is the decimal point
        let last_dot = token.rfind('.').unwrap_or(0);
        let last_comma = token.rfind(',').unwrap_or(0);
        if last_dot > last_comma {
            let integral = token.replace(',', "");
            valid_decimal(&integral).then_some(integral)?
        } else {
            let swapped = token.replace('.', "").replace(',', ".");
            valid_decimal(&swapped).then_some(swapped)?
        }
    } else if dots + commas == 1 {
        let separator = if dots == 1 { '.' } else { ',' };
        let fraction_len = token.len() - token.rfind(separator).unwrap_or(0) - 1;
        if fraction_len == 3 {
            // Exactly three digits after a lone separator is a thousands
            // group: "50.000" and "50,000" both mean fifty thousand
            token.replace(separator, "")
        } else {
            token.replace(',', ".")
        }
    } else if dots > 1 || commas > 1 {
        let separator = if dots > 1 { '.' } else { ',' };
        let groups: Vec<&str> = token.split(separator).collect();
        if groups[1..].iter().all(|g| g.len() == 3)
            && groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit()))
        {
            token.replace(separator, "")
        } else {
            return None;
        }
    } else {
        token.to_string()
    };

    canonical.parse().ok()
}

fn valid_decimal(candidate: &str) -> bool {
    candidate.chars().filter(|c| *c == '.').count() <= 1
        && candidate
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_core::IncomeType;

    #[test]
    fn test_amounts_keep_textual_order() {
        let extractor = EntityExtractor::new();
        let amounts =
            extractor.extract_amounts("i sold it for 150.000 after buying at 300.000");
        assert_eq!(amounts, vec![150_000.0, 300_000.0]);
    }

    #[test]
    fn test_locale_separator_resolution() {
        assert_eq!(parse_locale_number("50.000,50"), Some(50_000.5));
        assert_eq!(parse_locale_number("50,000.50"), Some(50_000.5));
        assert_eq!(parse_locale_number("1.234.567"), Some(1_234_567.0));
        assert_eq!(parse_locale_number("50.000"), Some(50_000.0));
        assert_eq!(parse_locale_number("12,5"), Some(12.5));
        assert_eq!(parse_locale_number("3.5"), Some(3.5));
        assert_eq!(parse_locale_number("1200"), Some(1_200.0));
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        assert_eq!(parse_locale_number("1,23,45"), None);
        assert_eq!(parse_locale_number("1.2.3"), None);

        let extractor = EntityExtractor::new();
        let amounts = extractor.extract_amounts("pay 1,23,45 then 500");
        assert_eq!(amounts, vec![500.0]);
    }

    #[test]
    fn test_k_suffix_multiplies() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amounts("a salary of 50k"), vec![50_000.0]);
        assert_eq!(extractor.extract_amounts("about 7.5k"), vec![7_500.0]);
    }

    #[test]
    fn test_years_and_percentages_are_not_amounts() {
        let extractor = EntityExtractor::new();
        let text = "sold for 300.000, bought at 150.000, held 3 years at 9,5%";
        assert_eq!(
            extractor.extract_amounts(text),
            vec![300_000.0, 150_000.0]
        );
        assert_eq!(extractor.extract_holding_years(text), Some(3));
    }

    #[test]
    fn test_income_types_multilingual() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract_entities("el meu salari i els dividends");
        assert!(entities.income_types.contains(&IncomeType::Salary));
        assert!(entities.income_types.contains(&IncomeType::Dividends));
        assert!(entities.complexity, "two income types set the flag");

        let entities = extractor.extract_entities("ingresos del alquiler");
        assert!(entities.income_types.contains(&IncomeType::Rental));

        let entities = extractor.extract_entities("je suis indépendant");
        assert!(entities.income_types.contains(&IncomeType::Freelance));
    }

    #[test]
    fn test_complexity_flag_from_amounts() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract_entities("earn 30000 from salary and 5000 more");
        assert!(entities.complexity);

        let entities = extractor.extract_entities("income of 50000");
        assert!(!entities.complexity);
    }

    #[test]
    fn test_relationship_extraction() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_relationship("els meus fills hereten"),
            Some(Relationship::Child)
        );
        assert_eq!(
            extractor.extract_relationship("ma femme... mon épouse"),
            Some(Relationship::Spouse)
        );
        assert_eq!(extractor.extract_relationship("a friend"), None);
    }

    #[test]
    fn test_country_extraction() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_country("dividends from spain"),
            Some("spain".to_string())
        );
        assert_eq!(
            extractor.extract_country("visc a frança"),
            Some("france".to_string())
        );
        assert_eq!(extractor.extract_country("from atlantis"), None);
    }

    #[test]
    fn test_regime_extraction() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_regime("our patent licensing company"),
            Some("patent_box".to_string())
        );
        assert_eq!(
            extractor.extract_regime("a holding structure"),
            Some("holding".to_string())
        );
    }
}
