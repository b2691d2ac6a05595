//! Conversation-history topic tagging
//!
//! Deliberately independent from the intent classifier: a flat word check on
//! the raw message, with its own (smaller) keyword sets. The two can
//! disagree on the same message; history tags are coarse hints for the host
//! UI, not classification.

const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "income_tax",
        &["irpf", "renda", "renta", "income", "salary", "salari", "salario", "revenu"],
    ),
    (
        "corporate_tax",
        &["societats", "sociedades", "corporate", "empresa", "company"],
    ),
    ("indirect_tax", &["igi", "iva", "vat"]),
    (
        "capital_gains",
        &["plusvàlua", "plusvalía", "guany", "ganancia", "gain", "sold", "venut"],
    ),
    (
        "inheritance",
        &["herència", "herencia", "inheritance", "héritage", "donació", "donación"],
    ),
    (
        "non_resident",
        &["non-resident", "resident", "irnr", "withholding", "retenció", "retención"],
    ),
];

/// Tag a raw message with coarse topic labels
pub fn tag_topics(raw: &str) -> Vec<String> {
    let lowered = raw.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .collect();

    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| words.contains(k)))
        .map(|(topic, _)| topic.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_by_word_membership() {
        assert_eq!(
            tag_topics("How much income tax on my salary?"),
            vec!["income_tax".to_string()]
        );
        assert_eq!(
            tag_topics("IGI sobre serveis, si us plau"),
            vec!["indirect_tax".to_string()]
        );
        assert!(tag_topics("hola").is_empty());
    }

    #[test]
    fn test_multiple_topics() {
        let tags = tag_topics("Income tax for a non-resident with dividends");
        assert!(tags.contains(&"income_tax".to_string()));
        assert!(tags.contains(&"non_resident".to_string()));
    }

    #[test]
    fn test_divergence_from_classifier_is_possible() {
        // The intent classifier reads "nòmina" as income; the history
        // tagger's smaller keyword set does not know the word. The
        // divergence is intentional and preserved.
        assert!(tag_topics("Quant pagaré per la meva nòmina de 30.000?").is_empty());
    }
}
