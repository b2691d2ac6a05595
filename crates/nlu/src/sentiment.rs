//! Lexical sentiment scoring
//!
//! Counts multilingual positive/negative lexicon hits plus punctuation
//! density and maps them onto the small fixed label set in
//! [`fiscal_core::Sentiment`]. The label annotates the response; it does not
//! feed the confidence score.

use unicode_segmentation::UnicodeSegmentation;

use fiscal_core::Sentiment;

use crate::patterns::{NEGATIVE_WORDS, POSITIVE_WORDS, URGENT_WORDS};

/// Outcome of the sentiment scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentReading {
    pub label: Sentiment,
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub exclamations: usize,
}

/// Score normalised text
pub fn read_sentiment(normalized: &str) -> SentimentReading {
    let words: std::collections::HashSet<&str> = normalized.unicode_words().collect();

    let positive_hits = POSITIVE_WORDS.iter().filter(|w| words.contains(**w)).count();
    let negative_hits = NEGATIVE_WORDS.iter().filter(|w| words.contains(**w)).count();
    let exclamations = normalized.matches('!').count();
    let urgent =
        exclamations >= 2 || URGENT_WORDS.iter().any(|w| words.contains(*w));

    let label = if urgent {
        Sentiment::Urgent
    } else if positive_hits > negative_hits {
        Sentiment::Positive
    } else if negative_hits > positive_hits {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    SentimentReading {
        label,
        positive_hits,
        negative_hits,
        exclamations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_multilingual() {
        assert_eq!(
            read_sentiment("moltes gràcies, perfecte").label,
            Sentiment::Positive
        );
        assert_eq!(read_sentiment("merci, parfait").label, Sentiment::Positive);
    }

    #[test]
    fn test_negative() {
        assert_eq!(
            read_sentiment("estic preocupat per una multa").label,
            Sentiment::Negative
        );
        assert_eq!(
            read_sentiment("i am worried about a penalty").label,
            Sentiment::Negative
        );
    }

    #[test]
    fn test_urgent_from_punctuation_density() {
        assert_eq!(
            read_sentiment("necessito la resposta!! ja!!").label,
            Sentiment::Urgent
        );
        assert_eq!(read_sentiment("es urgente").label, Sentiment::Urgent);
    }

    #[test]
    fn test_neutral_default() {
        let reading = read_sentiment("quant es paga de renda?");
        assert_eq!(reading.label, Sentiment::Neutral);
        assert_eq!(reading.positive_hits, 0);
        assert_eq!(reading.negative_hits, 0);
    }
}
