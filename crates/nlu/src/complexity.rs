//! Query complexity scoring
//!
//! A base score plus fixed bonuses: designated complex vocabulary, message
//! length bands, numeric-token count, question marks and membership of the
//! detected intent in the complex-intent set. Clamped to [`MAX_SCORE`].

use crate::intent::Intent;
use crate::patterns::COMPLEX_VOCABULARY;

/// Upper clamp for the score
pub const MAX_SCORE: u8 = 10;

const BASE_SCORE: u8 = 1;

/// Score one normalised message
pub fn score_complexity(normalized: &str, intent: Intent, numeric_tokens: usize) -> u8 {
    let mut score = BASE_SCORE;

    if COMPLEX_VOCABULARY.iter().any(|term| normalized.contains(term)) {
        score += 2;
    }

    // Length bands
    let length = normalized.chars().count();
    if length > 160 {
        score += 2;
    } else if length > 80 {
        score += 1;
    }

    if numeric_tokens >= 2 {
        score += 1;
    }

    if normalized.matches('?').count() >= 2 {
        score += 1;
    }

    if intent.is_complex() {
        score += 2;
    }

    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_message_scores_base() {
        assert_eq!(score_complexity("quant es paga?", Intent::General, 0), 1);
    }

    #[test]
    fn test_bonuses_accumulate() {
        let text = "how should i optimize the double taxation treaty treatment of my \
                    international holding? and what about dividends? and royalties?";
        // vocabulary +2, length band +1, two question marks +1, complex
        // intent +2 on top of the base
        let score = score_complexity(text, Intent::Optimization, 0);
        assert_eq!(score, 7);
    }

    #[test]
    fn test_score_is_clamped() {
        let long = "optimize international treaty holding ".repeat(10)
            + "10000 20000 ?? ?? ?? ?? ?? ??";
        let score = score_complexity(&long, Intent::Comparison, 5);
        assert_eq!(score, MAX_SCORE.min(1 + 2 + 2 + 1 + 1 + 2));
    }

    #[test]
    fn test_numeric_tokens_bonus() {
        let one = score_complexity("income of 50000", Intent::ComputeIncomeTax, 1);
        let two = score_complexity("income of 50000 and 20000", Intent::ComputeIncomeTax, 2);
        assert_eq!(two, one + 1);
    }
}
