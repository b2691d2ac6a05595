//! End-to-end pipeline tests over the public entry point

use fiscal_core::{
    CalculationKind, ConversationContext, Residency, UserProfile, MAX_PREVIOUS_MESSAGES,
};
use fiscal_engine::{FiscalEngine, MAX_LOG_ENTRIES};

fn engine() -> FiscalEngine {
    FiscalEngine::new()
}

#[test]
fn income_tax_scenario() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "Quant pagaré d'impost sobre la renda amb un salari de 50.000?",
        &mut context,
    );

    let calc = response.calculations.expect("income calculator ran");
    assert_eq!(calc.kind, CalculationKind::IncomeTax);
    assert_eq!(calc.taxable_base, 47_000.0);
    assert_eq!(calc.tax, 1_500.0);
    assert_eq!(calc.effective_rate, "3.19");
    assert!(response
        .law_references
        .iter()
        .any(|r| r.law_id == "Llei 5/2014"));
}

#[test]
fn indirect_tax_scenario() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "How much IGI do I pay on 1.200 of banking services?",
        &mut context,
    );

    let calc = response.calculations.expect("indirect calculator ran");
    assert_eq!(calc.kind, CalculationKind::IndirectTax);
    assert_eq!(calc.tax, 114.0);
    assert_eq!(calc.gross_total, Some(1_314.0));
    assert_eq!(calc.effective_rate, "9.50");
}

#[test]
fn property_gain_scenario() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "I sold my apartment for 300.000, bought it for 150.000, held 3 years. Capital gain?",
        &mut context,
    );

    let calc = response.calculations.expect("gain calculator ran");
    assert_eq!(calc.kind, CalculationKind::PropertyGain);
    assert_eq!(calc.taxable_base, 150_000.0);
    assert_eq!(calc.tax, 19_500.0);
    assert_eq!(calc.effective_rate, "13.00");
}

#[test]
fn inheritance_scenario() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "My children inherit 200.000, how much inheritance tax is due?",
        &mut context,
    );

    let calc = response.calculations.expect("inheritance calculator ran");
    assert_eq!(calc.kind, CalculationKind::InheritanceTax);
    assert_eq!(calc.taxable_base, 153_000.0);
    assert_eq!(calc.tax, 12_950.0);
}

#[test]
fn treaty_withholding_scenario() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "As a non-resident from Spain I receive 10.000 in dividends, what is withheld?",
        &mut context,
    );

    let calc = response.calculations.expect("withholding calculator ran");
    assert_eq!(calc.kind, CalculationKind::Withholding);
    // Treaty dividend rate, not the generic 10% flat rate
    assert_eq!(calc.tax, 500.0);
    assert!(calc.regime.as_deref().unwrap().contains("Spain"));
}

#[test]
fn short_ambiguous_message_falls_back() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message("hm ok", &mut context);

    assert!(response.calculations.is_none());
    assert!(response.confidence > 0.0 && response.confidence < 0.9);
    assert!(!response.follow_up_questions.is_empty());
    assert!(!response.text.is_empty());
}

#[test]
fn non_resident_profile_bypasses_brackets() {
    let engine = engine();
    let mut context = ConversationContext::new().with_profile(UserProfile {
        display_name: None,
        residency: Residency::NonResident,
    });
    let response =
        engine.process_message("How much income tax on a salary of 30.000?", &mut context);

    let calc = response.calculations.expect("flat path ran");
    assert_eq!(calc.tax, 3_000.0);
    assert_eq!(calc.regime.as_deref(), Some("non-resident flat rate"));
}

#[test]
fn history_window_stays_bounded() {
    let engine = engine();
    let mut context = ConversationContext::new();
    for i in 0..(MAX_PREVIOUS_MESSAGES + 15) {
        engine.process_message(&format!("What is the IGI? ({i})"), &mut context);
    }
    assert_eq!(context.previous_messages.len(), MAX_PREVIOUS_MESSAGES);
    assert_eq!(
        context.message_count,
        (MAX_PREVIOUS_MESSAGES + 15) as u64
    );
}

#[test]
fn interaction_log_stays_bounded_and_session_keyed() {
    let engine = engine();
    let mut context_a = ConversationContext::with_session_id("session-a");
    let mut context_b = ConversationContext::with_session_id("session-b");

    for i in 0..(MAX_LOG_ENTRIES + 10) {
        engine.process_message(&format!("What is the IGI? ({i})"), &mut context_a);
    }
    engine.process_message("What is income tax?", &mut context_b);

    assert_eq!(engine.interaction_log("session-a").len(), MAX_LOG_ENTRIES);
    assert_eq!(engine.interaction_log("session-b").len(), 1);

    // FIFO eviction: the oldest entries of session-a are gone
    let log_a = engine.interaction_log("session-a");
    assert!(log_a.first().unwrap().query.contains("(10)"));

    // No cross-session leakage
    assert!(log_a.iter().all(|e| e.query.contains("IGI")));
}

#[test]
fn responses_are_idempotent_for_identical_input() {
    let engine = engine();
    let mut context_a = ConversationContext::new();
    let mut context_b = ConversationContext::new();

    let a = engine.process_message("How much IGI on 1.200 of services?", &mut context_a);
    let b = engine.process_message("How much IGI on 1.200 of services?", &mut context_b);

    assert_eq!(a.text, b.text);
    assert_eq!(
        a.calculations.as_ref().unwrap().tax,
        b.calculations.as_ref().unwrap().tax
    );
}

#[test]
fn response_envelope_serializes() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine.process_message(
        "How much income tax will I pay on 50.000?",
        &mut context,
    );

    let json = serde_json::to_string(&response).expect("response serializes");
    let back: fiscal_core::AiResponse = serde_json::from_str(&json).expect("and round-trips");
    assert_eq!(back.calculations.unwrap().tax, 1_500.0);
}

#[tokio::test]
async fn async_wrapper_resolves_inline() {
    let engine = engine();
    let mut context = ConversationContext::new();
    let response = engine
        .process_message_async("What is the IGI?", &mut context)
        .await;
    assert!(!response.text.is_empty());
    assert_eq!(context.message_count, 1);
}
