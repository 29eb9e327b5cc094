//! Property-based tests for MailGen core domain models
//!
//! Validates universal properties of the substitution engine and the
//! customization resolver: idempotence on token-free text, stability under
//! re-substitution, and the flat > nested > default resolution order.

use proptest::prelude::*;
use serde_json::json;

use crate::customization::CustomizationSet;
use crate::placeholder::PlaceholderBindings;
use crate::prospect::Prospect;

// Token-free text: no braces, no backslashes.
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?'-]{0,80}"
}

// Binding values that cannot introduce new tokens or escapes.
fn arb_binding_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,20}"
}

prop_compose! {
    fn arb_bindings()(
        name in arb_binding_value(),
        company in arb_binding_value(),
        sender_name in arb_binding_value(),
        sender_company in arb_binding_value()
    ) -> PlaceholderBindings {
        PlaceholderBindings::new(name, company, sender_name, sender_company)
    }
}

proptest! {
    #[test]
    fn substitution_is_identity_on_token_free_text(
        text in arb_plain_text(),
        bindings in arb_bindings()
    ) {
        prop_assert_eq!(bindings.substitute(&text), text);
    }

    #[test]
    fn substitution_is_stable_under_resubstitution(
        prefix in arb_plain_text(),
        suffix in arb_plain_text(),
        bindings in arb_bindings()
    ) {
        // One pass resolves every recognized token; a second pass over the
        // result must change nothing (no double-substitution artifacts).
        let text = format!("{}{{name}} of {{company}}{}", prefix, suffix);
        let once = bindings.substitute(&text);
        prop_assert_eq!(bindings.substitute(&once), once);
    }

    #[test]
    fn flat_layer_always_wins(
        flat in arb_binding_value(),
        nested in arb_binding_value(),
        fallback in arb_binding_value()
    ) {
        let set: CustomizationSet = serde_json::from_value(json!({
            "headerTitle": flat.clone(),
            "customizations": { "headerTitle": nested }
        })).unwrap();
        prop_assert_eq!(set.resolve_str("headerTitle", &fallback), flat);
    }

    #[test]
    fn unknown_fields_fall_back(
        fallback in arb_binding_value()
    ) {
        let set: CustomizationSet = serde_json::from_value(json!({
            "customizations": { "somethingElse": "x" }
        })).unwrap();
        prop_assert_eq!(set.resolve_str("headerTitle", &fallback), fallback);
    }

    #[test]
    fn display_name_is_never_empty(
        local in "[a-z0-9._]{1,20}",
        domain in "[a-z]{2,12}"
    ) {
        let prospect = Prospect::new(format!("{}@{}.com", local, domain));
        prop_assert!(!prospect.display_name().is_empty());
        prop_assert!(!prospect.company_label().is_empty());
    }
}
