//! Property tests for generate-once secrets.

use proptest::prelude::*;

use redeploy::DeployState;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A secret is generated once and never touches other pairs.
    #[test]
    fn property_secrets_are_stable_and_isolated(
        app in "[a-z][a-z0-9-]{0,10}",
        name in "[A-Z][A-Z0-9_]{0,15}",
        other_app in "[a-z][a-z0-9-]{0,10}",
    ) {
        prop_assume!(app != other_app);
        let mut state = DeployState::new("production", "proj", "env");

        let first = state.get_or_generate_secret(&app, &name);
        let other = state.get_or_generate_secret(&other_app, &name);
        let again = state.get_or_generate_secret(&app, &name);

        prop_assert_eq!(&first, &again);
        prop_assert_ne!(&first, &other);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
