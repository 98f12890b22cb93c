//! Property tests for root-domain selection and subdomain extraction.

use std::collections::BTreeMap;

use proptest::prelude::*;

use redeploy::domain::services::{
    extract_subdomain, find_root_domain, group_hostnames_by_domain, APEX,
};

fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{0,8}").unwrap()
}

/// Two-label root domain such as `ab3.io`
fn root_domain() -> impl Strategy<Value = String> {
    (label(), label()).prop_map(|(name, tld)| format!("{}.{}", name, tld))
}

/// One to three labels, e.g. `api` or `api.eu`
fn subdomain() -> impl Strategy<Value = String> {
    proptest::collection::vec(label(), 1..=3).prop_map(|labels| labels.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A hostname under a configured domain routes to it.
    #[test]
    fn property_hostname_routes_to_its_domain(domain in root_domain(), sub in subdomain()) {
        let hostname = format!("{}.{}", sub, domain);
        prop_assert_eq!(find_root_domain(&hostname, [domain.as_str()]), Some(domain.as_str()));
        prop_assert_eq!(find_root_domain(&domain, [domain.as_str()]), Some(domain.as_str()));
    }

    /// PROPERTY: The longest configured suffix wins, whatever the order.
    #[test]
    fn property_most_specific_domain_wins(
        domain in root_domain(),
        zone in label(),
        host in label(),
        reversed in any::<bool>(),
    ) {
        let nested = format!("{}.{}", zone, domain);
        let hostname = format!("{}.{}", host, nested);
        let mut domains = vec![domain.as_str(), nested.as_str()];
        if reversed {
            domains.reverse();
        }

        prop_assert_eq!(find_root_domain(&hostname, domains), Some(nested.as_str()));
    }

    /// PROPERTY: Sharing a string suffix without a label boundary never matches.
    #[test]
    fn property_no_substring_false_positive(domain in root_domain(), prefix in "[a-z0-9]{1,8}") {
        let hostname = format!("{}{}", prefix, domain);
        prop_assert_eq!(find_root_domain(&hostname, [domain.as_str()]), None);
    }

    /// PROPERTY: Extraction strips exactly the root, the apex becomes `@`.
    #[test]
    fn property_extract_subdomain_inverts_join(domain in root_domain(), sub in subdomain()) {
        let hostname = format!("{}.{}", sub, domain);
        prop_assert_eq!(extract_subdomain(&hostname, &domain).unwrap(), sub);
        prop_assert_eq!(extract_subdomain(&domain, &domain).unwrap(), APEX);
    }

    /// PROPERTY: Extracting against a foreign root is an error.
    #[test]
    fn property_extract_outside_root_fails(
        domain in root_domain(),
        other in root_domain(),
        sub in subdomain(),
    ) {
        prop_assume!(domain != other);
        let hostname = format!("{}.{}", sub, other);
        prop_assume!(!hostname.ends_with(&format!(".{}", domain)));
        prop_assert!(extract_subdomain(&hostname, &domain).is_err());
    }

    /// PROPERTY: Grouping never panics and every hostname lands somewhere.
    #[test]
    fn property_grouping_accounts_for_every_hostname(
        domains in proptest::collection::vec(root_domain(), 0..=3),
        hosts in proptest::collection::btree_map(label(), "[a-z0-9.]{0,24}", 0..=6),
    ) {
        let app_hostnames: BTreeMap<String, String> = hosts;
        let routing = group_hostnames_by_domain(
            &app_hostnames,
            domains.iter().map(String::as_str),
        )
        .unwrap();

        let routed: usize = routing.groups.values().map(Vec::len).sum();
        prop_assert_eq!(routed + routing.unmatched.len(), app_hostnames.len());
    }
}
