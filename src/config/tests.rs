//! Tests for the config module

use super::loader::{apply_overrides, parse_with_warnings};
use super::types::*;
use crate::error::RedeployError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse(toml: &str) -> Config {
    parse_with_warnings(toml, Path::new("redeploy.toml")).unwrap().0
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.workspace_name().is_none());
    assert_eq!(config.state.provider, StateProviderKind::Local);
    assert_eq!(config.state.directory, Path::new(".redeploy"));
    assert!(config.dns_domains().unwrap().is_empty());
}

#[test]
fn test_config_parse_multi_domain() {
    let config = parse(
        r#"
name = "shop"

[state]
provider = "remote"

[dns."example.com"]
provider = "hostinger"
ttl = 600

[dns."example.io"]
provider = "route53"
hosted_zone_id = "Z123"
"#,
    );

    assert_eq!(config.workspace_name(), Some("shop"));
    assert_eq!(config.state.provider, StateProviderKind::Remote);

    let domains = config.dns_domains().unwrap();
    assert_eq!(domains.len(), 2);

    let com = domains.get("example.com").unwrap();
    assert_eq!(com.provider, DnsProviderKind::Hostinger);
    assert_eq!(com.ttl(), 600);

    let io = domains.get("example.io").unwrap();
    assert_eq!(io.provider, DnsProviderKind::Route53);
    assert_eq!(io.ttl(), DEFAULT_TTL);
    assert_eq!(io.option("hosted_zone_id"), Some("Z123"));
}

#[test]
fn test_config_parse_legacy_dns_normalizes() {
    let config = parse(
        r#"
[dns]
provider = "hostinger"
domain = "Example.COM."
api_token_env = "MY_TOKEN"
"#,
    );

    assert!(matches!(config.dns, Some(DnsConfig::Legacy(_))));

    let domains = config.dns_domains().unwrap();
    let names: Vec<_> = domains.names().collect();
    assert_eq!(names, vec!["example.com"]);

    let settings = domains.get("example.com").unwrap();
    assert_eq!(settings.provider, DnsProviderKind::Hostinger);
    assert_eq!(settings.option("api_token_env"), Some("MY_TOKEN"));
    assert_eq!(settings.ttl(), 300);
}

#[test]
fn test_config_parse_manual_and_cloudflare() {
    let config = parse(
        r#"
[dns."a.com"]
provider = "manual"

[dns."b.com"]
provider = "cloudflare"
"#,
    );

    let domains = config.dns_domains().unwrap();
    assert_eq!(domains.get("a.com").unwrap().provider, DnsProviderKind::Manual);
    assert_eq!(
        domains.get("b.com").unwrap().provider,
        DnsProviderKind::Cloudflare
    );
}

#[test]
fn test_config_unknown_dns_provider_is_parse_error() {
    let result = parse_with_warnings(
        r#"
[dns."a.com"]
provider = "godaddy"
"#,
        Path::new("redeploy.toml"),
    );

    assert!(matches!(result, Err(RedeployError::ConfigParse { .. })));
}

#[test]
fn test_duplicate_domain_spellings_rejected() {
    let config = parse(
        r#"
[dns."example.com"]
provider = "manual"

[dns."EXAMPLE.com"]
provider = "manual"
"#,
    );

    let err = config.dns_domains().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_unknown_key_warning_with_suggestion() {
    let (_config, warnings) = parse_with_warnings(
        r#"
nmae = "shop"

[state]
directroy = ".state"
"#,
        Path::new("redeploy.toml"),
    )
    .unwrap();

    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].key, "nmae");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("name"));
    assert_eq!(warnings[1].suggestion.as_deref(), Some("directory"));
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("REDEPLOY_WORKSPACE_NAME", " shop "),
        ("REDEPLOY_STATE_PROVIDER", "REMOTE"),
        ("REDEPLOY_STATE_DIR", "/tmp/state"),
    ]
    .into_iter()
    .collect();

    let config = apply_overrides(Config::default(), |key| {
        env.get(key).map(|v| v.to_string())
    });

    assert_eq!(config.workspace_name(), Some("shop"));
    assert_eq!(config.state.provider, StateProviderKind::Remote);
    assert_eq!(config.state.directory, Path::new("/tmp/state"));
}

#[test]
fn test_env_override_invalid_provider_ignored() {
    let config = apply_overrides(Config::default(), |key| {
        (key == "REDEPLOY_STATE_PROVIDER").then(|| "carrier-pigeon".to_string())
    });

    assert_eq!(config.state.provider, StateProviderKind::Local);
}

#[test]
fn test_load_with_warnings_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("redeploy.toml");
    fs::write(&path, "name = \"shop\"\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert_eq!(config.workspace_name(), Some("shop"));
    assert!(warnings.is_empty());
}

#[test]
fn test_state_directory_resolves_against_root() {
    let config = Config::default();
    assert_eq!(
        config.state_directory(Path::new("/work")),
        Path::new("/work/.redeploy")
    );
}

#[test]
fn test_blank_workspace_name_is_none() {
    let config = parse("name = \"  \"\n");
    assert!(config.workspace_name().is_none());
}
