use super::*;
use std::collections::HashMap;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + '_ {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

/// Test that an empty environment yields the documented defaults
#[test]
fn test_defaults() {
    let config = Config::from_lookup(|_| None).unwrap();

    assert_eq!(config.instance_id, None);
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.topic_arn, None);
    assert_eq!(config.webhook_token, None);
    assert_eq!(config.poll_interval, Duration::from_secs(10));
    assert_eq!(config.poll_max_attempts, 60);
    assert_eq!(config.port, 8080);
}

/// Test a fully specified environment
#[test]
fn test_full_configuration() {
    let vars = [
        ("INSTANCE_ID", "i-abc"),
        ("AWS_REGION", "eu-north-1"),
        ("SNS_TOPIC_ARN", "arn:aws:sns:eu-north-1:123:reboots"),
        ("WEBHOOK_TOKEN", "s3cret"),
        ("KUNTO_POLL_INTERVAL_SECS", "5"),
        ("KUNTO_POLL_MAX_ATTEMPTS", "12"),
        ("KUNTO_PORT", "9090"),
    ];
    let config = Config::from_lookup(lookup_from(&vars)).unwrap();

    assert_eq!(config.instance_id.as_deref(), Some("i-abc"));
    assert_eq!(config.region, "eu-north-1");
    assert_eq!(
        config.topic_arn.as_deref(),
        Some("arn:aws:sns:eu-north-1:123:reboots")
    );
    assert_eq!(config.webhook_token.as_deref(), Some("s3cret"));
    assert_eq!(config.poll_interval, Duration::from_secs(5));
    assert_eq!(config.poll_max_attempts, 12);
    assert_eq!(config.port, 9090);
}

/// Test that AWS_DEFAULT_REGION is the fallback when AWS_REGION is unset
#[test]
fn test_region_fallback() {
    let vars = [("AWS_DEFAULT_REGION", "ap-southeast-2")];
    let config = Config::from_lookup(lookup_from(&vars)).unwrap();
    assert_eq!(config.region, "ap-southeast-2");

    let both = [
        ("AWS_REGION", "us-west-2"),
        ("AWS_DEFAULT_REGION", "ap-southeast-2"),
    ];
    let config = Config::from_lookup(lookup_from(&both)).unwrap();
    assert_eq!(config.region, "us-west-2");
}

/// Test that values are trimmed and empty strings count as unset
///
/// An operator setting WEBHOOK_TOKEN="" expects the auth check disabled,
/// not a gate that only accepts empty headers.
#[test]
fn test_empty_and_whitespace_values_are_unset() {
    let vars = [
        ("INSTANCE_ID", "  i-abc  "),
        ("WEBHOOK_TOKEN", ""),
        ("SNS_TOPIC_ARN", "   "),
    ];
    let config = Config::from_lookup(lookup_from(&vars)).unwrap();

    assert_eq!(config.instance_id.as_deref(), Some("i-abc"));
    assert_eq!(config.webhook_token, None);
    assert_eq!(config.topic_arn, None);
}

/// Test that a malformed numeric knob fails at startup
#[test]
fn test_invalid_poll_interval_is_an_error() {
    let vars = [("KUNTO_POLL_INTERVAL_SECS", "ten")];
    let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidNumber { ref key, .. } if key == "KUNTO_POLL_INTERVAL_SECS"
    ));
}

/// Test that a malformed attempt budget fails at startup
#[test]
fn test_invalid_max_attempts_is_an_error() {
    let vars = [("KUNTO_POLL_MAX_ATTEMPTS", "-1")];
    let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}
