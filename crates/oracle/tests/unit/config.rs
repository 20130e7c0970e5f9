//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, validation and
//! file loading.

use std::io::Write;
use std::path::PathBuf;

use oracle_prefetch::common::ConfigError;
use oracle_prefetch::config::{ConfigOverrides, OracleConfig, RequestorId};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = OracleConfig::default();
    assert_eq!(config.prediction_file, PathBuf::new());
    assert_eq!(config.distance, 250);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.requestor_id, RequestorId(0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_full() {
    let json = r#"{
        "prediction_file": "./test/prefetch.txt",
        "distance": 32,
        "block_size": 128,
        "requestor_id": 7
    }"#;
    let config = OracleConfig::from_json(json).unwrap();
    assert_eq!(config.prediction_file, PathBuf::from("./test/prefetch.txt"));
    assert_eq!(config.distance, 32);
    assert_eq!(config.block_size, 128);
    assert_eq!(config.requestor_id, RequestorId(7));
}

#[test]
fn test_json_partial_uses_defaults() {
    let config = OracleConfig::from_json(r#"{ "prediction_file": "p.txt" }"#).unwrap();
    assert_eq!(config.distance, 250);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.requestor_id, RequestorId(0));
}

#[test]
fn test_json_zero_distance_is_valid() {
    let config = OracleConfig::from_json(r#"{ "distance": 0 }"#).unwrap();
    assert_eq!(config.distance, 0);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(48)]
#[case(100)]
fn test_invalid_block_size_rejected(#[case] block_size: usize) {
    let json = format!(r#"{{ "block_size": {block_size} }}"#);
    let err = OracleConfig::from_json(&json).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBlockSize(b) if b == block_size));
}

#[rstest]
#[case(1)]
#[case(32)]
#[case(64)]
#[case(4096)]
fn test_power_of_two_block_size_accepted(#[case] block_size: usize) {
    let config = OracleConfig::default().with_block_size(block_size);
    assert!(config.validate().is_ok());
}

#[test]
fn test_malformed_json_rejected() {
    let err = OracleConfig::from_json(r#"{ "distance": -1 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));

    let err = OracleConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "distance": 4, "requestor_id": 2 }"#)
        .unwrap();
    file.flush().unwrap();

    let config = OracleConfig::from_file(file.path()).unwrap();
    assert_eq!(config.distance, 4);
    assert_eq!(config.requestor_id, RequestorId(2));
}

#[test]
fn test_from_missing_file() {
    let err = OracleConfig::from_file("/nonexistent/oracle.json").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/oracle.json")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_builders() {
    let config = OracleConfig::default()
        .with_prediction_file("trace.txt")
        .with_distance(9)
        .with_block_size(32)
        .with_requestor_id(RequestorId(5));
    assert_eq!(config.prediction_file, PathBuf::from("trace.txt"));
    assert_eq!(config.distance, 9);
    assert_eq!(config.block_size, 32);
    assert_eq!(config.requestor_id, RequestorId(5));
}

/// Flags given on the command line win over the config file.
#[test]
fn test_overrides_replace_file_values() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{ "prediction_file": "file.txt", "distance": 4, "block_size": 128, "requestor_id": 2 }"#,
    )
    .unwrap();
    file.flush().unwrap();

    let config = OracleConfig::from_file(file.path())
        .unwrap()
        .with_overrides(ConfigOverrides {
            prediction_file: Some(PathBuf::from("flag.txt")),
            distance: Some(16),
            block_size: Some(32),
            requestor_id: Some(RequestorId(9)),
        });

    assert_eq!(config.prediction_file, PathBuf::from("flag.txt"));
    assert_eq!(config.distance, 16);
    assert_eq!(config.block_size, 32);
    assert_eq!(config.requestor_id, RequestorId(9));
}

#[test]
fn test_unset_overrides_keep_file_values() {
    let config = OracleConfig::from_json(r#"{ "prediction_file": "file.txt", "distance": 4 }"#)
        .unwrap()
        .with_overrides(ConfigOverrides {
            block_size: Some(256),
            ..ConfigOverrides::default()
        });

    assert_eq!(config.prediction_file, PathBuf::from("file.txt"));
    assert_eq!(config.distance, 4);
    assert_eq!(config.block_size, 256);
    assert_eq!(config.requestor_id, RequestorId(0));
}

/// Overrides are validated when the engine is built, not when applied.
#[test]
fn test_invalid_override_fails_validation() {
    let config = OracleConfig::default().with_overrides(ConfigOverrides {
        block_size: Some(48),
        ..ConfigOverrides::default()
    });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidBlockSize(48))
    ));
}
