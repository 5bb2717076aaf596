//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::driver::{DriverConfig, OutputFormat};
use crate::config::{ConfigLoader, LogConfig, NiihauConfig, Validate};
use crate::data_structures::niihau_trie::{DuplicatePolicy, NiihauTrieError, TextEncoding};
use crate::driver::{Command, CommandExecutor, CommandOutcome};
use crate::error::config::ConfigError;
use crate::error::NiihauError;
use crate::tests::create_test_dir;
use std::fs;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = NiihauConfig::default();
    assert!(config.validate().is_ok());
    assert!(config.trie.case_sensitive);
    assert_eq!(config.trie.encoding, TextEncoding::utf8());
    assert_eq!(config.driver.output, OutputFormat::Text);
    assert_eq!(config.driver.default_max_distance, 2);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = NiihauConfig::default();

    config.driver.default_max_distance = 33;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));

    config.driver.default_max_distance = 32;
    config.log.level = "loud".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));

    config.log = LogConfig::default();
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("config_file_test.toml");

    let config_content = r#"
    [trie]
    case_sensitive = false
    encoding = "latin1"
    duplicate_policy = "multiset"

    [driver]
    output = "json"
    "#;
    fs::write(&config_path, config_content).unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert!(!config.trie.case_sensitive);
    assert_eq!(config.trie.encoding.name(), "windows-1252");
    assert_eq!(config.trie.duplicate_policy, DuplicatePolicy::Multiset);
    assert_eq!(config.driver.output, OutputFormat::Json);

    // Other values should be defaults
    assert!(!config.driver.keep_going);
    assert_eq!(config.log.level, "info");
}

/// Test loading a JSON configuration file.
#[test]
fn test_load_json_config() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "driver": { "keep_going": true } }"#).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON").load().unwrap();
    assert!(config.driver.keep_going);
    assert!(config.trie.case_sensitive);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("config_env_test.toml");
    fs::write(&config_path, "[trie]\ncase_sensitive = true\n").unwrap();

    std::env::set_var("TEST_ENV__TRIE__CASE_SENSITIVE", "false");
    std::env::set_var("TEST_ENV__DRIVER__DEFAULT_MAX_DISTANCE", "5");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load();

    std::env::remove_var("TEST_ENV__TRIE__CASE_SENSITIVE");
    std::env::remove_var("TEST_ENV__DRIVER__DEFAULT_MAX_DISTANCE");

    let config = config.unwrap();
    assert!(!config.trie.case_sensitive);
    assert_eq!(config.driver.default_max_distance, 5);
}

/// Test that an environment override is validated like a file value.
#[test]
fn test_env_var_out_of_range() {
    std::env::set_var("TEST_RANGE__DRIVER__DEFAULT_MAX_DISTANCE", "100");
    let result = ConfigLoader::new(None::<&str>, "TEST_RANGE").load();
    std::env::remove_var("TEST_RANGE__DRIVER__DEFAULT_MAX_DISTANCE");

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange { .. })));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("invalid.toml");
    fs::write(&config_path, "[trie\ncase_sensitive = maybe\"\n").unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that an unknown encoding label is rejected while loading.
#[test]
fn test_load_unknown_encoding() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("encoding.toml");
    fs::write(&config_path, "[trie]\nencoding = \"martian\"\n").unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENCODING");
    let err = loader.load().unwrap_err();
    assert!(err.to_string().contains("martian"));
}

/// Test the file-level failure modes.
#[test]
fn test_missing_and_unsupported_files() {
    let dir = create_test_dir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        ConfigLoader::new(Some(&missing), "TEST_MISSING").load(),
        Err(ConfigError::FileNotFound(path)) if path == missing
    ));

    let ini = dir.path().join("config.ini");
    fs::write(&ini, "[trie]\n").unwrap();
    assert!(matches!(
        ConfigLoader::new(Some(&ini), "TEST_INI").load(),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

/// Test that the generated default configuration loads back unchanged.
#[test]
fn test_generated_config_round_trip() {
    let dir = create_test_dir().unwrap();
    let config_path = dir.path().join("generated.toml");
    let toml = toml::to_string_pretty(&NiihauConfig::default()).unwrap();
    fs::write(&config_path, toml).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_GENERATED").load().unwrap();
    assert_eq!(config.trie, NiihauConfig::default().trie);
    assert_eq!(config.driver.default_max_distance, DriverConfig::default().default_max_distance);
}

/// Test that the library entry point reports loader failures as config errors.
#[test]
fn test_load_config_wraps_errors() {
    let dir = create_test_dir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = crate::load_config(Some(&missing)).unwrap_err();
    assert!(matches!(err, NiihauError::Config(ConfigError::FileNotFound(_))));
    assert!(err.to_string().starts_with("Configuration error:"));

    let config = crate::load_config(None::<&str>).unwrap();
    assert!(config.validate().is_ok());
}

/// Test applying encoding and duplicate policy names from the command line.
#[test]
fn test_apply_trie_overrides() {
    let mut config = NiihauConfig::default();
    config
        .apply_trie_overrides(Some("latin1"), Some("multiset"))
        .unwrap();
    assert_eq!(config.trie.encoding.name(), "windows-1252");
    assert_eq!(config.trie.duplicate_policy, DuplicatePolicy::Multiset);

    config.apply_trie_overrides(None, None).unwrap();
    assert_eq!(config.trie.duplicate_policy, DuplicatePolicy::Multiset);
}

/// Test that a bad override is a trie error and changes nothing.
#[test]
fn test_apply_trie_overrides_rejects_unknown_names() {
    let mut config = NiihauConfig::default();

    let err = config
        .apply_trie_overrides(Some("latin1"), Some("bag"))
        .unwrap_err();
    assert!(matches!(
        err,
        NiihauError::Trie(NiihauTrieError::UnknownDuplicatePolicy(ref name)) if name == "bag"
    ));
    assert_eq!(config.trie, NiihauConfig::default().trie);

    let err = config.apply_trie_overrides(Some("martian"), None).unwrap_err();
    assert!(matches!(err, NiihauError::Trie(NiihauTrieError::UnknownEncoding(_))));
}

/// Test that executors built from the global configuration follow it.
///
/// This is the only test that touches the global configuration slot.
#[test]
fn test_executor_reads_global_config() {
    let mut config = NiihauConfig::default();
    config.trie.case_sensitive = false;
    config.driver.default_max_distance = 1;
    crate::config::init_global_config(config);

    let global = crate::config::get_global_config();
    assert!(!global.get().trie.case_sensitive);
    assert_eq!(global.get().driver.default_max_distance, 1);

    let mut executor = CommandExecutor::from_global_config();
    assert!(!executor.trie().config().case_sensitive);

    executor.execute(Command::Add("China".to_string()));
    let outcome = executor.execute(Command::Similar {
        word: "CHINAAA".to_string(),
        max_distance: None,
    });
    assert!(matches!(
        outcome,
        CommandOutcome::Similar { max_distance: 1, ref matches, .. } if matches.is_empty()
    ));
    assert!(matches!(
        executor.execute(Command::Contains("CHINA".to_string())),
        CommandOutcome::Contains { found: true, .. }
    ));
}
