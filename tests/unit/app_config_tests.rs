/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use vttclean::app_config::{Config, LogLevel};
use vttclean::run_collapser::UnpairedPolicy;
use vttclean::word_count::WordCountLanguage;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.collapse_threshold, 3);
    assert!(config.normalize_spacing);
    assert_eq!(config.unpaired_policy, UnpairedPolicy::Drop);
    assert_eq!(config.output_suffix, "cleaned");
    assert_eq!(config.word_count_language, WordCountLanguage::En);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.collapse_threshold = 1;
    assert!(config.validate().is_err());
    config.collapse_threshold = 2;
    assert!(config.validate().is_ok());

    config.output_suffix = "  ".to_string();
    assert!(config.validate().is_err());

    config.output_suffix = "out/dir".to_string();
    assert!(config.validate().is_err());

    config.output_suffix = "dedup".to_string();
    assert!(config.validate().is_ok());
}

/// Test that missing fields fall back to defaults when parsing JSON
#[test]
fn test_config_from_json_withPartialFields_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "collapse_threshold": 4, "unpaired_policy": "passthrough", "log_level": "debug" }"#)?;

    assert_eq!(config.collapse_threshold, 4);
    assert_eq!(config.unpaired_policy, UnpairedPolicy::Passthrough);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.normalize_spacing);
    assert_eq!(config.output_suffix, "cleaned");

    Ok(())
}

/// Test saving and loading a configuration file
#[test]
fn test_config_save_and_load_withCustomValues_shouldMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config {
        collapse_threshold: 5,
        normalize_spacing: false,
        word_count_language: WordCountLanguage::Fr,
        ..Config::default()
    };
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);

    Ok(())
}

/// Test that a malformed configuration file is reported
#[test]
fn test_config_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(format!("{}", error).contains("Failed to parse config file"));

    Ok(())
}

/// Test the mapping of log levels to log filters
#[test]
fn test_log_level_to_level_filter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
