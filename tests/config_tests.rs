use pmu_rs::config::{Config, Language};
use pmu_rs::{Outcome, SettlementEngine};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_from_valid_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let config_content = r#"
[settlement]
language = "en"

[logging]
level = "debug"
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = Config::from_path(&config_path).unwrap();
    assert_eq!(config.settlement.language, Language::En);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_new_reads_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[settlement]\nlanguage = \"fr\"\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = Config::new();

    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().settlement.language, Language::Fr);
}

#[test]
fn test_config_with_missing_file() {
    let dir = tempdir().unwrap();
    assert!(Config::from_path(dir.path().join("config.toml")).is_err());
}

#[test]
fn test_load_or_default_with_missing_file() {
    let dir = tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_with_invalid_toml() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "[settlement\nlanguage = \"en\"\n").unwrap();

    assert!(Config::from_path(&config_path).is_err());
    assert!(Config::load_or_default(&config_path).is_err());
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::from_path(&config_path).unwrap();
    assert_eq!(config.settlement.language, Language::Fr);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_language_drives_messages_not_outcomes() {
    let engine = SettlementEngine::global().unwrap();
    let fr = engine.settle_raw("couple_ordre", "2,1", &[1, 2]).unwrap();
    let en = engine
        .with_language(Language::En)
        .settle_raw("couple_ordre", "2,1", &[1, 2])
        .unwrap();

    assert_eq!(fr.outcome, Outcome::Lost);
    assert_eq!(en.outcome, Outcome::Lost);
    assert!(fr.message.starts_with("Perdu"));
    assert!(en.message.starts_with("Lost"));
    assert_eq!(fr.relevant_finishers, en.relevant_finishers);
}
