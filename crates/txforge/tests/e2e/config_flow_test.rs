//! Configuration file to registry to parser.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use txforge::cli::args::{ConfigAction, OutputFormat, ParseArgs};
use txforge::cli::commands::{ConfigCommand, CurrenciesCommand, ParseCommand};
use txforge::logging::{LogConfig, LogFormat, LogLevel};
use txforge_core::config::Config;
use txforge_core::config_loader::ConfigLoader;
use txforge_core::CurrencyRegistry;

use crate::common::temp_data_dir;

const OSMOSIS_CONFIG: &str = r#"
[logging]
level = "debug"
format = "json"

[[currencies]]
name = "osmosis"
bip44_coin_type = 118
units = [
    { name = "uosmo", symbol = "uosmo", code = "uosmo", number_of_decimals = 0 },
    { name = "osmo", symbol = "OSMO", code = "osmo", number_of_decimals = 6 },
]
"#;

fn loader(dir: &tempfile::TempDir) -> ConfigLoader {
    ConfigLoader::with_base_dir(dir.path().to_path_buf())
}

#[test]
fn test_init_then_load_defaults() {
    let dir = temp_data_dir();
    ConfigCommand::new(Some(ConfigAction::Init { force: false }), loader(&dir))
        .execute()
        .unwrap();

    let config = loader(&dir).load_required().unwrap();
    assert_eq!(config, Config::default());

    let registry = CurrencyRegistry::with_config(&config).unwrap();
    assert_eq!(registry.names(), vec!["atom", "ethereum"]);
}

#[test]
fn test_configured_currency_is_listed_and_parsed() {
    let dir = temp_data_dir();
    fs::write(dir.path().join("config.toml"), OSMOSIS_CONFIG).unwrap();

    let config = loader(&dir).load().unwrap();
    let registry = CurrencyRegistry::with_config(&config).unwrap();

    let listing = CurrenciesCommand::new(registry.clone()).execute();
    assert!(listing.contains("osmosis (coin type 118)"));

    let args = ParseArgs {
        input: r#"{"memo": "swap", "fee": {"amount": [{"denom": "uosmo", "amount": "2500"}], "gas": "90000"}}"#
            .to_string(),
        signed: false,
        currency: Some("osmosis".to_string()),
        format: OutputFormat::Text,
    };
    let output = ParseCommand::cosmos(args).execute(&registry).unwrap();
    assert!(output.contains("currency:       osmosis"));
    assert!(output.contains("2500 uosmo (0.0025 OSMO)"));
}

#[test]
fn test_logging_section_feeds_log_config() {
    let dir = temp_data_dir();
    fs::write(dir.path().join("config.toml"), OSMOSIS_CONFIG).unwrap();
    let config = loader(&dir).load().unwrap();

    let from_file = LogConfig::from_config(&config.logging, 0).unwrap();
    assert_eq!(from_file.level, LogLevel::Debug);
    assert_eq!(from_file.format, LogFormat::Json);
    assert!(from_file.directory.is_none());

    let verbose = LogConfig::from_config(&config.logging, 3).unwrap();
    assert_eq!(verbose.level, LogLevel::Trace);
}

#[test]
fn test_invalid_currency_config_is_rejected() {
    let dir = temp_data_dir();
    fs::write(
        dir.path().join("config.toml"),
        "[[currencies]]\nname = \"\"\nbip44_coin_type = 1\nunits = []\n",
    )
    .unwrap();

    let show = ConfigCommand::new(Some(ConfigAction::Show), loader(&dir)).execute();
    assert!(show.is_err());
}
