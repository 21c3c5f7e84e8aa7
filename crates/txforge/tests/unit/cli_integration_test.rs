//! Command lines parsed by clap and handed to the command handlers, the
//! way `main` dispatches them.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use clap::Parser;
use txforge::cli::commands::{ConfigCommand, CosmosBuildCommand, CurrenciesCommand, ParseCommand};
use txforge::cli::{BuildCommands, Cli, Commands, ParseCommands};
use txforge_core::config_loader::ConfigLoader;
use txforge_core::{Currency, CurrencyRegistry};

use crate::common::temp_data_dir;

const SIGNED_TRANSFER: &str = "0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

fn parse_command(cli: Cli) -> ParseCommand {
    match cli.command {
        Commands::Parse {
            chain: ParseCommands::Ethereum(args),
        } => ParseCommand::ethereum(args),
        Commands::Parse {
            chain: ParseCommands::Cosmos(args),
        } => ParseCommand::cosmos(args),
        other => panic!("expected a parse command, got {other:?}"),
    }
}

#[test]
fn test_parse_ethereum_json_output() {
    let cli = Cli::try_parse_from(["txforge", "parse", "ethereum", SIGNED_TRANSFER, "-s", "-f", "json"])
        .unwrap();
    let output = parse_command(cli).execute(&CurrencyRegistry::new()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["family"], "ethereum");
    assert_eq!(json["transaction"]["nonce"], "9");
}

#[test]
fn test_parse_ethereum_without_signed_flag() {
    let cli = Cli::try_parse_from(["txforge", "parse", "ethereum", SIGNED_TRANSFER]).unwrap();
    let output = parse_command(cli).execute(&CurrencyRegistry::new()).unwrap();
    assert!(output.contains("signed:         no"));
    assert!(!output.contains("r:"));
}

#[test]
fn test_parse_cosmos_from_file() {
    let dir = temp_data_dir();
    let path = dir.path().join("tx.json");
    std::fs::write(&path, r#"{"memo": "from a file", "msgs": []}"#).unwrap();

    let input = format!("@{}", path.display());
    let cli = Cli::try_parse_from(["txforge", "parse", "cosmos", input.as_str()]).unwrap();
    let output = parse_command(cli).execute(&CurrencyRegistry::new()).unwrap();
    assert!(output.contains("from a file"));
}

#[tokio::test]
async fn test_build_cosmos_dispatch() {
    let cli = Cli::try_parse_from([
        "txforge",
        "build",
        "cosmos",
        "--chain-id",
        "theta-testnet-001",
        "--gas",
        "100000",
        "--fee",
        "1000",
        "--memo",
        "cli",
    ])
    .unwrap();
    let Commands::Build {
        chain: BuildCommands::Cosmos(args),
    } = cli.command
    else {
        panic!("expected build cosmos");
    };

    let output = CosmosBuildCommand::new(args, Currency::atom())
        .execute()
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["chain_id"], "theta-testnet-001");
    assert_eq!(doc["memo"], "cli");
    assert_eq!(doc["msgs"], serde_json::json!([]));
}

#[test]
fn test_currencies_dispatch() {
    let cli = Cli::try_parse_from(["txforge", "currencies"]).unwrap();
    assert!(matches!(cli.command, Commands::Currencies));

    let output = CurrenciesCommand::new(CurrencyRegistry::new()).execute();
    assert!(output.starts_with("atom (coin type 118)"));
    assert!(output.contains("ethereum (coin type 60)"));
}

#[test]
fn test_config_path_dispatch() {
    let dir = temp_data_dir();
    let cli = Cli::try_parse_from(["txforge", "config", "path"]).unwrap();
    let Commands::Config { action } = cli.command else {
        panic!("expected config");
    };

    let output = ConfigCommand::new(action, ConfigLoader::with_base_dir(dir.path().to_path_buf()))
        .execute()
        .unwrap();
    assert!(output.ends_with("config.toml"));
}
