//! Fixture transactions through the chain parsers and the parse command.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use alloy_primitives::hex;
use serde_json::Value;
use txforge::cli::args::{OutputFormat, ParseArgs};
use txforge::cli::commands::ParseCommand;
use txforge_chain::{ChainRegistry, ParsedTransaction};
use txforge_core::CurrencyRegistry;

use crate::common::{load_fixture, raw_tx, raw_tx_arg};

const ETHEREUM_FIXTURES: &[&str] = &[
    "ethereum/legacy_transfer.json",
    "ethereum/signing_payload.json",
    "ethereum/contract_creation.json",
];

const COSMOS_FIXTURES: &[&str] = &[
    "cosmos/send_sign_doc.json",
    "cosmos/delegate_broadcast.json",
    "cosmos/governance_mixed.json",
];

fn parse_fixture(chain_id: &str, fixture: &Value) -> ParsedTransaction {
    let signed = fixture["signed"].as_bool().unwrap();
    ChainRegistry::new()
        .parse(chain_id, &raw_tx(fixture), signed)
        .unwrap_or_else(|e| panic!("{}: {e}", fixture["description"]))
}

fn optional_str(value: &Value) -> Option<&str> {
    value.as_str()
}

#[test]
fn test_ethereum_fixtures() {
    for path in ETHEREUM_FIXTURES {
        let fixture = load_fixture(path).unwrap();
        let expected = &fixture["expected"];
        let parsed = parse_fixture("ethereum", &fixture);
        let tx = parsed.as_ethereum().unwrap();

        assert_eq!(tx.nonce().to_string(), expected["nonce"], "{path}");
        assert_eq!(tx.gas_price().to_string(), expected["gas_price"], "{path}");
        assert_eq!(tx.gas_limit().to_string(), expected["gas_limit"], "{path}");
        assert_eq!(tx.receiver(), optional_str(&expected["to"]), "{path}");
        assert_eq!(tx.value().to_string(), expected["value"], "{path}");
        assert_eq!(hex::encode_prefixed(tx.data()), expected["data"], "{path}");
        assert_eq!(tx.hash().unwrap().to_string(), expected["hash"], "{path}");

        match expected.get("v") {
            Some(v) => {
                let signature = tx.signature().unwrap();
                assert_eq!(&hex::encode_prefixed(&signature.v), v);
                assert_eq!(hex::encode_prefixed(&signature.r), expected["r"]);
                assert_eq!(hex::encode_prefixed(&signature.s), expected["s"]);
            }
            None => assert!(!tx.is_signed(), "{path}"),
        }
    }
}

#[test]
fn test_signed_ethereum_fixture_reserializes_exactly() {
    let fixture = load_fixture("ethereum/legacy_transfer.json").unwrap();
    let parsed = parse_fixture("ethereum", &fixture);
    assert_eq!(parsed.as_ethereum().unwrap().serialize().unwrap(), raw_tx(&fixture));
}

#[test]
fn test_cosmos_fixtures() {
    for path in COSMOS_FIXTURES {
        let fixture = load_fixture(path).unwrap();
        let expected = &fixture["expected"];
        let parsed = parse_fixture("cosmos", &fixture);
        let tx = parsed.as_cosmos().unwrap();

        assert_eq!(tx.memo(), expected["memo"], "{path}");
        assert_eq!(
            tx.gas().map(ToString::to_string).as_deref(),
            optional_str(&expected["gas"]),
            "{path}"
        );
        assert_eq!(
            tx.fee().map(ToString::to_string).as_deref(),
            optional_str(&expected["fee"]),
            "{path}"
        );
        if let Some(account_number) = expected.get("account_number") {
            assert_eq!(tx.account_number(), account_number.as_str());
            assert_eq!(tx.sequence(), expected["sequence"].as_str());
        }

        let types: Vec<&str> = tx.messages().iter().map(|m| m.msg_type()).collect();
        let expected_types: Vec<&str> = expected["message_types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap())
            .collect();
        assert_eq!(types, expected_types, "{path}");

        if let Some(supported) = expected.get("supported") {
            let flags: Vec<bool> = tx.messages().iter().map(|m| m.is_supported()).collect();
            let expected_flags: Vec<bool> = supported
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b.as_bool().unwrap())
                .collect();
            assert_eq!(flags, expected_flags);
        }

        match expected.get("signature") {
            Some(signature) => {
                assert_eq!(
                    &hex::encode(tx.signature().unwrap().to_bytes()),
                    signature.as_str().unwrap()
                );
                assert_eq!(
                    hex::encode(tx.signing_pub_key().unwrap()),
                    expected["pub_key"].as_str().unwrap()
                );
            }
            None => assert!(!tx.is_signed(), "{path}"),
        }
    }
}

#[test]
fn test_signed_cosmos_fixture_parsed_unsigned_drops_signature() {
    let fixture = load_fixture("cosmos/delegate_broadcast.json").unwrap();
    let parsed = ChainRegistry::new()
        .parse("cosmos", &raw_tx(&fixture), false)
        .unwrap();
    assert!(!parsed.is_signed());
    assert!(parsed.as_cosmos().unwrap().signing_pub_key().is_none());
}

#[test]
fn test_parse_command_json_matches_library() {
    for (chain, path) in [
        ("ethereum", "ethereum/legacy_transfer.json"),
        ("cosmos", "cosmos/send_sign_doc.json"),
    ] {
        let fixture = load_fixture(path).unwrap();
        let args = ParseArgs {
            input: raw_tx_arg(&fixture),
            signed: fixture["signed"].as_bool().unwrap(),
            currency: None,
            format: OutputFormat::Json,
        };
        let command = if chain == "ethereum" {
            ParseCommand::ethereum(args)
        } else {
            ParseCommand::cosmos(args)
        };

        let output: Value =
            serde_json::from_str(&command.execute(&CurrencyRegistry::new()).unwrap()).unwrap();
        let library = serde_json::to_value(parse_fixture(chain, &fixture)).unwrap();
        assert_eq!(output, library, "{path}");
        assert_eq!(output["family"], chain);
    }
}

#[test]
fn test_parse_command_text_for_signed_cosmos() {
    let fixture = load_fixture("cosmos/delegate_broadcast.json").unwrap();
    let output = ParseCommand::cosmos(ParseArgs {
        input: raw_tx_arg(&fixture),
        signed: true,
        currency: None,
        format: OutputFormat::Text,
    })
    .execute(&CurrencyRegistry::new())
    .unwrap();

    assert!(output.contains("signed:         yes"));
    assert!(output.contains("cosmos-sdk/MsgDelegate"));
    assert!(output.contains(fixture["expected"]["signature"].as_str().unwrap()));
}

#[test]
fn test_cross_family_input_is_rejected() {
    let ethereum = load_fixture("ethereum/legacy_transfer.json").unwrap();
    let cosmos = load_fixture("cosmos/send_sign_doc.json").unwrap();
    let registry = ChainRegistry::new();

    assert!(registry.parse("cosmos", &raw_tx(&ethereum), false).is_err());
    assert!(registry.parse("ethereum", &raw_tx(&cosmos), false).is_err());
}
