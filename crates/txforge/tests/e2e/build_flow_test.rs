//! Builders whose output, once encoded, parses back to the same transaction.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Value};
use tokio::runtime::{Builder, Runtime};
use txforge::cli::args::CosmosBuildArgs;
use txforge::cli::commands::CosmosBuildCommand;
use txforge_chain::cosmos::{self, BroadcastMode, Coin, CosmosMessage, CosmosTransactionBuilder};
use txforge_chain::ethereum::{self, EthereumTransactionBuilder, StaticExplorer};
use txforge_chain::ChainRegistry;
use txforge_core::{BigInt, BuildError, Currency};

use crate::common;

const SENDER: &str = "0x1111111111111111111111111111111111111111";

fn runtime() -> Runtime {
    Builder::new_current_thread().enable_all().build().unwrap()
}

fn ethereum_builder(runtime: &Runtime, nonce: u64, balance: BigInt) -> EthereumTransactionBuilder {
    let explorer = StaticExplorer::new(BigInt::from(20_000_000_000u64)).with_account(
        SENDER,
        BigInt::from(nonce),
        balance,
    );
    EthereumTransactionBuilder::new(
        ethereum::default_build_function(Currency::ethereum(), SENDER.to_string()),
        Arc::new(explorer),
        runtime.handle().clone(),
    )
}

fn cosmos_builder(runtime: &Runtime) -> CosmosTransactionBuilder {
    CosmosTransactionBuilder::new(
        cosmos::default_build_function(Currency::atom()),
        runtime.handle().clone(),
    )
}

fn delegate() -> CosmosMessage {
    CosmosMessage::Delegate {
        delegator_address: "cosmos1delegator".to_string(),
        validator_address: "cosmosvaloper1validator".to_string(),
        amount: Coin::new("25000000", "uatom"),
    }
}

#[test]
fn test_ethereum_build_serialize_parse() {
    let runtime = runtime();
    let mut builder = ethereum_builder(&runtime, 9, BigInt::from(10u64).pow(19));
    builder
        .send_to_address("1000000000000000000", "0x3535353535353535353535353535353535353535")
        .unwrap()
        .set_gas_limit("21000")
        .unwrap();

    let built = runtime.block_on(builder.build()).unwrap();
    let raw = built.serialize().unwrap();
    let parsed = ChainRegistry::new().parse("ethereum", &raw, false).unwrap();

    assert_eq!(parsed.as_ethereum(), Some(&built));
    // the EIP-155 example, before signing
    assert_eq!(
        alloy_primitives::hex::encode(&raw),
        "e9098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080"
    );
}

#[test]
fn test_ethereum_wipe_sends_everything_but_fees() {
    let runtime = runtime();
    let mut builder = ethereum_builder(&runtime, 0, BigInt::from(10u64).pow(18));
    builder
        .wipe_to_address("0x3535353535353535353535353535353535353535")
        .unwrap()
        .set_gas_limit("21000")
        .unwrap();

    let built = runtime.block_on(builder.build()).unwrap();
    let fees = BigInt::from(20_000_000_000u64 * 21_000);
    assert_eq!(built.value(), &(BigInt::from(10u64).pow(18) - fees));
}

#[test]
fn test_ethereum_insufficient_funds() {
    let runtime = runtime();
    let mut builder = ethereum_builder(&runtime, 0, BigInt::from(1u64));
    builder
        .send_to_address("1", "0x3535353535353535353535353535353535353535")
        .unwrap()
        .set_gas_limit("21000")
        .unwrap();

    let err = runtime.block_on(builder.build()).unwrap_err();
    assert!(matches!(err, BuildError::InsufficientFunds { .. }));
}

#[test]
fn test_cosmos_sign_doc_parses_back() {
    let runtime = runtime();
    let mut builder = cosmos_builder(&runtime);
    builder
        .set_account_number("12")
        .set_sequence("4")
        .set_memo("stake")
        .set_gas("200000")
        .unwrap()
        .set_fee("5000")
        .unwrap()
        .add_message(delegate());

    let built = runtime.block_on(builder.build()).unwrap();
    let doc = built.serialize_for_signature("cosmoshub-4");
    let parsed = ChainRegistry::new()
        .parse("cosmos", doc.as_bytes(), false)
        .unwrap();

    assert_eq!(parsed.as_cosmos(), Some(&built));
}

#[test]
fn test_cosmos_broadcast_body_parses_back() {
    let runtime = runtime();
    let mut builder = cosmos_builder(&runtime);
    builder
        .set_gas("100000")
        .unwrap()
        .set_fee("2500")
        .unwrap()
        .add_message(delegate());

    let built = runtime.block_on(builder.build()).unwrap();
    let body: Value = serde_json::from_str(&built.serialize_for_broadcast(BroadcastMode::Block))
        .unwrap();
    assert_eq!(body["mode"], "block");

    let parsed = ChainRegistry::new()
        .parse("cosmos", body["tx"].to_string().as_bytes(), true)
        .unwrap();
    assert_eq!(parsed.as_cosmos(), Some(&built));
}

#[test]
fn test_build_command_output_parses_back() {
    let runtime = runtime();
    let args = CosmosBuildArgs {
        chain_id: "cosmoshub-4".to_string(),
        gas: "80000".to_string(),
        fee: "2000".to_string(),
        gas_adjustment: Some(1.25),
        memo: None,
        account_number: Some("3".to_string()),
        sequence: Some("0".to_string()),
        messages: vec![json!({
            "type": "cosmos-sdk/MsgVote",
            "value": {"voter": "cosmos1voter", "proposal_id": "5", "option": "Abstain"}
        })
        .to_string()],
        correlation_id: None,
    };

    let doc = runtime
        .block_on(CosmosBuildCommand::new(args, Currency::atom()).execute())
        .unwrap();
    let parsed = ChainRegistry::new()
        .parse("cosmos", doc.as_bytes(), false)
        .unwrap();
    let tx = parsed.as_cosmos().unwrap();

    assert_eq!(tx.gas(), Some(&BigInt::from(100_000u64)));
    assert_eq!(tx.memo(), "");
    assert_eq!(tx.messages()[0].msg_type(), "cosmos-sdk/MsgVote");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ethereum_build_round_trip(
        to in common::ethereum_address(),
        value in common::wei_amount(),
        nonce in common::nonce(),
        gas_limit in common::gas_limit(),
    ) {
        let runtime = runtime();
        let mut builder = ethereum_builder(&runtime, nonce, BigInt::from(10u64).pow(30));
        builder
            .send_to_address(&value, &to)
            .unwrap()
            .set_gas_limit(&gas_limit.to_string())
            .unwrap();

        let built = runtime.block_on(builder.build()).unwrap();
        let parsed = ChainRegistry::new()
            .parse("ethereum", &built.serialize().unwrap(), false)
            .unwrap();

        prop_assert_eq!(parsed.as_ethereum(), Some(&built));
        prop_assert_eq!(built.receiver().map(str::to_lowercase), Some(to));
    }

    #[test]
    fn prop_cosmos_memo_survives_sign_doc(memo in common::cosmos_memo(), gas in 1u64..10_000_000) {
        let runtime = runtime();
        let mut builder = cosmos_builder(&runtime);
        builder
            .set_memo(memo.clone())
            .set_gas(&gas.to_string())
            .unwrap()
            .set_fee("1")
            .unwrap();

        let built = runtime.block_on(builder.build()).unwrap();
        let parsed = ChainRegistry::new()
            .parse("cosmos", built.serialize_for_signature("test").as_bytes(), false)
            .unwrap();

        prop_assert_eq!(parsed.as_cosmos().unwrap().memo(), memo.as_str());
        prop_assert_eq!(parsed.as_cosmos(), Some(&built));
    }
}
