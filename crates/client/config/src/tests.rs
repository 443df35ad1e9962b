use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;
use dp_chain_id::{SN_MAIN_CHAIN_ID, SN_SEPOLIA_CHAIN_ID};
use dp_transactions::InvokeTransactionV1;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dc-config-{}-{name}.json", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn empty_config_uses_defaults() {
    let config: DualityConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config, DualityConfig::default());
    assert_eq!(config.ethereum.chain_id, DEFAULT_ETHEREUM_CHAIN_ID);
    assert_eq!(config.ethereum.tx_type().unwrap(), tx_type::EIP1559);
    assert_eq!(config.starknet_chain_id().unwrap(), SN_MAIN_CHAIN_ID);
    assert_eq!(config.starknet.typed_data_revision().unwrap(), Revision::V1);
    assert!(!config.starknet.query_transactions);
}

#[test]
fn partial_sections_keep_their_defaults() {
    let config: DualityConfig =
        serde_json::from_str(r#"{ "ethereum": { "chain_id": 11155111 }, "starknet": { "typed_data_revision": 0 } }"#)
            .unwrap();

    assert_eq!(config.ethereum, EthereumConfig { chain_id: 11155111, default_tx_type: tx_type::EIP1559 });
    assert_eq!(config.starknet.chain_id, DEFAULT_STARKNET_CHAIN_ID);
    assert_eq!(config.starknet.typed_data_revision().unwrap(), Revision::V0);
}

#[rstest]
#[case("SN_SEPOLIA", SN_SEPOLIA_CHAIN_ID)]
#[case("0x534e5f5345504f4c4941", SN_SEPOLIA_CHAIN_ID)]
#[case("MY_APPCHAIN", FieldElement::from_short_string("MY_APPCHAIN").unwrap())]
fn starknet_chain_ids(#[case] chain_id: &str, #[case] expected: FieldElement) {
    let config = StarknetConfig { chain_id: chain_id.to_string(), ..Default::default() };
    assert_eq!(config.chain_id().unwrap(), expected);
}

#[test]
fn rejects_invalid_values() {
    let config = StarknetConfig { chain_id: "a chain name longer than 31 chars".to_string(), ..Default::default() };
    assert_matches!(config.chain_id(), Err(ConfigError::InvalidChainId(..)));

    let config = StarknetConfig { typed_data_revision: 2, ..Default::default() };
    assert_matches!(config.typed_data_revision(), Err(ConfigError::UnsupportedRevision(2)));

    let config = EthereumConfig { default_tx_type: 3, ..Default::default() };
    assert_matches!(config.tx_type(), Err(ConfigError::UnsupportedTxType(3)));
}

#[test]
fn query_transactions_change_the_hash() {
    let transaction = Transaction::from(InvokeTransactionV1 {
        sender_address: FieldElement::from(0x1234u16),
        nonce: FieldElement::ONE,
        ..Default::default()
    });
    let mut config = DualityConfig::default();

    let hash = config.starknet_transaction_hash(&transaction).unwrap();
    assert_eq!(hash, transaction.transaction_hash(SN_MAIN_CHAIN_ID, false));

    config.starknet.query_transactions = true;
    assert_eq!(config.starknet_transaction_hash(&transaction).unwrap(), transaction.transaction_hash(SN_MAIN_CHAIN_ID, true));
    assert_ne!(config.starknet_transaction_hash(&transaction).unwrap(), hash);
}

#[test]
fn loads_from_file() {
    let path = write_config(
        "valid",
        r#"{ "starknet": { "chain_id": "SN_SEPOLIA", "query_transactions": true }, "ethereum": { "default_tx_type": 0 } }"#,
    );
    let config = DualityConfig::try_from(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.starknet_chain_id().unwrap(), SN_SEPOLIA_CHAIN_ID);
    assert_eq!(config.ethereum.tx_type().unwrap(), tx_type::LEGACY);
    assert!(config.starknet.query_transactions);
}

#[test]
fn file_errors() {
    let missing = std::env::temp_dir().join("dc-config-does-not-exist.json");
    assert_matches!(DualityConfig::try_from(&missing), Err(ConfigError::ConfigReadFromFile(_)));

    let path = write_config("malformed", "{ \"ethereum\": ");
    let result = DualityConfig::try_from(&path);
    fs::remove_file(&path).unwrap();
    assert_matches!(result, Err(ConfigError::ConfigDecodeFromJson(_)));

    let path = write_config("unsupported", r#"{ "starknet": { "typed_data_revision": 7 } }"#);
    let result = DualityConfig::try_from(&path);
    fs::remove_file(&path).unwrap();
    assert_matches!(result, Err(ConfigError::UnsupportedRevision(7)));
}
