use dp_felt::FieldElement;
use rstest::rstest;

use crate::*;

#[rstest]
#[case::mainnet(SN_MAIN_CHAIN_ID, "SN_MAIN")]
#[case::sepolia(SN_SEPOLIA_CHAIN_ID, "SN_SEPOLIA")]
#[case::goerli(SN_GOERLI_CHAIN_ID, "SN_GOERLI")]
fn chain_id_matches_short_string(#[case] chain_id: FieldElement, #[case] name: &str) {
    assert_eq!(chain_id, FieldElement::from_short_string(name).unwrap(), "{name} does not match the expected value.");
    assert_eq!(chain_id.to_short_string().unwrap(), name);
    assert_eq!(chain_id_from_name(name), Some(chain_id));
}

#[test]
fn unknown_network_has_no_chain_id() {
    assert_eq!(chain_id_from_name("SN_DEVNET"), None);
}
