use assert_matches::assert_matches;
use dp_chain_id::{SN_GOERLI_CHAIN_ID, SN_MAIN_CHAIN_ID};
use dp_felt::FieldElement;
use dp_hashers::pedersen::PedersenHasher;
use dp_hashers::poseidon::PoseidonHasher;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::contract_address::L2_ADDRESS_UPPER_BOUND;

fn felt(value: &str) -> FieldElement {
    FieldElement::from_hex_be(value).unwrap()
}

fn invoke_v1() -> InvokeTransactionV1 {
    InvokeTransactionV1 {
        max_fee: 1,
        signature: vec![],
        nonce: FieldElement::ZERO,
        sender_address: FieldElement::from(19911991_u128),
        calldata: vec![FieldElement::ONE, FieldElement::TWO, FieldElement::THREE],
    }
}

fn invoke_v3() -> InvokeTransactionV3 {
    InvokeTransactionV3 {
        sender_address: FieldElement::from(19911991_u128),
        calldata: vec![FieldElement::ONE],
        nonce: FieldElement::ONE,
        resource_bounds: ResourceBoundsMapping {
            l1_gas: ResourceBounds { max_amount: 0x186a0, max_price_per_unit: 0x5af3107a4000 },
            ..Default::default()
        },
        ..Default::default()
    }
}

fn signer() -> LocalStarkSigner {
    LocalStarkSigner::from_secret_scalar(felt("0x0139fe4d6f02e666e86a6f58e65060f115cd3c185bd9e98bd829636931458f79"))
        .unwrap()
}

#[test]
fn transaction_hash_picks_the_hasher_of_the_version() {
    let v1: Transaction = invoke_v1().into();
    assert_eq!(v1.version(), 1);
    assert_eq!(
        v1.transaction_hash(SN_GOERLI_CHAIN_ID, false),
        felt("0x062633b1f3d64708df3d0d44706b388f841ed4534346be6ad60336c8eb2f4b3e")
    );

    let v3: Transaction = invoke_v3().into();
    assert_eq!(v3.version(), 3);
    assert_eq!(
        v3.transaction_hash(SN_GOERLI_CHAIN_ID, false),
        invoke_v3().compute_hash::<PoseidonHasher>(SN_GOERLI_CHAIN_ID, false)
    );
    assert_ne!(
        v3.transaction_hash(SN_GOERLI_CHAIN_ID, false),
        invoke_v3().compute_hash::<PedersenHasher>(SN_GOERLI_CHAIN_ID, false)
    );
}

#[test]
fn hash_depends_on_chain_and_query_version() {
    let tx: Transaction = invoke_v3().into();
    let hash = tx.transaction_hash(SN_GOERLI_CHAIN_ID, false);
    assert_ne!(hash, tx.transaction_hash(SN_MAIN_CHAIN_ID, false));
    assert_ne!(hash, tx.transaction_hash(SN_GOERLI_CHAIN_ID, true));
}

#[test]
fn signature_is_not_part_of_the_hash() {
    let unsigned: Transaction = invoke_v1().into();
    let signed = unsigned.clone().sign(&signer(), SN_GOERLI_CHAIN_ID, false).unwrap();

    assert_eq!(signed.signature().len(), 2);
    assert_eq!(signed.transaction_hash(SN_GOERLI_CHAIN_ID, false), unsigned.transaction_hash(SN_GOERLI_CHAIN_ID, false));
}

#[test]
fn signatures_verify_against_the_public_key() {
    let signer = signer();
    let tx: Transaction = invoke_v3().into();
    let hash = tx.transaction_hash(SN_GOERLI_CHAIN_ID, false);
    let signature = signer.sign_hash(&hash).unwrap();

    assert_eq!(signer.sign_hash(&hash).unwrap(), signature);
    assert!(verify_signature(&signer.public_key(), &hash, &signature));
    assert!(!verify_signature(&signer.public_key(), &(hash + FieldElement::ONE), &signature));
    assert!(!verify_signature(&signer.public_key(), &hash, &StarkSignature::default()));

    let signed = tx.sign(&signer, SN_GOERLI_CHAIN_ID, false).unwrap();
    assert_eq!(signed.signature(), signature.to_vec().as_slice());
}

#[test]
fn zero_private_key_is_rejected() {
    assert_matches!(LocalStarkSigner::from_secret_scalar(FieldElement::ZERO), Err(SignerError::SigningFailed(_)));
}

#[test]
fn signer_debug_hides_private_key() {
    assert!(!format!("{:?}", signer()).contains("139fe4d"));
}

#[test]
fn deploy_account_sender_is_the_deployed_address() {
    let tx = DeployAccountTransactionV1 {
        constructor_calldata: vec![FieldElement::ONE, FieldElement::TWO, FieldElement::THREE],
        class_hash: FieldElement::THREE,
        ..Default::default()
    };
    let expected = calculate_contract_address::<PedersenHasher>(
        FieldElement::ZERO,
        FieldElement::THREE,
        &tx.constructor_calldata,
        FieldElement::ZERO,
    );

    assert_eq!(tx.contract_address(), expected);
    assert_eq!(Transaction::from(tx).sender_address(), expected);
}

#[test]
fn multicall_layout() {
    let token = felt("0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7");
    let calls = [
        Call::new(token, "transfer", vec![FieldElement::from(0x1234u16), FieldElement::from(100u8), FieldElement::ZERO]),
        Call::new(token, "approve", vec![]),
    ];

    assert_eq!(
        encode_calls(&calls),
        vec![
            FieldElement::TWO,
            token,
            felt("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"),
            FieldElement::THREE,
            FieldElement::from(0x1234u16),
            FieldElement::from(100u8),
            FieldElement::ZERO,
            token,
            dp_hashers::get_selector_from_name("approve"),
            FieldElement::ZERO,
        ]
    );
    assert_eq!(encode_calls(&[]), vec![FieldElement::ZERO]);
}

#[test]
fn transactions_serialize_with_hex_felts() {
    let tx: Transaction = invoke_v3().into();
    let json = serde_json::to_value(&tx).unwrap();

    assert_eq!(json["Invoke"]["V3"]["nonce_data_availability_mode"], "L1");
    assert_eq!(serde_json::from_value::<Transaction>(json).unwrap(), tx);
}

proptest! {
    #[test]
    fn contract_address_is_deterministic_and_bounded(
        salt in any::<u128>(),
        class_hash in any::<u128>(),
        deployer in any::<u64>(),
        calldata in prop::collection::vec(any::<u64>(), 0..4),
    ) {
        let calldata: Vec<FieldElement> = calldata.into_iter().map(FieldElement::from).collect();
        let address = calculate_contract_address::<PedersenHasher>(
            FieldElement::from(salt),
            FieldElement::from(class_hash),
            &calldata,
            FieldElement::from(deployer),
        );
        let again = calculate_contract_address::<PedersenHasher>(
            FieldElement::from(salt),
            FieldElement::from(class_hash),
            &calldata,
            FieldElement::from(deployer),
        );

        prop_assert_eq!(address, again);
        prop_assert!(address.to_u256() < L2_ADDRESS_UPPER_BOUND);
    }
}
