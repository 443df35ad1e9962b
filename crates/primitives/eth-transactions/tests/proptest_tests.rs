//! Property-based tests for signed transaction encoding and sender recovery.

use dp_eth_transactions::{
    AccessList, AccessListItem, EthSigner, LocalWallet, SignedTransaction, TxEip1559, TxLegacy, TypedTransaction, H160,
    H256, U256,
};
use proptest::prelude::*;

fn arb_wallet() -> impl Strategy<Value = LocalWallet> {
    prop::array::uniform32(any::<u8>()).prop_filter_map("invalid secret key", |bytes| LocalWallet::from_bytes(&bytes).ok())
}

fn arb_address() -> impl Strategy<Value = H160> {
    prop::array::uniform20(any::<u8>()).prop_map(H160)
}

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(any::<u8>()).prop_map(|bytes| U256::from_big_endian(&bytes))
}

fn arb_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max_len)
}

fn arb_access_list() -> impl Strategy<Value = AccessList> {
    prop::collection::vec(
        (arb_address(), prop::collection::vec(prop::array::uniform32(any::<u8>()).prop_map(H256), 0..3))
            .prop_map(|(address, storage_keys)| AccessListItem { address, storage_keys }),
        0..3,
    )
    .prop_map(AccessList)
}

fn arb_legacy_tx() -> impl Strategy<Value = TxLegacy> {
    (
        prop::option::of(1u64..100_000),  // chain_id
        any::<u64>(),                     // nonce
        any::<u128>(),                    // gas_price
        any::<u64>(),                     // gas_limit
        prop::option::of(arb_address()),  // to
        arb_u256(),                       // value
        arb_bytes(256),                   // data
    )
        .prop_map(|(chain_id, nonce, gas_price, gas_limit, to, value, data)| TxLegacy {
            chain_id,
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            data,
        })
}

fn arb_eip1559_tx() -> impl Strategy<Value = TxEip1559> {
    (
        any::<u64>(),                     // chain_id
        any::<u64>(),                     // nonce
        any::<u128>(),                    // max_priority_fee_per_gas
        any::<u128>(),                    // max_fee_per_gas
        any::<u64>(),                     // gas_limit
        prop::option::of(arb_address()),  // to
        arb_u256(),                       // value
        arb_bytes(256),                   // data
        arb_access_list(),
    )
        .prop_map(
            |(chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas, gas_limit, to, value, data, access_list)| {
                TxEip1559 {
                    chain_id,
                    nonce,
                    max_priority_fee_per_gas,
                    max_fee_per_gas,
                    gas_limit,
                    to,
                    value,
                    data,
                    access_list,
                }
            },
        )
}

fn arb_transaction() -> impl Strategy<Value = TypedTransaction> {
    prop_oneof![arb_legacy_tx().prop_map(TypedTransaction::from), arb_eip1559_tx().prop_map(TypedTransaction::from)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_transaction_roundtrip(tx in arb_transaction(), wallet in arb_wallet()) {
        let signed = tx.sign(&wallet).unwrap();
        let decoded = SignedTransaction::decode(&signed.encode().unwrap()).unwrap();
        prop_assert_eq!(&decoded, &signed);
        prop_assert_eq!(decoded.hash().unwrap(), signed.hash().unwrap());
    }

    #[test]
    fn recovered_sender_matches_signer(tx in arb_transaction(), wallet in arb_wallet()) {
        let signed = tx.sign(&wallet).unwrap();
        prop_assert_eq!(signed.recover_sender().unwrap(), wallet.address());
    }

    #[test]
    fn signature_hash_is_stable(tx in arb_transaction(), wallet in arb_wallet()) {
        let unsigned_hash = tx.signature_hash();
        let signed = tx.sign(&wallet).unwrap();
        prop_assert_eq!(signed.signature_hash(), unsigned_hash);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = SignedTransaction::decode(&bytes);
    }
}
