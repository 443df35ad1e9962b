use dp_rlp::RlpItem;
use primitive_types::{H160, U256};

use crate::signature::{parity_from_u64, EthSignature};
use crate::typed::expect_fields;
use crate::{AccessList, Result};

/// EIP-1559 fee market transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxEip1559 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: Option<H160>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
}

impl TxEip1559 {
    /// `[chainId, nonce, maxPriorityFee, maxFee, gasLimit, to, value, data, accessList]`
    pub(crate) fn rlp_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::u64(self.chain_id),
            RlpItem::u64(self.nonce),
            RlpItem::u128(self.max_priority_fee_per_gas),
            RlpItem::u128(self.max_fee_per_gas),
            RlpItem::u64(self.gas_limit),
            RlpItem::optional_address(self.to.as_ref()),
            RlpItem::uint(self.value),
            RlpItem::bytes(self.data.clone()),
            self.access_list.to_rlp(),
        ]
    }

    pub(crate) fn decode_signed(item: &RlpItem) -> Result<(Self, EthSignature)> {
        let [chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas, gas_limit, to, value, data, access_list, y_parity, r, s] =
            expect_fields::<12>(item)?;
        let (y_parity, r, s) = EthSignature::from_rlp_fields(y_parity, r, s)?;
        let tx = Self {
            chain_id: chain_id.as_u64()?,
            nonce: nonce.as_u64()?,
            max_priority_fee_per_gas: max_priority_fee_per_gas.as_u128()?,
            max_fee_per_gas: max_fee_per_gas.as_u128()?,
            gas_limit: gas_limit.as_u64()?,
            to: to.as_optional_address()?,
            value: value.as_u256()?,
            data: data.as_bytes()?.to_vec(),
            access_list: AccessList::from_rlp(access_list)?,
        };
        Ok((tx, EthSignature::new(r, s, parity_from_u64(y_parity)?)))
    }
}
