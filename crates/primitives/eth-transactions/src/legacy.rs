use dp_rlp::{encode_list, RlpItem};
use primitive_types::{H160, U256};

use crate::signature::EthSignature;
use crate::typed::expect_fields;
use crate::{EthTransactionError, Result};

/// Pre EIP-2718 transaction, replay protected by EIP-155 when a chain id is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxLegacy {
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// `None` creates a contract.
    pub to: Option<H160>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl TxLegacy {
    fn rlp_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::u64(self.nonce),
            RlpItem::u128(self.gas_price),
            RlpItem::u64(self.gas_limit),
            RlpItem::optional_address(self.to.as_ref()),
            RlpItem::uint(self.value),
            RlpItem::bytes(self.data.clone()),
        ]
    }

    /// `rlp([nonce, gasPrice, gasLimit, to, value, data(, chainId, 0, 0)])`
    pub fn encode_for_signing(&self) -> Vec<u8> {
        let mut fields = self.rlp_fields();
        if let Some(chain_id) = self.chain_id {
            fields.extend([RlpItem::u64(chain_id), RlpItem::empty(), RlpItem::empty()]);
        }
        encode_list(&fields)
    }

    /// `chainId * 2 + 35 + yParity`, or `27 + yParity` without a chain id.
    pub fn v(&self, y_parity: bool) -> Result<u64> {
        match self.chain_id {
            Some(chain_id) => chain_id.checked_mul(2).and_then(|v| v.checked_add(35 + y_parity as u64)).ok_or_else(|| {
                log::debug!("[eth-transactions] chain id {chain_id} does not fit an EIP-155 v");
                EthTransactionError::InvalidSignature("chain id too large for legacy v")
            }),
            None => Ok(27 + y_parity as u64),
        }
    }

    pub(crate) fn encode_signed(&self, signature: &EthSignature) -> Result<Vec<u8>> {
        let mut fields = self.rlp_fields();
        fields.extend(signature.rlp_fields(self.v(signature.y_parity)?));
        Ok(encode_list(&fields))
    }

    pub(crate) fn decode_signed(item: &RlpItem) -> Result<(Self, EthSignature)> {
        let [nonce, gas_price, gas_limit, to, value, data, v, r, s] = expect_fields::<9>(item)?;
        let (v, r, s) = EthSignature::from_rlp_fields(v, r, s)?;
        let (chain_id, y_parity) = match v {
            27 | 28 => (None, v == 28),
            v if v >= 35 => (Some((v - 35) / 2), (v - 35) % 2 == 1),
            _ => return Err(EthTransactionError::InvalidSignature("legacy v out of range")),
        };
        let tx = Self {
            chain_id,
            nonce: nonce.as_u64()?,
            gas_price: gas_price.as_u128()?,
            gas_limit: gas_limit.as_u64()?,
            to: to.as_optional_address()?,
            value: value.as_u256()?,
            data: data.as_bytes()?.to_vec(),
        };
        Ok((tx, EthSignature::new(r, s, y_parity)))
    }
}
