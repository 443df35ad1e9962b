//! Starknet transaction related functionality.
//!
//! Invoke and deploy account transactions in their V1 (flat fee) and V3 (resource bounds)
//! shapes, their hashes, multicall calldata and contract address derivation.

pub mod call;
pub mod compute_hash;
pub mod contract_address;
mod error;
pub mod signer;

use dp_felt::FieldElement;
use dp_hashers::pedersen::PedersenHasher;
use dp_hashers::poseidon::PoseidonHasher;
use serde::{Deserialize, Serialize};

pub use call::{encode_calls, Call};
pub use compute_hash::ComputeTransactionHash;
pub use contract_address::calculate_contract_address;
pub use error::SignerError;
pub use signer::{verify_signature, LocalStarkSigner, StarkSignature, StarkSigner};

/// Offset added to the version of transactions that are only meant for simulation or fee
/// estimation, `2^128`.
pub const SIMULATE_TX_VERSION_OFFSET: FieldElement = FieldElement::from_raw([0, 0, 1, 0]);

/// Where a piece of transaction data is published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataAvailabilityMode {
    #[default]
    L1 = 0,
    L2 = 1,
}

/// Maximum amount and unit price a V3 transaction is willing to pay for one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBounds {
    pub max_amount: u64,
    pub max_price_per_unit: u128,
}

/// Resource bounds of a V3 transaction. `l1_data_gas` only takes part in the hash when set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBoundsMapping {
    pub l1_gas: ResourceBounds,
    pub l2_gas: ResourceBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_data_gas: Option<ResourceBounds>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransactionV1 {
    pub sender_address: FieldElement,
    pub calldata: Vec<FieldElement>,
    pub max_fee: u128,
    pub signature: Vec<FieldElement>,
    pub nonce: FieldElement,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransactionV3 {
    pub sender_address: FieldElement,
    pub calldata: Vec<FieldElement>,
    pub signature: Vec<FieldElement>,
    pub nonce: FieldElement,
    pub resource_bounds: ResourceBoundsMapping,
    pub tip: u64,
    pub paymaster_data: Vec<FieldElement>,
    pub account_deployment_data: Vec<FieldElement>,
    pub nonce_data_availability_mode: DataAvailabilityMode,
    pub fee_data_availability_mode: DataAvailabilityMode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployAccountTransactionV1 {
    pub max_fee: u128,
    pub signature: Vec<FieldElement>,
    pub nonce: FieldElement,
    pub contract_address_salt: FieldElement,
    pub constructor_calldata: Vec<FieldElement>,
    pub class_hash: FieldElement,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployAccountTransactionV3 {
    pub signature: Vec<FieldElement>,
    pub nonce: FieldElement,
    pub contract_address_salt: FieldElement,
    pub constructor_calldata: Vec<FieldElement>,
    pub class_hash: FieldElement,
    pub resource_bounds: ResourceBoundsMapping,
    pub tip: u64,
    pub paymaster_data: Vec<FieldElement>,
    pub nonce_data_availability_mode: DataAvailabilityMode,
    pub fee_data_availability_mode: DataAvailabilityMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvokeTransaction {
    V1(InvokeTransactionV1),
    V3(InvokeTransactionV3),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployAccountTransaction {
    V1(DeployAccountTransactionV1),
    V3(DeployAccountTransactionV3),
}

/// Different tx types.
/// See `https://docs.starknet.io/documentation/architecture_and_concepts/Blocks/transactions/` for more details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Invoke(InvokeTransaction),
    DeployAccount(DeployAccountTransaction),
}

impl DeployAccountTransactionV1 {
    /// Address the account will be deployed at.
    pub fn contract_address(&self) -> FieldElement {
        calculate_contract_address::<PedersenHasher>(
            self.contract_address_salt,
            self.class_hash,
            &self.constructor_calldata,
            FieldElement::ZERO,
        )
    }
}

impl DeployAccountTransactionV3 {
    /// Address the account will be deployed at.
    pub fn contract_address(&self) -> FieldElement {
        calculate_contract_address::<PedersenHasher>(
            self.contract_address_salt,
            self.class_hash,
            &self.constructor_calldata,
            FieldElement::ZERO,
        )
    }
}

impl Transaction {
    pub fn version(&self) -> u8 {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(_)) | Transaction::DeployAccount(DeployAccountTransaction::V1(_)) => 1,
            Transaction::Invoke(InvokeTransaction::V3(_)) | Transaction::DeployAccount(DeployAccountTransaction::V3(_)) => 3,
        }
    }

    /// The account sending the transaction, the deployed address for deploy account transactions.
    pub fn sender_address(&self) -> FieldElement {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(tx)) => tx.sender_address,
            Transaction::Invoke(InvokeTransaction::V3(tx)) => tx.sender_address,
            Transaction::DeployAccount(DeployAccountTransaction::V1(tx)) => tx.contract_address(),
            Transaction::DeployAccount(DeployAccountTransaction::V3(tx)) => tx.contract_address(),
        }
    }

    pub fn nonce(&self) -> FieldElement {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(tx)) => tx.nonce,
            Transaction::Invoke(InvokeTransaction::V3(tx)) => tx.nonce,
            Transaction::DeployAccount(DeployAccountTransaction::V1(tx)) => tx.nonce,
            Transaction::DeployAccount(DeployAccountTransaction::V3(tx)) => tx.nonce,
        }
    }

    pub fn signature(&self) -> &[FieldElement] {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(tx)) => &tx.signature,
            Transaction::Invoke(InvokeTransaction::V3(tx)) => &tx.signature,
            Transaction::DeployAccount(DeployAccountTransaction::V1(tx)) => &tx.signature,
            Transaction::DeployAccount(DeployAccountTransaction::V3(tx)) => &tx.signature,
        }
    }

    fn signature_mut(&mut self) -> &mut Vec<FieldElement> {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(tx)) => &mut tx.signature,
            Transaction::Invoke(InvokeTransaction::V3(tx)) => &mut tx.signature,
            Transaction::DeployAccount(DeployAccountTransaction::V1(tx)) => &mut tx.signature,
            Transaction::DeployAccount(DeployAccountTransaction::V3(tx)) => &mut tx.signature,
        }
    }

    /// Hash of the transaction on `chain_id`: Pedersen for V1, Poseidon for V3.
    ///
    /// `offset_version` marks the transaction as a query, see [`SIMULATE_TX_VERSION_OFFSET`].
    pub fn transaction_hash(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement {
        match self {
            Transaction::Invoke(InvokeTransaction::V1(tx)) => {
                tx.compute_hash::<PedersenHasher>(chain_id, offset_version)
            }
            Transaction::Invoke(InvokeTransaction::V3(tx)) => {
                tx.compute_hash::<PoseidonHasher>(chain_id, offset_version)
            }
            Transaction::DeployAccount(DeployAccountTransaction::V1(tx)) => {
                tx.compute_hash::<PedersenHasher>(chain_id, offset_version)
            }
            Transaction::DeployAccount(DeployAccountTransaction::V3(tx)) => {
                tx.compute_hash::<PoseidonHasher>(chain_id, offset_version)
            }
        }
    }

    /// Signs the transaction hash and stores the `[r, s]` signature on the transaction.
    ///
    /// The hash never covers the signature, so signing twice replaces the previous one.
    pub fn sign<S: StarkSigner>(
        mut self,
        signer: &S,
        chain_id: FieldElement,
        offset_version: bool,
    ) -> Result<Self, SignerError> {
        let hash = self.transaction_hash(chain_id, offset_version);
        let signature = signer.sign_hash(&hash)?;
        *self.signature_mut() = signature.to_vec();
        Ok(self)
    }
}

impl From<InvokeTransactionV1> for Transaction {
    fn from(tx: InvokeTransactionV1) -> Self {
        Self::Invoke(InvokeTransaction::V1(tx))
    }
}

impl From<InvokeTransactionV3> for Transaction {
    fn from(tx: InvokeTransactionV3) -> Self {
        Self::Invoke(InvokeTransaction::V3(tx))
    }
}

impl From<DeployAccountTransactionV1> for Transaction {
    fn from(tx: DeployAccountTransactionV1) -> Self {
        Self::DeployAccount(DeployAccountTransaction::V1(tx))
    }
}

impl From<DeployAccountTransactionV3> for Transaction {
    fn from(tx: DeployAccountTransactionV3) -> Self {
        Self::DeployAccount(DeployAccountTransaction::V3(tx))
    }
}

#[cfg(test)]
mod tests;
