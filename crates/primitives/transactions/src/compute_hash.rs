use dp_felt::FieldElement;
use dp_hashers::HasherT;

use crate::{
    DataAvailabilityMode, DeployAccountTransactionV1, DeployAccountTransactionV3, InvokeTransactionV1,
    InvokeTransactionV3, ResourceBounds, ResourceBoundsMapping, SIMULATE_TX_VERSION_OFFSET,
};

/// `"invoke"` as a short string.
pub const INVOKE_PREFIX: FieldElement = FieldElement::from_raw([0x696e_766f_6b65, 0, 0, 0]);
/// `"deploy_account"` as a short string.
pub const DEPLOY_ACCOUNT_PREFIX: FieldElement = FieldElement::from_raw([0x5f61_6363_6f75_6e74, 0x6465_706c_6f79, 0, 0]);

const L1_GAS: u64 = 0x4c31_5f47_4153;
const L2_GAS: u64 = 0x4c32_5f47_4153;
const L1_DATA: u64 = 0x4c31_5f44_4154_41;

/// Computes the hash of a transaction with the field hasher `H`.
///
/// V1 transactions hash with Pedersen, V3 transactions with Poseidon. The hasher is a type
/// parameter so the preimage can be observed with a fake one.
pub trait ComputeTransactionHash {
    fn compute_hash<H: HasherT>(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement;
}

fn version(version: u8, offset_version: bool) -> FieldElement {
    let version = FieldElement::from(version);
    if offset_version { SIMULATE_TX_VERSION_OFFSET + version } else { version }
}

/// `tag << 192 | max_amount << 128 | max_price_per_unit`
fn prepare_resource_bound_value(tag: u64, resource_bounds: &ResourceBounds) -> FieldElement {
    let mut buffer = [0u8; 32];
    buffer[..8].copy_from_slice(&tag.to_be_bytes());
    buffer[8..16].copy_from_slice(&resource_bounds.max_amount.to_be_bytes());
    buffer[16..].copy_from_slice(&resource_bounds.max_price_per_unit.to_be_bytes());
    FieldElement::from_bytes_be(&buffer)
}

fn prepare_resource_bounds(resource_bounds: &ResourceBoundsMapping) -> Vec<FieldElement> {
    let mut bounds = vec![
        prepare_resource_bound_value(L1_GAS, &resource_bounds.l1_gas),
        prepare_resource_bound_value(L2_GAS, &resource_bounds.l2_gas),
    ];
    if let Some(l1_data_gas) = &resource_bounds.l1_data_gas {
        bounds.push(prepare_resource_bound_value(L1_DATA, l1_data_gas));
    }
    bounds
}

/// `(nonce_mode << 32) + fee_mode`
pub(crate) fn prepare_data_availability_modes(
    nonce_data_availability_mode: DataAvailabilityMode,
    fee_data_availability_mode: DataAvailabilityMode,
) -> FieldElement {
    let word = ((nonce_data_availability_mode as u64) << 32) + fee_data_availability_mode as u64;
    FieldElement::from(word)
}

impl ComputeTransactionHash for InvokeTransactionV1 {
    fn compute_hash<H: HasherT>(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement {
        let calldata_hash = H::compute_hash_on_elements(&self.calldata);

        let hash = H::compute_hash_on_elements(&[
            INVOKE_PREFIX,
            version(1, offset_version),
            self.sender_address,
            FieldElement::ZERO,
            calldata_hash,
            FieldElement::from(self.max_fee),
            chain_id,
            self.nonce,
        ]);
        log::trace!("[transactions] invoke v1 from {} hashed to {hash}", self.sender_address);
        hash
    }
}

impl ComputeTransactionHash for InvokeTransactionV3 {
    fn compute_hash<H: HasherT>(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement {
        let account_deployment_data_hash = H::compute_hash_on_elements(&self.account_deployment_data);
        let calldata_hash = H::compute_hash_on_elements(&self.calldata);

        let hash = compute_transaction_hash_common_v3::<H>(
            INVOKE_PREFIX,
            version(3, offset_version),
            self.sender_address,
            chain_id,
            self.nonce,
            self.tip,
            &self.paymaster_data,
            self.nonce_data_availability_mode,
            self.fee_data_availability_mode,
            &self.resource_bounds,
            vec![account_deployment_data_hash, calldata_hash],
        );
        log::trace!("[transactions] invoke v3 from {} hashed to {hash}", self.sender_address);
        hash
    }
}

impl ComputeTransactionHash for DeployAccountTransactionV1 {
    fn compute_hash<H: HasherT>(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement {
        let contract_address = self.contract_address();
        let mut calldata: Vec<FieldElement> = Vec::with_capacity(self.constructor_calldata.len() + 2);
        calldata.push(self.class_hash);
        calldata.push(self.contract_address_salt);
        calldata.extend_from_slice(&self.constructor_calldata);
        let calldata_hash = H::compute_hash_on_elements(&calldata);

        let hash = H::compute_hash_on_elements(&[
            DEPLOY_ACCOUNT_PREFIX,
            version(1, offset_version),
            contract_address,
            FieldElement::ZERO,
            calldata_hash,
            FieldElement::from(self.max_fee),
            chain_id,
            self.nonce,
        ]);
        log::trace!("[transactions] deploy account v1 of {contract_address} hashed to {hash}");
        hash
    }
}

impl ComputeTransactionHash for DeployAccountTransactionV3 {
    fn compute_hash<H: HasherT>(&self, chain_id: FieldElement, offset_version: bool) -> FieldElement {
        let contract_address = self.contract_address();
        let constructor_calldata_hash = H::compute_hash_on_elements(&self.constructor_calldata);

        let hash = compute_transaction_hash_common_v3::<H>(
            DEPLOY_ACCOUNT_PREFIX,
            version(3, offset_version),
            contract_address,
            chain_id,
            self.nonce,
            self.tip,
            &self.paymaster_data,
            self.nonce_data_availability_mode,
            self.fee_data_availability_mode,
            &self.resource_bounds,
            vec![constructor_calldata_hash, self.class_hash, self.contract_address_salt],
        );
        log::trace!("[transactions] deploy account v3 of {contract_address} hashed to {hash}");
        hash
    }
}

#[allow(clippy::too_many_arguments)]
fn compute_transaction_hash_common_v3<H: HasherT>(
    tx_hash_prefix: FieldElement,
    version: FieldElement,
    sender_address: FieldElement,
    chain_id: FieldElement,
    nonce: FieldElement,
    tip: u64,
    paymaster_data: &[FieldElement],
    nonce_data_availability_mode: DataAvailabilityMode,
    fee_data_availability_mode: DataAvailabilityMode,
    resource_bounds: &ResourceBoundsMapping,
    additional_data: Vec<FieldElement>,
) -> FieldElement {
    let mut fee_fields = vec![FieldElement::from(tip)];
    fee_fields.extend(prepare_resource_bounds(resource_bounds));
    let gas_hash = H::compute_hash_on_elements(&fee_fields);
    let paymaster_hash = H::compute_hash_on_elements(paymaster_data);
    let data_availability_modes =
        prepare_data_availability_modes(nonce_data_availability_mode, fee_data_availability_mode);
    let mut data_to_hash = vec![
        tx_hash_prefix,
        version,
        sender_address,
        gas_hash,
        paymaster_hash,
        chain_id,
        nonce,
        data_availability_modes,
    ];
    data_to_hash.extend(additional_data);
    H::compute_hash_on_elements(&data_to_hash)
}

#[cfg(test)]
#[path = "compute_hash_tests.rs"]
mod compute_hash_tests;
