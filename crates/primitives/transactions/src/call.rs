//! Multicall calldata of Starknet accounts.

use dp_felt::FieldElement;
use dp_hashers::get_selector_from_name;
use serde::{Deserialize, Serialize};

/// A single contract call executed by an account's `__execute__`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub to: FieldElement,
    pub selector: FieldElement,
    pub calldata: Vec<FieldElement>,
}

impl Call {
    /// Builds a call to the entry point named `entry_point`.
    pub fn new(to: FieldElement, entry_point: &str, calldata: Vec<FieldElement>) -> Self {
        Self { to, selector: get_selector_from_name(entry_point), calldata }
    }
}

/// Flattens calls into `[call_count, (to, selector, calldata_len, calldata...)...]`.
pub fn encode_calls(calls: &[Call]) -> Vec<FieldElement> {
    let mut execute_calldata = vec![FieldElement::from(calls.len())];
    for call in calls {
        execute_calldata.push(call.to);
        execute_calldata.push(call.selector);
        execute_calldata.push(FieldElement::from(call.calldata.len()));
        execute_calldata.extend_from_slice(&call.calldata);
    }
    execute_calldata
}
