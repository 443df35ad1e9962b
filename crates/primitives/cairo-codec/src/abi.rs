use std::collections::HashMap;

use dp_felt::FieldElement;
use dp_hashers::{get_selector_from_name, starknet_keccak};

use crate::codec::decode_exact;
use crate::{encode_to, CairoCodecError, CairoType, CairoValue, Member, Result};

/// An external contract function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CairoFunction {
    pub name: String,
    pub inputs: Vec<Member>,
    pub outputs: Vec<CairoType>,
}

impl CairoFunction {
    pub fn new(name: impl Into<String>, inputs: Vec<Member>, outputs: Vec<CairoType>) -> Self {
        Self { name: name.into(), inputs, outputs }
    }

    pub fn selector(&self) -> FieldElement {
        get_selector_from_name(&self.name)
    }

    /// Serializes the arguments into calldata.
    pub fn encode_inputs(&self, values: &[CairoValue]) -> Result<Vec<FieldElement>> {
        if values.len() != self.inputs.len() {
            return Err(CairoCodecError::ArgumentCountMismatch { expected: self.inputs.len(), actual: values.len() });
        }
        let mut calldata = Vec::new();
        for (input, value) in self.inputs.iter().zip(values) {
            encode_to(&input.kind, value, &mut calldata)?;
        }
        log::trace!("[cairo-codec] encoded {} arguments of {} into {} felts", values.len(), self.name, calldata.len());
        Ok(calldata)
    }

    pub fn decode_inputs(&self, calldata: &[FieldElement]) -> Result<Vec<CairoValue>> {
        decode_exact(self.inputs.iter().map(|input| &input.kind), calldata)
    }

    /// Decodes return data, which must hold exactly the declared outputs.
    pub fn decode_outputs(&self, data: &[FieldElement]) -> Result<Vec<CairoValue>> {
        decode_exact(&self.outputs, data)
    }
}

/// A contract event. Its first key is the selector of its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CairoEvent {
    pub name: String,
    pub keys: Vec<Member>,
    pub data: Vec<Member>,
}

impl CairoEvent {
    pub fn new(name: impl Into<String>, keys: Vec<Member>, data: Vec<Member>) -> Self {
        Self { name: name.into(), keys, data }
    }

    /// Starknet keccak of the event name without its module path.
    pub fn selector(&self) -> FieldElement {
        let short_name = self.name.rsplit("::").next().unwrap_or(&self.name);
        starknet_keccak(short_name.as_bytes())
    }

    /// Decodes an emitted event into its members, keys first.
    pub fn decode(&self, keys: &[FieldElement], data: &[FieldElement]) -> Result<Vec<(String, CairoValue)>> {
        let (selector, keys) = keys.split_first().ok_or(CairoCodecError::BufferUnderrun { offset: 0, needed: 1 })?;
        if *selector != self.selector() {
            log::debug!("[cairo-codec] event key {selector} is not the selector of {}", self.name);
            return Err(CairoCodecError::EventSelectorMismatch(self.name.clone()));
        }
        let key_values = decode_exact(self.keys.iter().map(|member| &member.kind), keys)?;
        let data_values = decode_exact(self.data.iter().map(|member| &member.kind), data)?;
        Ok(self
            .keys
            .iter()
            .chain(&self.data)
            .map(|member| member.name.clone())
            .zip(key_values.into_iter().chain(data_values))
            .collect())
    }
}

/// Immutable registry of a contract's functions and events.
#[derive(Clone, Debug, Default)]
pub struct CairoContract {
    functions: Vec<CairoFunction>,
    events: Vec<CairoEvent>,
    functions_by_name: HashMap<String, usize>,
    functions_by_selector: HashMap<FieldElement, usize>,
    events_by_name: HashMap<String, usize>,
    events_by_selector: HashMap<FieldElement, usize>,
}

impl CairoContract {
    pub fn new(functions: Vec<CairoFunction>, events: Vec<CairoEvent>) -> Self {
        let functions_by_name = functions.iter().enumerate().map(|(i, function)| (function.name.clone(), i)).collect();
        let functions_by_selector = functions.iter().enumerate().map(|(i, function)| (function.selector(), i)).collect();
        let events_by_name = events.iter().enumerate().map(|(i, event)| (event.name.clone(), i)).collect();
        let events_by_selector = events.iter().enumerate().map(|(i, event)| (event.selector(), i)).collect();
        Self { functions, events, functions_by_name, functions_by_selector, events_by_name, events_by_selector }
    }

    pub fn function(&self, name: &str) -> Option<&CairoFunction> {
        self.functions_by_name.get(name).map(|i| &self.functions[*i])
    }

    pub fn function_by_selector(&self, selector: &FieldElement) -> Option<&CairoFunction> {
        self.functions_by_selector.get(selector).map(|i| &self.functions[*i])
    }

    pub fn event(&self, name: &str) -> Option<&CairoEvent> {
        self.events_by_name.get(name).map(|i| &self.events[*i])
    }

    pub fn event_by_selector(&self, selector: &FieldElement) -> Option<&CairoEvent> {
        self.events_by_selector.get(selector).map(|i| &self.events[*i])
    }
}
