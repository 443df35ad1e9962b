use dp_hashers::keccak256;

use crate::param_type::split_top_level;
use crate::{decode, encode, AbiError, ParamType, Selector, Token};

/// A named function or event argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamType,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self { name: name.into(), kind }
    }
}

/// A contract function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
}

impl Function {
    /// Parses a `name(type,...)` signature, arguments are left unnamed.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let (name, inputs) = parse_signature(signature)?;
        Ok(Self {
            name,
            inputs: inputs.into_iter().map(|kind| Param::new(String::new(), kind)).collect(),
            outputs: Vec::new(),
        })
    }

    pub fn with_outputs(mut self, outputs: Vec<ParamType>) -> Self {
        self.outputs = outputs.into_iter().map(|kind| Param::new(String::new(), kind)).collect();
        self
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, self.inputs.iter().map(|param| &param.kind))
    }

    pub fn selector(&self) -> Selector {
        let hash = keccak256(self.signature());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash.as_bytes()[..4]);
        selector
    }

    /// Calldata: selector followed by the encoded arguments.
    pub fn encode_input(&self, tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
        let mut calldata = self.selector().to_vec();
        calldata.extend(encode(&self.input_types(), tokens)?);
        log::trace!("[evm-abi] encoded call to {} ({} bytes)", self.signature(), calldata.len());
        Ok(calldata)
    }

    /// Decodes calldata produced by [`Function::encode_input`].
    pub fn decode_input(&self, calldata: &[u8]) -> Result<Vec<Token>, AbiError> {
        let selector = calldata.get(..4).ok_or(AbiError::BufferUnderrun { offset: 0, needed: 4 })?;
        if selector != self.selector() {
            log::debug!("[evm-abi] calldata selector 0x{} does not match {}", hex::encode(selector), self.signature());
            return Err(AbiError::SelectorMismatch(self.signature()));
        }
        decode(&self.input_types(), &calldata[4..])
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        let types: Vec<ParamType> = self.outputs.iter().map(|param| param.kind.clone()).collect();
        decode(&types, data)
    }

    fn input_types(&self) -> Vec<ParamType> {
        self.inputs.iter().map(|param| param.kind.clone()).collect()
    }
}

pub(crate) fn canonical_signature<'a>(name: &str, kinds: impl Iterator<Item = &'a ParamType>) -> String {
    let kinds: Vec<String> = kinds.map(ToString::to_string).collect();
    format!("{name}({})", kinds.join(","))
}

pub(crate) fn parse_signature(signature: &str) -> Result<(String, Vec<ParamType>), AbiError> {
    let signature = signature.trim();
    let malformed = || AbiError::UnknownType(signature.to_string());
    let open = signature.find('(').ok_or_else(malformed)?;
    let name = &signature[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(malformed());
    }
    let body = signature[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    let kinds = split_top_level(body).ok_or_else(malformed)?;
    let kinds = kinds.into_iter().map(ParamType::parse).collect::<Result<Vec<_>, _>>()?;
    Ok((name.to_string(), kinds))
}
