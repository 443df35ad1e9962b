use dp_hashers::keccak256;
use primitive_types::H256;

use crate::decoder::decode_word;
use crate::encoder::encode_topic_preimage;
use crate::function::{canonical_signature, parse_signature};
use crate::{decode, encode, AbiError, ParamType, Token};

/// An event argument, indexed arguments are stored in topics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventParam {
    pub name: String,
    pub kind: ParamType,
    pub indexed: bool,
}

impl EventParam {
    pub fn new(name: impl Into<String>, kind: ParamType, indexed: bool) -> Self {
        Self { name: name.into(), kind, indexed }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<EventParam>,
    /// Anonymous events do not carry their signature hash as first topic.
    pub anonymous: bool,
}

/// Topics and data of an emitted log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawLog {
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogParam {
    pub name: String,
    pub value: Token,
}

/// Event arguments in declaration order.
///
/// Indexed arguments of dynamic or composite types only survive as their hash and
/// are returned as [`Token::FixedBytes`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedLog {
    pub params: Vec<LogParam>,
}

impl DecodedLog {
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.params.iter().find(|param| param.name == name).map(|param| &param.value)
    }
}

impl Event {
    /// Parses an `Name(type,...)` signature, the first `indexed` arguments are
    /// marked as indexed.
    pub fn parse(signature: &str, indexed: usize) -> Result<Self, AbiError> {
        let (name, kinds) = parse_signature(signature)?;
        let inputs =
            kinds.into_iter().enumerate().map(|(i, kind)| EventParam::new(format!("arg{i}"), kind, i < indexed)).collect();
        Ok(Self { name, inputs, anonymous: false })
    }

    pub fn signature(&self) -> String {
        canonical_signature(&self.name, self.inputs.iter().map(|param| &param.kind))
    }

    pub fn topic0(&self) -> H256 {
        keccak256(self.signature())
    }

    /// Topics to filter on, `None` entries match any value.
    pub fn encode_topics(&self, values: &[Option<Token>]) -> Result<Vec<Option<H256>>, AbiError> {
        let indexed: Vec<&EventParam> = self.indexed_params().collect();
        if values.len() != indexed.len() {
            return Err(AbiError::ArgumentCountMismatch { expected: indexed.len(), actual: values.len() });
        }
        let mut topics = Vec::with_capacity(values.len() + 1);
        if !self.anonymous {
            topics.push(Some(self.topic0()));
        }
        for (param, value) in indexed.into_iter().zip(values) {
            topics.push(value.as_ref().map(|value| encode_topic(&param.kind, value)).transpose()?);
        }
        Ok(topics)
    }

    /// Builds the log this event emits for `tokens`, given in declaration order.
    pub fn encode_log(&self, tokens: &[Token]) -> Result<RawLog, AbiError> {
        if tokens.len() != self.inputs.len() {
            return Err(AbiError::ArgumentCountMismatch { expected: self.inputs.len(), actual: tokens.len() });
        }
        let mut topics = Vec::new();
        if !self.anonymous {
            topics.push(self.topic0());
        }
        let mut data_types = Vec::new();
        let mut data_tokens = Vec::new();
        for (param, token) in self.inputs.iter().zip(tokens) {
            if param.indexed {
                topics.push(encode_topic(&param.kind, token)?);
            } else {
                data_types.push(param.kind.clone());
                data_tokens.push(token.clone());
            }
        }
        Ok(RawLog { topics, data: encode(&data_types, &data_tokens)? })
    }

    pub fn decode_log(&self, log: &RawLog) -> Result<DecodedLog, AbiError> {
        let mut topics = log.topics.iter();
        if !self.anonymous && topics.next() != Some(&self.topic0()) {
            log::debug!("[evm-abi] log topic0 does not match event {}", self.signature());
            return Err(AbiError::EventSignatureMismatch(self.signature()));
        }

        let indexed_count = self.indexed_params().count();
        if topics.len() != indexed_count {
            return Err(AbiError::ArgumentCountMismatch { expected: indexed_count, actual: topics.len() });
        }

        let data_types: Vec<ParamType> =
            self.inputs.iter().filter(|param| !param.indexed).map(|param| param.kind.clone()).collect();
        let mut data_tokens = decode(&data_types, &log.data)?.into_iter();

        let mut params = Vec::with_capacity(self.inputs.len());
        for param in &self.inputs {
            let value = if param.indexed {
                let topic = topics.next().ok_or(AbiError::ArgumentCountMismatch {
                    expected: indexed_count,
                    actual: log.topics.len(),
                })?;
                if param.kind.is_value_type() {
                    decode_word(&param.kind, topic.as_bytes())?
                } else {
                    Token::FixedBytes(topic.as_bytes().to_vec())
                }
            } else {
                data_tokens.next().ok_or(AbiError::ArgumentCountMismatch {
                    expected: data_types.len(),
                    actual: params.len(),
                })?
            };
            params.push(LogParam { name: param.name.clone(), value });
        }

        Ok(DecodedLog { params })
    }

    fn indexed_params(&self) -> impl Iterator<Item = &EventParam> {
        self.inputs.iter().filter(|param| param.indexed)
    }
}

fn encode_topic(kind: &ParamType, token: &Token) -> Result<H256, AbiError> {
    match (kind, token) {
        (kind, token) if kind.is_value_type() => {
            let word = encode(core::slice::from_ref(kind), core::slice::from_ref(token))?;
            Ok(H256::from_slice(&word))
        }
        (ParamType::Bytes, Token::Bytes(bytes)) => Ok(keccak256(bytes)),
        (ParamType::String, Token::String(value)) => Ok(keccak256(value)),
        _ => Ok(keccak256(encode_topic_preimage(kind, token)?)),
    }
}
