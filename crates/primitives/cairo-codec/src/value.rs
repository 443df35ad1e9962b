use dp_felt::{FieldElement, U256};

/// A Cairo value, shaped like the [`CairoType`](crate::CairoType) it is encoded with.
///
/// `felt252`, `ContractAddress`, `ClassHash`, `EthAddress` and `bytes31` all hold a
/// [`CairoValue::Felt`]. `Result<T, E>` values are enums with `Ok` at index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CairoValue {
    Felt(FieldElement),
    Bool(bool),
    Uint(u128),
    Int(i128),
    U256(U256),
    ByteArray(Vec<u8>),
    Array(Vec<CairoValue>),
    Option(Option<Box<CairoValue>>),
    Tuple(Vec<CairoValue>),
    Struct(Vec<(String, CairoValue)>),
    Enum { index: usize, payload: Box<CairoValue> },
}

impl CairoValue {
    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    pub fn string(value: &str) -> Self {
        Self::ByteArray(value.as_bytes().to_vec())
    }

    pub fn some(value: CairoValue) -> Self {
        Self::Option(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Self::Option(None)
    }

    pub fn variant(index: usize, payload: CairoValue) -> Self {
        Self::Enum { index, payload: Box::new(payload) }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Felt(_) => "felt",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::U256(_) => "u256",
            Self::ByteArray(_) => "byte array",
            Self::Array(_) => "array",
            Self::Option(_) => "option",
            Self::Tuple(_) => "tuple",
            Self::Struct(_) => "struct",
            Self::Enum { .. } => "enum",
        }
    }
}

impl From<FieldElement> for CairoValue {
    fn from(value: FieldElement) -> Self {
        Self::Felt(value)
    }
}
