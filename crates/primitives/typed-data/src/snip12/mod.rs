//! SNIP-12 typed data hashing for Starknet.
//!
//! Revision 0 hashes with Pedersen arrays and encodes strings as short strings. Revision 1
//! hashes with Poseidon, quotes names in type encodings, hashes strings as byte arrays and
//! adds enums, signed and bounded integers and the `u256`, `TokenAmount` and `NftId` presets.

mod merkle;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::marker::PhantomData;

use dp_cairo_codec::ByteArray;
use dp_felt::FieldElement;
use dp_hashers::pedersen::PedersenHasher;
use dp_hashers::poseidon::PoseidonHasher;
use dp_hashers::{get_selector_from_name, starknet_keccak, HasherT};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use self::merkle::{verify_proof, MerkleTree};
use crate::value::{as_array, as_object, member, parse_bool, parse_integer};
use crate::{Result, TypedDataError, TypedDataField, Types};

/// `"StarkNet Message"` as a short string.
pub const STARKNET_MESSAGE_PREFIX: FieldElement = FieldElement::from_raw([0x204d_6573_7361_6765, 0x5374_6172_6b4e_6574, 0, 0]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Revision {
    V0,
    V1,
}

impl Revision {
    /// Name of the domain type of the revision.
    pub fn domain_type(&self) -> &'static str {
        match self {
            Revision::V0 => "StarkNetDomain",
            Revision::V1 => "StarknetDomain",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: Types,
    pub primary_type: String,
    pub domain: Value,
    pub message: Value,
}

impl TypedData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Revision named by `domain.revision`, 0 when absent. Its domain type must be declared.
    pub fn revision(&self) -> Result<Revision> {
        let revision = match self.domain.get("revision") {
            None | Some(Value::Null) => Revision::V0,
            Some(value) => match value {
                Value::Number(number) if number.as_u64() == Some(0) => Revision::V0,
                Value::Number(number) if number.as_u64() == Some(1) => Revision::V1,
                Value::String(text) if text == "0" => Revision::V0,
                Value::String(text) if text == "1" => Revision::V1,
                _ => return Err(TypedDataError::InvalidRevision(value.to_string())),
            },
        };
        if !self.types.contains_key(revision.domain_type()) {
            return Err(TypedDataError::UnknownType(revision.domain_type().to_string()));
        }
        Ok(revision)
    }

    pub fn encode_type(&self, name: &str) -> Result<String> {
        Encoder::<PedersenHasher>::new(&self.types, self.revision()?).encode_type(name)
    }

    pub fn type_hash(&self, name: &str) -> Result<FieldElement> {
        Encoder::<PedersenHasher>::new(&self.types, self.revision()?).type_hash(name)
    }

    pub fn struct_hash(&self, name: &str, data: &Value) -> Result<FieldElement> {
        match self.revision()? {
            Revision::V0 => Encoder::<PedersenHasher>::new(&self.types, Revision::V0).struct_hash(name, data),
            Revision::V1 => Encoder::<PoseidonHasher>::new(&self.types, Revision::V1).struct_hash(name, data),
        }
    }

    pub fn domain_hash(&self) -> Result<FieldElement> {
        self.struct_hash(self.revision()?.domain_type(), &self.domain)
    }

    /// `hash(["StarkNet Message", domainHash, account, structHash(message)])`
    pub fn message_hash(&self, account: FieldElement) -> Result<FieldElement> {
        let hash = match self.revision()? {
            Revision::V0 => Encoder::<PedersenHasher>::new(&self.types, Revision::V0).message_hash(self, account),
            Revision::V1 => Encoder::<PoseidonHasher>::new(&self.types, Revision::V1).message_hash(self, account),
        }?;
        log::trace!("[typed-data] snip12 {} message for {account} hashed to {hash}", self.primary_type);
        Ok(hash)
    }
}

/// Hashes values of a type set with the field hasher `H`.
pub(crate) struct Encoder<'a, H> {
    types: &'a Types,
    revision: Revision,
    _hasher: PhantomData<H>,
}

impl<'a, H: HasherT> Encoder<'a, H> {
    pub(crate) fn new(types: &'a Types, revision: Revision) -> Self {
        Self { types, revision, _hasher: PhantomData }
    }

    /// Declared members of `name`, falling back to the revision 1 presets.
    fn fields(&self, name: &str) -> Option<Cow<'a, [TypedDataField]>> {
        if let Some(fields) = self.types.get(name) {
            return Some(Cow::Borrowed(fields));
        }
        match self.revision {
            Revision::V1 => preset_fields(name).map(Cow::Owned),
            Revision::V0 => None,
        }
    }

    fn fields_of(&self, name: &str) -> Result<Cow<'a, [TypedDataField]>> {
        self.fields(name).ok_or_else(|| TypedDataError::UnknownType(name.to_string()))
    }

    /// Types a member refers to: array elements, enum definitions and variant payloads.
    fn referenced_types<'f>(&self, field: &'f TypedDataField) -> Vec<&'f str> {
        let kind = field.kind.as_str();
        if self.revision == Revision::V1 {
            if kind == "enum" {
                return field.contains.as_deref().into_iter().collect();
            }
            if let Some(elements) = tuple_elements(kind) {
                return elements.into_iter().map(|element| element.trim_end_matches('*')).collect();
            }
        }
        vec![kind.trim_end_matches('*')]
    }

    pub(crate) fn encode_type(&self, primary: &str) -> Result<String> {
        let mut dependencies = BTreeSet::new();
        let mut pending = vec![primary.to_string()];
        while let Some(name) = pending.pop() {
            for field in self.fields_of(&name)?.iter() {
                for reference in self.referenced_types(field) {
                    if reference != primary && self.fields(reference).is_some() && dependencies.insert(reference.to_string())
                    {
                        pending.push(reference.to_string());
                    }
                }
            }
        }

        let mut encoded = self.encode_single_type(primary)?;
        for dependency in &dependencies {
            encoded.push_str(&self.encode_single_type(dependency)?);
        }
        Ok(encoded)
    }

    fn encode_single_type(&self, name: &str) -> Result<String> {
        let members = self
            .fields_of(name)?
            .iter()
            .map(|field| match self.revision {
                Revision::V0 => format!("{}:{}", field.name, field.kind),
                Revision::V1 => {
                    let kind = match (field.kind.as_str(), &field.contains) {
                        ("enum", Some(contains)) => contains.as_str(),
                        (kind, _) => kind,
                    };
                    let kind = match tuple_elements(kind) {
                        Some(elements) => {
                            let elements = elements.iter().map(|element| format!("\"{element}\"")).collect::<Vec<_>>();
                            format!("({})", elements.join(","))
                        }
                        None => format!("\"{kind}\""),
                    };
                    format!("\"{}\":{kind}", field.name)
                }
            })
            .collect::<Vec<_>>();
        Ok(match self.revision {
            Revision::V0 => format!("{name}({})", members.join(",")),
            Revision::V1 => format!("\"{name}\"({})", members.join(",")),
        })
    }

    pub(crate) fn type_hash(&self, name: &str) -> Result<FieldElement> {
        Ok(starknet_keccak(self.encode_type(name)?.as_bytes()))
    }

    /// `hash([typeHash, encode(member)...])`
    pub(crate) fn struct_hash(&self, name: &str, data: &Value) -> Result<FieldElement> {
        let fields = self.fields_of(name)?;
        let object = as_object(name, data)?;
        let mut encoded = Vec::with_capacity(fields.len() + 1);
        encoded.push(self.type_hash(name)?);
        for field in fields.iter() {
            encoded.push(self.encode_member(field, member(name, object, &field.name)?)?);
        }
        Ok(H::compute_hash_on_elements(&encoded))
    }

    fn encode_member(&self, field: &TypedDataField, value: &Value) -> Result<FieldElement> {
        match (field.kind.as_str(), &field.contains) {
            ("merkletree", Some(contains)) => {
                let leaves = as_array(&field.kind, value)?
                    .iter()
                    .map(|leaf| self.encode_value(contains, leaf))
                    .collect::<Result<Vec<_>>>()?;
                Ok(MerkleTree::new::<H>(leaves)?.root)
            }
            ("enum", Some(contains)) if self.revision == Revision::V1 => self.encode_enum(contains, value),
            (kind, _) => self.encode_value(kind, value),
        }
    }

    /// `hash([variantIndex, encode(argument)...])` for a `{ "Variant": [arguments...] }` value.
    fn encode_enum(&self, name: &str, value: &Value) -> Result<FieldElement> {
        let variants = self.fields_of(name)?;
        let object = as_object(name, value)?;
        let (variant, arguments) = match (object.len(), object.iter().next()) {
            (1, Some(entry)) => entry,
            _ => return Err(TypedDataError::invalid_value(name, value)),
        };
        let index = variants
            .iter()
            .position(|candidate| &candidate.name == variant)
            .ok_or_else(|| TypedDataError::invalid_value(name, value))?;
        let kinds = tuple_elements(&variants[index].kind)
            .ok_or_else(|| TypedDataError::UnsupportedType(variants[index].kind.clone()))?;
        let arguments = match arguments {
            Value::Null => &[][..],
            arguments => as_array(name, arguments)?.as_slice(),
        };
        if arguments.len() != kinds.len() {
            return Err(TypedDataError::invalid_value(name, value));
        }

        let mut encoded = Vec::with_capacity(kinds.len() + 1);
        encoded.push(FieldElement::from(index));
        for (kind, argument) in kinds.iter().zip(arguments) {
            encoded.push(self.encode_value(kind, argument)?);
        }
        Ok(H::compute_hash_on_elements(&encoded))
    }

    fn encode_value(&self, kind: &str, value: &Value) -> Result<FieldElement> {
        if let Some(inner) = kind.strip_suffix('*') {
            let items = as_array(kind, value)?
                .iter()
                .map(|item| self.encode_value(inner, item))
                .collect::<Result<Vec<_>>>()?;
            return Ok(H::compute_hash_on_elements(&items));
        }
        if self.fields(kind).is_some() {
            return self.struct_hash(kind, value);
        }

        match (self.revision, kind) {
            (_, "felt" | "ClassHash" | "ContractAddress") | (Revision::V1, "shortstring") => parse_felt(kind, value),
            (_, "bool") => Ok(FieldElement::from(parse_bool(kind, value)?)),
            (_, "selector") => match value.as_str() {
                Some(name) if !name.starts_with("0x") => Ok(get_selector_from_name(name)),
                _ => parse_felt(kind, value),
            },
            (Revision::V0, "string") => parse_felt(kind, value),
            (Revision::V1, "string") => {
                let text = value.as_str().ok_or_else(|| TypedDataError::invalid_value(kind, value))?;
                Ok(H::compute_hash_on_elements(&ByteArray::from(text).to_felts()))
            }
            (Revision::V1, "u128" | "timestamp") => match parse_integer(kind, value)? {
                (false, magnitude) if magnitude.bits() <= 128 => Ok(FieldElement::from_u256(magnitude)),
                _ => Err(TypedDataError::invalid_value(kind, value)),
            },
            (Revision::V1, "i128") => {
                let (negative, magnitude) = parse_integer(kind, value)?;
                let bound = U256::one() << 127;
                match negative {
                    false if magnitude < bound => Ok(FieldElement::from_u256(magnitude)),
                    true if magnitude <= bound => Ok(-FieldElement::from_u256(magnitude)),
                    _ => Err(TypedDataError::invalid_value(kind, value)),
                }
            }
            (Revision::V0, _) => parse_felt(kind, value),
            (Revision::V1, _) => Err(TypedDataError::UnsupportedType(kind.to_string())),
        }
    }

    fn message_hash(&self, typed_data: &TypedData, account: FieldElement) -> Result<FieldElement> {
        let domain_hash = self.struct_hash(self.revision.domain_type(), &typed_data.domain)?;
        let struct_hash = self.struct_hash(&typed_data.primary_type, &typed_data.message)?;
        Ok(H::compute_hash_on_elements(&[STARKNET_MESSAGE_PREFIX, domain_hash, account, struct_hash]))
    }
}

/// Elements of an enum variant type such as `(felt,u128*)`. `()` has none.
fn tuple_elements(kind: &str) -> Option<Vec<&str>> {
    let body = kind.strip_prefix('(')?.strip_suffix(')')?;
    Some(body.split(',').map(str::trim).filter(|element| !element.is_empty()).collect())
}

/// A felt given as a number, a `0x` hex string, a decimal string or a short string.
fn parse_felt(kind: &str, value: &Value) -> Result<FieldElement> {
    match value {
        Value::Number(number) => {
            number.as_u64().map(FieldElement::from).ok_or_else(|| TypedDataError::invalid_value(kind, value))
        }
        Value::String(text) if text.starts_with("0x") || text.starts_with("0X") => Ok(FieldElement::from_hex_be(text)?),
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            Ok(FieldElement::from_dec_str(text)?)
        }
        Value::String(text) => Ok(FieldElement::from_short_string(text)?),
        _ => Err(TypedDataError::invalid_value(kind, value)),
    }
}

fn preset_fields(name: &str) -> Option<Vec<TypedDataField>> {
    let fields = match name {
        "u256" => vec![TypedDataField::new("low", "u128"), TypedDataField::new("high", "u128")],
        "TokenAmount" => {
            vec![TypedDataField::new("token_address", "ContractAddress"), TypedDataField::new("amount", "u256")]
        }
        "NftId" => {
            vec![TypedDataField::new("collection_address", "ContractAddress"), TypedDataField::new("token_id", "u256")]
        }
        _ => return None,
    };
    Some(fields)
}
