use core::fmt;
use std::collections::HashMap;

use crate::{CairoCodecError, Result};

/// A named struct member or enum variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub kind: CairoType,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: CairoType) -> Self {
        Self { name: name.into(), kind }
    }
}

/// A fully resolved Cairo type.
///
/// Named structs and enums carry their definition inline so encoding and decoding
/// never go back to the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CairoType {
    Felt,
    Bool,
    /// `u8` to `u128`, by bit width.
    Uint(usize),
    /// `i8` to `i128`, by bit width.
    Int(usize),
    U256,
    ContractAddress,
    ClassHash,
    EthAddress,
    Bytes31,
    ByteArray,
    /// `Array<T>` and `Span<T>`, which share their serialization.
    Array(Box<CairoType>),
    Option(Box<CairoType>),
    Result(Box<CairoType>, Box<CairoType>),
    Tuple(Vec<CairoType>),
    Struct { name: String, members: Vec<Member> },
    Enum { name: String, variants: Vec<Member> },
}

/// Definition of a user type, members are given as type names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDef {
    Struct(Vec<(String, String)>),
    Enum(Vec<(String, String)>),
}

/// Caller supplied struct and enum definitions, keyed by full type name.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    definitions: HashMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_struct(mut self, name: &str, members: &[(&str, &str)]) -> Self {
        self.definitions.insert(name.to_string(), TypeDef::Struct(owned_pairs(members)));
        self
    }

    pub fn with_enum(mut self, name: &str, variants: &[(&str, &str)]) -> Self {
        self.definitions.insert(name.to_string(), TypeDef::Enum(owned_pairs(variants)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.definitions.get(name)
    }
}

impl FromIterator<(String, TypeDef)> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = (String, TypeDef)>>(iter: I) -> Self {
        Self { definitions: iter.into_iter().collect() }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(name, kind)| (name.to_string(), kind.to_string())).collect()
}

impl CairoType {
    /// Resolves a type name such as `core::array::Array::<core::felt252>` or
    /// `Option<(u8, MyStruct)>` against `registry`.
    ///
    /// # Errors
    ///
    /// [`CairoCodecError::UnknownType`] when a name is neither a built-in nor in the
    /// registry, or when a definition refers back to itself.
    pub fn parse(name: &str, registry: &TypeRegistry) -> Result<Self> {
        let mut stack = Vec::new();
        resolve(name, registry, &mut stack)
    }

    /// Smallest number of felts a value of this type serializes to.
    pub fn min_size(&self) -> usize {
        match self {
            Self::U256 => 2,
            Self::ByteArray => 3,
            Self::Tuple(members) => members.iter().map(Self::min_size).sum(),
            Self::Struct { members, .. } => members.iter().map(|member| member.kind.min_size()).sum(),
            _ => 1,
        }
    }
}

fn resolve(name: &str, registry: &TypeRegistry, stack: &mut Vec<String>) -> Result<CairoType> {
    let name = name.trim();
    let unknown = || CairoCodecError::UnknownType(name.to_string());

    if let Some(definition) = registry.get(name) {
        if stack.iter().any(|visited| visited == name) {
            log::debug!("[cairo-codec] type {name} refers to itself");
            return Err(unknown());
        }
        stack.push(name.to_string());
        let resolved = resolve_definition(name, definition, registry, stack);
        stack.pop();
        return resolved;
    }

    if let Some(body) = name.strip_prefix('(') {
        let body = body.strip_suffix(')').ok_or_else(unknown)?;
        let mut parts = split_top_level(body).ok_or_else(unknown)?;
        // Single element tuples are spelled `(T,)`.
        if parts.len() > 1 && parts.last().is_some_and(|part| part.trim().is_empty()) {
            parts.pop();
        }
        return parts.into_iter().map(|part| resolve(part, registry, stack)).collect::<Result<Vec<_>>>().map(CairoType::Tuple);
    }

    if let Some(open) = name.find('<') {
        let arguments = name[open + 1..].strip_suffix('>').ok_or_else(unknown)?;
        let base = name[..open].trim_end_matches("::");
        let arguments = split_top_level(arguments).ok_or_else(unknown)?;
        return match (last_segment(base), arguments.as_slice()) {
            ("Array" | "Span", [inner]) => Ok(CairoType::Array(Box::new(resolve(inner, registry, stack)?))),
            ("Option", [inner]) => Ok(CairoType::Option(Box::new(resolve(inner, registry, stack)?))),
            ("Result", [ok, err]) => Ok(CairoType::Result(
                Box::new(resolve(ok, registry, stack)?),
                Box::new(resolve(err, registry, stack)?),
            )),
            ("NonZero", [inner]) => resolve(inner, registry, stack),
            _ => Err(unknown()),
        };
    }

    primitive(name).ok_or_else(unknown)
}

fn resolve_definition(
    name: &str,
    definition: &TypeDef,
    registry: &TypeRegistry,
    stack: &mut Vec<String>,
) -> Result<CairoType> {
    let mut resolve_members = |pairs: &[(String, String)]| {
        pairs
            .iter()
            .map(|(member, kind)| -> Result<Member> { Ok(Member::new(member.clone(), resolve(kind, registry, stack)?)) })
            .collect::<Result<Vec<_>>>()
    };
    match definition {
        TypeDef::Struct(members) => Ok(CairoType::Struct { name: name.to_string(), members: resolve_members(members)? }),
        TypeDef::Enum(variants) => Ok(CairoType::Enum { name: name.to_string(), variants: resolve_members(variants)? }),
    }
}

fn primitive(name: &str) -> Option<CairoType> {
    if name.contains("::") && !name.starts_with("core::") {
        return None;
    }
    let kind = match last_segment(name) {
        "felt252" | "felt" => CairoType::Felt,
        "bool" => CairoType::Bool,
        "u8" => CairoType::Uint(8),
        "u16" => CairoType::Uint(16),
        "u32" | "usize" => CairoType::Uint(32),
        "u64" => CairoType::Uint(64),
        "u128" => CairoType::Uint(128),
        "i8" => CairoType::Int(8),
        "i16" => CairoType::Int(16),
        "i32" => CairoType::Int(32),
        "i64" => CairoType::Int(64),
        "i128" => CairoType::Int(128),
        "u256" => CairoType::U256,
        "ContractAddress" => CairoType::ContractAddress,
        "ClassHash" => CairoType::ClassHash,
        "EthAddress" => CairoType::EthAddress,
        "bytes31" => CairoType::Bytes31,
        "ByteArray" => CairoType::ByteArray,
        _ => return None,
    };
    Some(kind)
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Splits on commas that are not nested in parentheses or angle brackets.
fn split_top_level(body: &str) -> Option<Vec<&str>> {
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}

impl fmt::Display for CairoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Felt => write!(f, "felt252"),
            Self::Bool => write!(f, "bool"),
            Self::Uint(bits) => write!(f, "u{bits}"),
            Self::Int(bits) => write!(f, "i{bits}"),
            Self::U256 => write!(f, "u256"),
            Self::ContractAddress => write!(f, "ContractAddress"),
            Self::ClassHash => write!(f, "ClassHash"),
            Self::EthAddress => write!(f, "EthAddress"),
            Self::Bytes31 => write!(f, "bytes31"),
            Self::ByteArray => write!(f, "ByteArray"),
            Self::Array(inner) => write!(f, "Array<{inner}>"),
            Self::Option(inner) => write!(f, "Option<{inner}>"),
            Self::Result(ok, err) => write!(f, "Result<{ok}, {err}>"),
            Self::Tuple(members) => {
                write!(f, "(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                if members.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Self::Struct { name, .. } | Self::Enum { name, .. } => write!(f, "{name}"),
        }
    }
}
