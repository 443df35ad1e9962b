//! Cairo serialization: typed values to and from the flat field element sequences
//! used for calldata, return data and event payloads.

mod abi;
mod byte_array;
mod codec;
mod error;
mod felt_codec;
mod felt_reader;
mod types;
mod value;

#[cfg(test)]
mod tests;

pub use abi::{CairoContract, CairoEvent, CairoFunction};
pub use byte_array::{ByteArray, BYTES_PER_WORD};
pub use codec::{decode, decode_from, encode, encode_to};
pub use error::CairoCodecError;
pub use felt_codec::FeltCodec;
pub use felt_reader::FeltReader;
pub use types::{CairoType, Member, TypeDef, TypeRegistry};
pub use value::CairoValue;

pub type Result<T> = core::result::Result<T, CairoCodecError>;
