//! EVM contract ABI: type signatures, head/tail value encoding, function calls and event logs.

mod contract;
mod decoder;
mod encoder;
mod error;
mod event;
mod function;
mod param_type;
mod token;


pub use contract::Contract;
pub use decoder::decode;
pub use encoder::encode;
pub use error::AbiError;
pub use event::{DecodedLog, Event, EventParam, LogParam, RawLog};
pub use function::{Function, Param};
pub use param_type::ParamType;
pub use primitive_types::{H160, H256, U256};
pub use token::Token;

/// Size of an ABI slot in bytes.
pub const WORD_SIZE: usize = 32;

pub type Selector = [u8; 4];
