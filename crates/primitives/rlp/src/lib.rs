//! Recursive Length Prefix (RLP) serialization, the canonical byte encoding of Ethereum.
//!
//! An [`RlpItem`] is either a byte string or a list of items. Encoding follows the
//! protocol rules exactly and decoding is their strict inverse: anything a canonical
//! encoder would not have produced is rejected with [`RlpError::MalformedEncoding`].

mod error;
mod item;


pub use error::RlpError;
pub use item::RlpItem;

/// Offset of short string prefixes.
const STRING_OFFSET: u8 = 0x80;
/// Offset of short list prefixes.
const LIST_OFFSET: u8 = 0xc0;
/// Payloads from this length on use a length-of-length prefix.
const LONG_PAYLOAD_THRESHOLD: usize = 56;
/// Maximum nesting of lists accepted by the decoder.
pub const MAX_DEPTH: usize = 128;

/// Encodes a single item.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    item.encode_to(&mut out);
    out
}

/// Encodes a list made of `items`.
pub fn encode_list(items: &[RlpItem]) -> Vec<u8> {
    let mut payload = Vec::new();
    for item in items {
        item.encode_to(&mut payload);
    }
    let mut out = Vec::with_capacity(payload.len() + 9);
    encode_header(payload.len(), LIST_OFFSET, &mut out);
    out.extend_from_slice(&payload);
    out
}

/// Decodes exactly one item spanning the whole input.
///
/// # Errors
///
/// Fails on empty input, malformed prefixes, truncated payloads and trailing bytes.
pub fn decode(data: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, end) = decode_at(data, 0)?;
    if end != data.len() {
        return Err(RlpError::malformed(end, "trailing bytes after item"));
    }
    Ok(item)
}

/// Decodes the item starting at `offset`, returning it with the offset right after it.
///
/// # Errors
///
/// Fails when `offset` is past the end, on malformed prefixes and truncated payloads.
pub fn decode_at(data: &[u8], offset: usize) -> Result<(RlpItem, usize), RlpError> {
    decode_item(data, offset, 0)
}

/// Decodes consecutive items until the end of `data`.
///
/// # Errors
///
/// Fails on the first malformed item.
pub fn decode_all(data: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    let mut cursor = 0;
    while cursor < data.len() {
        let (item, next) = decode_at(data, cursor)?;
        items.push(item);
        cursor = next;
    }
    Ok(items)
}

pub(crate) fn encode_header(payload_len: usize, offset: u8, out: &mut Vec<u8>) {
    if payload_len < LONG_PAYLOAD_THRESHOLD {
        out.push(offset + payload_len as u8);
    } else {
        let be_bytes = (payload_len as u64).to_be_bytes();
        let len_bytes = minimal_be_bytes(&be_bytes);
        out.push(offset + 55 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
}

/// Strips the leading zero bytes of a big-endian integer.
pub(crate) fn minimal_be_bytes(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn decode_item(data: &[u8], offset: usize, depth: usize) -> Result<(RlpItem, usize), RlpError> {
    if depth > MAX_DEPTH {
        return Err(RlpError::malformed(offset, "nesting too deep"));
    }
    let prefix = *data.get(offset).ok_or_else(|| {
        if data.is_empty() { RlpError::malformed(offset, "empty input") } else { RlpError::malformed(offset, "unexpected end of input") }
    })?;

    match prefix {
        0x00..=0x7f => Ok((RlpItem::Bytes(vec![prefix]), offset + 1)),
        0x80..=0xb7 => {
            let len = (prefix - STRING_OFFSET) as usize;
            let start = offset + 1;
            let payload = payload(data, start, len)?;
            if len == 1 && payload[0] < STRING_OFFSET {
                return Err(RlpError::malformed(offset, "single byte below 0x80 must encode as itself"));
            }
            Ok((RlpItem::Bytes(payload.to_vec()), start + len))
        }
        0xb8..=0xbf => {
            let len_of_len = (prefix - 0xb7) as usize;
            let len = long_length(data, offset + 1, len_of_len)?;
            let start = offset + 1 + len_of_len;
            let payload = payload(data, start, len)?;
            Ok((RlpItem::Bytes(payload.to_vec()), start + len))
        }
        0xc0..=0xf7 => {
            let len = (prefix - LIST_OFFSET) as usize;
            let start = offset + 1;
            let items = decode_list(data, start, len, depth)?;
            Ok((RlpItem::List(items), start + len))
        }
        0xf8..=0xff => {
            let len_of_len = (prefix - 0xf7) as usize;
            let len = long_length(data, offset + 1, len_of_len)?;
            let start = offset + 1 + len_of_len;
            let items = decode_list(data, start, len, depth)?;
            Ok((RlpItem::List(items), start + len))
        }
    }
}

fn decode_list(data: &[u8], start: usize, len: usize, depth: usize) -> Result<Vec<RlpItem>, RlpError> {
    let end = payload(data, start, len).map(|_| start + len)?;
    // Children only see the list payload, an item overrunning it is truncated.
    let bounded = &data[..end];
    let mut items = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let (item, next) = decode_item(bounded, cursor, depth + 1)?;
        items.push(item);
        cursor = next;
    }
    Ok(items)
}

fn payload(data: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or_else(|| RlpError::malformed(start, "length overflow"))?;
    data.get(start..end).ok_or_else(|| RlpError::malformed(start, "declared length exceeds remaining input"))
}

fn long_length(data: &[u8], start: usize, len_of_len: usize) -> Result<usize, RlpError> {
    if len_of_len > core::mem::size_of::<usize>() {
        return Err(RlpError::malformed(start, "length of length too large"));
    }
    let bytes = payload(data, start, len_of_len)?;
    if bytes[0] == 0 {
        return Err(RlpError::malformed(start, "length has leading zero bytes"));
    }
    let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
    if len < LONG_PAYLOAD_THRESHOLD {
        return Err(RlpError::malformed(start, "long form used for a short payload"));
    }
    Ok(len)
}
