use dp_felt::FieldElement;

use crate::{CairoCodecError, FeltCodec, FeltReader, Result};

/// Number of bytes packed in each full word of a [`ByteArray`].
pub const BYTES_PER_WORD: usize = 31;

/// Cairo `ByteArray`: full 31-byte words followed by a partial pending word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteArray {
    pub data: Vec<FieldElement>,
    pub pending_word: FieldElement,
    pub pending_word_len: usize,
}

impl ByteArray {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut chunks = bytes.chunks_exact(BYTES_PER_WORD);
        let data = chunks.by_ref().map(word_from_bytes).collect();
        let pending = chunks.remainder();
        Self { data, pending_word: word_from_bytes(pending), pending_word_len: pending.len() }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * BYTES_PER_WORD + self.pending_word_len);
        for word in &self.data {
            bytes.extend_from_slice(&word.to_bytes_be()[32 - BYTES_PER_WORD..]);
        }
        let pending = self.pending_word_len.min(BYTES_PER_WORD);
        bytes.extend_from_slice(&self.pending_word.to_bytes_be()[32 - pending..]);
        bytes
    }

    /// Serialized form `[fullWordCount, words…, pendingWord, pendingWordLen]`.
    pub fn to_felts(&self) -> Vec<FieldElement> {
        self.to_encoded_vec()
    }

    /// Decodes a serialized byte array from the start of `felts`, returning it with
    /// the number of felts consumed.
    pub fn from_felts(felts: &[FieldElement]) -> Result<(Self, usize)> {
        let mut reader = FeltReader::new(felts);
        let byte_array = Self::decode(&mut reader)?;
        Ok((byte_array, reader.offset()))
    }
}

impl From<&str> for ByteArray {
    fn from(value: &str) -> Self {
        Self::from_bytes(value.as_bytes())
    }
}

impl FeltCodec for ByteArray {
    fn size_in_felts(&self) -> usize {
        3 + self.data.len()
    }

    fn encode_to(&self, output: &mut Vec<FieldElement>) {
        output.push(self.data.len().into());
        output.extend_from_slice(&self.data);
        output.push(self.pending_word);
        output.push(self.pending_word_len.into());
    }

    fn decode(input: &mut FeltReader) -> Result<Self> {
        let out_of_range = || CairoCodecError::ValueOutOfRange("ByteArray".to_string());
        let len = input.read_len(1)?;
        let data = input.read_slice(len)?.to_vec();
        if data.iter().any(|word| word.bits() > BYTES_PER_WORD * 8) {
            return Err(out_of_range());
        }
        let pending_word = input.read()?;
        let pending_word_len: usize = input.read()?.try_into().map_err(|_| out_of_range())?;
        if pending_word_len >= BYTES_PER_WORD || pending_word.bits() > pending_word_len * 8 {
            return Err(out_of_range());
        }
        Ok(Self { data, pending_word, pending_word_len })
    }
}

fn word_from_bytes(bytes: &[u8]) -> FieldElement {
    let mut buffer = [0u8; 32];
    buffer[32 - bytes.len()..].copy_from_slice(bytes);
    FieldElement::from_bytes_be(&buffer)
}
