use dp_felt::FieldElement;

use crate::{CairoCodecError, Result};

/// Analogue of `std::io::Cursor` for field elements.
///
/// Reads felts sequentially from a borrowed array and keeps track of how many were consumed.
#[derive(Clone, Debug)]
pub struct FeltReader<'a> {
    data: &'a [FieldElement],
    offset: usize,
}

impl<'a> FeltReader<'a> {
    pub fn new(data: &'a [FieldElement]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of felts read so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read(&mut self) -> Result<FieldElement> {
        let felt = *self.data.get(self.offset).ok_or(CairoCodecError::BufferUnderrun { offset: self.offset, needed: 1 })?;
        self.offset += 1;
        Ok(felt)
    }

    /// Reads a felt used as a length and checks that at least `len * min_size` felts follow.
    pub fn read_len(&mut self, min_size: usize) -> Result<usize> {
        let offset = self.offset;
        let len: usize = self.read()?.try_into().map_err(|_| CairoCodecError::BufferUnderrun {
            offset,
            needed: usize::MAX,
        })?;
        if len.saturating_mul(min_size) > self.remaining_len() {
            return Err(CairoCodecError::BufferUnderrun { offset: self.offset, needed: len.saturating_mul(min_size) });
        }
        Ok(len)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [FieldElement]> {
        if len > self.remaining_len() {
            return Err(CairoCodecError::BufferUnderrun { offset: self.offset, needed: len });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..start + len])
    }
}
