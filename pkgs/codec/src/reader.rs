use panoramyx_core::{Assumption, BigInt, Cube};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("wanted {wanted} bytes, only {available} available")]
    BufferUnderrun { wanted: usize, available: usize },
    #[error("string field is not valid utf-8")]
    InvalidUtf8,
    #[error("boolean field had byte value {0}, expected 0 or 1")]
    InvalidBool(u8),
}

/// Replays the fields a [`crate::MessageBuilder`] wrote, in the same order
/// it wrote them. There is no type tagging on the wire: callers must read
/// fields back in exactly the order they were written.
pub struct MessageReader<'a> {
    payload: &'a [u8],
    cursor: usize,
}

impl<'a> MessageReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, cursor: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.payload.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self.cursor + len;
        if end > self.payload.len() {
            return Err(CodecError::BufferUnderrun {
                wanted: len,
                available: self.payload.len() - self.cursor,
            });
        }
        let slice = &self.payload[self.cursor..end];
        self.cursor = end;
        Ok(slice)
    }

    fn read_len(&mut self) -> Result<usize, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_ne_bytes(bytes.try_into().unwrap()) as usize)
    }

    pub fn read_int(&mut self) -> Result<i32, CodecError> {
        let bytes = self.take(4)?;
        Ok(i32::from_ne_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_long(&mut self) -> Result<i64, CodecError> {
        let bytes = self.take(8)?;
        Ok(i64::from_ne_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_bigint(&mut self) -> Result<BigInt, CodecError> {
        self.read_long()
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        let byte = self.take(1)?[0];
        match byte {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    pub fn read_double(&mut self) -> Result<f64, CodecError> {
        let bytes = self.take(8)?;
        Ok(f64::from_ne_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_int_vec(&mut self) -> Result<Vec<i32>, CodecError> {
        let len = self.read_len()?;
        (0..len).map(|_| self.read_int()).collect()
    }

    pub fn read_long_vec(&mut self) -> Result<Vec<i64>, CodecError> {
        let len = self.read_len()?;
        (0..len).map(|_| self.read_long()).collect()
    }

    pub fn read_bool_vec(&mut self) -> Result<Vec<bool>, CodecError> {
        let len = self.read_len()?;
        (0..len).map(|_| self.read_bool()).collect()
    }

    pub fn read_string_vec(&mut self) -> Result<Vec<String>, CodecError> {
        let len = self.read_len()?;
        (0..len).map(|_| self.read_string()).collect()
    }

    /// Reads back a cube written by [`crate::MessageBuilder::with_cube`].
    pub fn read_cube(&mut self) -> Result<Cube, CodecError> {
        let len = self.read_len()?;
        (0..len)
            .map(|_| {
                let variable_id = self.read_string()?;
                let equal = self.read_bool()?;
                let value = self.read_bigint()?;
                Ok(Assumption::new(variable_id, equal, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bool_byte_is_rejected() {
        let payload = vec![2u8];
        let mut reader = MessageReader::new(&payload);
        assert_eq!(reader.read_bool(), Err(CodecError::InvalidBool(2)));
    }
}
