use crate::CodecError;

/// Size in bytes of the encoded header: `tag: i16, src: i32, size: u32`.
pub const HEADER_LEN: usize = 2 + 4 + 4;

/// A tagged, sourced, length-delimited message. `src` is filled in by the
/// transport on send (the sender's own rank) and on receive (the observed
/// sender), never by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: i16,
    pub src: i32,
    payload: Vec<u8>,
}

impl Frame {
    pub fn new(tag: i16, payload: Vec<u8>) -> Self {
        Self {
            tag,
            src: 0,
            payload,
        }
    }

    pub fn with_src(mut self, src: i32) -> Self {
        self.src = src;
        self
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn size(&self) -> u32 {
        self.payload.len() as u32
    }

    /// Serializes the header followed by the payload, host-endian.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.payload.len());
        out.extend_from_slice(&self.tag.to_ne_bytes());
        out.extend_from_slice(&self.src.to_ne_bytes());
        out.extend_from_slice(&self.size().to_ne_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parses a complete frame (header + payload) from `bytes`. Returns an
    /// error if the buffer is shorter than the header or than the size the
    /// header declares.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::BufferUnderrun {
                wanted: HEADER_LEN,
                available: bytes.len(),
            });
        }
        let tag = i16::from_ne_bytes(bytes[0..2].try_into().unwrap());
        let src = i32::from_ne_bytes(bytes[2..6].try_into().unwrap());
        let size = u32::from_ne_bytes(bytes[6..10].try_into().unwrap()) as usize;

        let payload_end = HEADER_LEN + size;
        if bytes.len() < payload_end {
            return Err(CodecError::BufferUnderrun {
                wanted: payload_end,
                available: bytes.len(),
            });
        }

        Ok(Frame {
            tag,
            src,
            payload: bytes[HEADER_LEN..payload_end].to_vec(),
        })
    }
}
