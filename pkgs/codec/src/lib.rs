//! A typed builder/reader over the binary message frame exchanged between
//! the coordinator and the workers.
//!
//! A frame is a fixed header `{tag: i16, src: i32, size: u32}` followed by
//! `size` opaque bytes (the payload). The payload itself is a sequence of
//! length-prefixed typed fields, written by [`MessageBuilder`] and replayed
//! in the same order by [`MessageReader`]. Encoding is host-endian — per
//! the specification this wire format is not meant for cross-architecture
//! use.

mod frame;
mod reader;
pub mod tags;

pub use frame::Frame;
pub use reader::{CodecError, MessageReader};

/// Assembles a [`Frame`] by appending typed parameters to a payload buffer
/// in a fixed order, recorded as a frame name (e.g. `"SOLVE"`,
/// `"CONSTRAINT_SCORE"`) plus a numeric tag and the accumulated payload.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    name: Option<String>,
    tag: i16,
    payload: Vec<u8>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the message's symbolic name. This is itself encoded as the
    /// first field of the payload, so readers must call
    /// [`MessageReader::read_string`] first to recover it.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.push_string(&name);
        self.name = Some(name);
        self
    }

    pub fn with_tag(mut self, tag: i16) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_int(mut self, value: i32) -> Self {
        self.payload.extend_from_slice(&value.to_ne_bytes());
        self
    }

    pub fn with_long(mut self, value: i64) -> Self {
        self.payload.extend_from_slice(&value.to_ne_bytes());
        self
    }

    /// `BigInt` is represented as `i64` throughout this workspace (see
    /// `panoramyx_core::BigInt`); kept as a distinct method so call sites
    /// read the same way the specification's vocabulary does.
    pub fn with_bigint(self, value: panoramyx_core::BigInt) -> Self {
        self.with_long(value)
    }

    pub fn with_bool(mut self, value: bool) -> Self {
        self.payload.push(value as u8);
        self
    }

    pub fn with_double(mut self, value: f64) -> Self {
        self.payload.extend_from_slice(&value.to_ne_bytes());
        self
    }

    pub fn with_string(mut self, value: &str) -> Self {
        self.push_string(value);
        self
    }

    pub fn with_int_vec(mut self, values: &[i32]) -> Self {
        self.push_len(values.len());
        for v in values {
            self.payload.extend_from_slice(&v.to_ne_bytes());
        }
        self
    }

    pub fn with_long_vec(mut self, values: &[i64]) -> Self {
        self.push_len(values.len());
        for v in values {
            self.payload.extend_from_slice(&v.to_ne_bytes());
        }
        self
    }

    pub fn with_bool_vec(mut self, values: &[bool]) -> Self {
        self.push_len(values.len());
        for v in values {
            self.payload.push(*v as u8);
        }
        self
    }

    pub fn with_string_vec(mut self, values: &[String]) -> Self {
        self.push_len(values.len());
        for v in values {
            self.push_string(v);
        }
        self
    }

    /// Encodes a cube as `length, (varId, equal, value)*`, the shape the
    /// `SOLVE` wire frame uses (see the specification's transport table).
    pub fn with_cube(mut self, cube: &panoramyx_core::Cube) -> Self {
        self.push_len(cube.len());
        for assumption in cube {
            self.push_string(&assumption.variable_id);
            self.payload.push(assumption.equal as u8);
            self.payload.extend_from_slice(&assumption.value.to_ne_bytes());
        }
        self
    }

    pub fn build(self) -> Frame {
        Frame::new(self.tag, self.payload)
    }

    fn push_len(&mut self, len: usize) {
        self.payload
            .extend_from_slice(&(len as u32).to_ne_bytes());
    }

    fn push_string(&mut self, value: &str) {
        self.push_len(value.len());
        self.payload.extend_from_slice(value.as_bytes());
    }
}
