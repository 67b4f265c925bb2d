//! Reserved tag values for the coordination messages named in the
//! specification. The exact numbers are an implementation detail — nothing
//! outside this crate is allowed to assume a particular value — as long as
//! the coordinator and every worker agree on them statically, which a
//! shared constant set guarantees.

pub const TAG_SOLVE: i16 = 1;
pub const TAG_RESPONSE: i16 = 2;
pub const TAG_INTERRUPT: i16 = 3;
pub const TAG_BOUND_UPDATE: i16 = 4;
pub const TAG_RESULT: i16 = 5;
pub const TAG_END: i16 = 6;
pub const TAG_CONSTRAINT_SCORE: i16 = 7;

/// Message names exchanged over [`TAG_SOLVE`]/[`TAG_RESPONSE`], read back by
/// [`crate::MessageReader::read_string`] as the first payload field.
pub const MESSAGE_SOLVE: &str = "SOLVE";
pub const MESSAGE_RESULT: &str = "RESULT";
pub const MESSAGE_INTERRUPT: &str = "INTERRUPT";
pub const MESSAGE_BOUND_UPDATE: &str = "BOUND_UPDATE";
pub const MESSAGE_END: &str = "END";
pub const MESSAGE_CONSTRAINT_SET_IGNORED: &str = "CONSTRAINT_SET_IGNORED";
pub const MESSAGE_CONSTRAINT_IS_IGNORED: &str = "CONSTRAINT_IS_IGNORED";
pub const MESSAGE_CONSTRAINT_SCORE: &str = "CONSTRAINT_SCORE";
