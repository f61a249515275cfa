mod identity;
mod payload;

pub use identity::matches;
pub use payload::{DecodeError, decode_base64_json, decode_segment, into_object, is_registered, parse_json};

#[cfg(test)]
pub(crate) use payload::fixtures;
