use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};
use thiserror::Error;

// Devices are inconsistent about padding, JWT segments omit it entirely.
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

const SEGMENT_SEPARATOR: char = '.';
const PAYLOAD_SEGMENT: usize = 1;
const REGISTERED_SEGMENTS: usize = 3;

/// Base64-decodes the whole token and parses the result as JSON.
pub fn decode_base64_json(token: &str) -> Result<Value, DecodeError> {
    let bytes = decode_base64(token)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decodes the payload segment of a `header.payload.signature` token. The header and
/// signature are ignored, never verified.
pub fn decode_segment(token: &str) -> Result<Value, DecodeError> {
    let segments = token.split(SEGMENT_SEPARATOR).collect::<Vec<_>>();
    let payload = segments.get(PAYLOAD_SEGMENT).ok_or(DecodeError::MissingSegment {
        index: PAYLOAD_SEGMENT,
        found: segments.len(),
    })?;

    decode_base64_json(payload)
}

/// Parses a value that is already plain JSON text.
pub fn parse_json(text: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Registered devices wrap their payloads in a signed three segment envelope.
pub fn is_registered(token: &str) -> bool {
    token.split(SEGMENT_SEPARATOR).count() >= REGISTERED_SEGMENTS
}

pub fn into_object(value: Value) -> Result<Map<String, Value>, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject(json_type(&other))),
    }
}

fn decode_base64(token: &str) -> Result<Vec<u8>, DecodeError> {
    let token = token.trim();
    let engine = if token.contains(['-', '_']) { &URL_SAFE } else { &STANDARD };
    Ok(engine.decode(token)?)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("token has no segment {index}, found {found} segment(s)")]
    MissingSegment { index: usize, found: usize },
    #[error("expected a json object, found {0}")]
    NotAnObject(&'static str),
    #[error("field '{0}' is missing or not a string")]
    MissingField(&'static str),
}
