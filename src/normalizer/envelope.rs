use crate::decoder::{DecodeError, decode_base64_json, decode_segment, into_object, is_registered, parse_json};
use crate::normalizer::decoded_response::DecodedEnvelope;

const DIGITAL_ID: &str = "digitalId";
const DIGITAL_ID_DECODED: &str = "digitalIdDecoded";

/// Decodes a `deviceInfo` or `data` payload together with the digital id it carries.
///
/// Registered devices sign both the payload and the digital id inside it, so both are
/// three segment tokens. Unregistered devices send plain base64 with the digital id as
/// plain JSON text.
pub fn decode_envelope(token: &str) -> Result<DecodedEnvelope, DecodeError> {
    let registered = is_registered(token);
    let payload = if registered { decode_segment(token)? } else { decode_base64_json(token)? };

    let mut fields = into_object(payload)?;
    fields.remove(DIGITAL_ID_DECODED);

    let digital_id = fields
        .get(DIGITAL_ID)
        .and_then(|value| value.as_str())
        .ok_or(DecodeError::MissingField(DIGITAL_ID))?;
    let digital_id_decoded = if registered { decode_segment(digital_id)? } else { parse_json(digital_id)? };

    Ok(DecodedEnvelope {
        fields,
        digital_id_decoded,
    })
}
