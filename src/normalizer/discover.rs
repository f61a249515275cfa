use crate::decoder::{DecodeError, decode_base64_json};
use crate::normalizer::decoded_response::DecodedDiscoverRecord;
use crate::normalizer::raw_response::DiscoverRecord;
use tracing::warn;

/// Every discovered device is kept once its digital id decodes, whatever its type, so the
/// validator sees the full discovery answer.
pub fn decode_discover_records(records: Vec<DiscoverRecord>) -> Vec<DecodedDiscoverRecord> {
    records
        .into_iter()
        .filter_map(|record| match decode_discover_record(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("⚠️ Dropping discovered device, unable to decode its digital id: {}", e);
                None
            }
        })
        .collect()
}

fn decode_discover_record(mut record: DiscoverRecord) -> Result<DecodedDiscoverRecord, DecodeError> {
    let digital_id = record.digital_id.as_deref().ok_or(DecodeError::MissingField("digitalId"))?;
    let digital_id_decoded = decode_base64_json(digital_id)?;
    record.extra.remove("digitalIdDecoded");

    Ok(DecodedDiscoverRecord {
        record,
        digital_id_decoded,
    })
}
