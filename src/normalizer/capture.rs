use crate::decoder::matches;
use crate::domain::DeviceDescriptor;
use crate::normalizer::decoded_response::{BiometricEntry, DecodedBiometric};
use crate::normalizer::envelope::decode_envelope;
use crate::normalizer::raw_response::BiometricRecord;
use tracing::{debug, warn};

pub fn decode_biometric_records(records: Vec<BiometricRecord>, device: &DeviceDescriptor) -> Vec<BiometricEntry> {
    records
        .into_iter()
        .filter_map(|record| {
            let data = match record.data.as_deref() {
                None | Some("") => return Some(BiometricEntry::PassThrough(record)),
                Some(data) => data.to_owned(),
            };

            let envelope = match decode_envelope(&data) {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!("⚠️ Dropping biometric, unable to decode its data: {}", e);
                    return None;
                }
            };

            let identity = envelope.identity();
            if !matches(identity.as_ref(), device) {
                debug!(?identity, "Dropping biometric captured by another device type");
                return None;
            }

            Some(BiometricEntry::Decoded(DecodedBiometric {
                error: record.error,
                hash: record.hash,
                session_key: record.session_key,
                spec_version: record.spec_version,
                thumbprint: record.thumbprint,
                data,
                data_decoded: envelope,
            }))
        })
        .collect()
}
