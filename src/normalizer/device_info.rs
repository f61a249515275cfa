use crate::decoder::matches;
use crate::domain::DeviceDescriptor;
use crate::normalizer::decoded_response::{DecodedDeviceInfo, DeviceInfoEntry};
use crate::normalizer::envelope::decode_envelope;
use crate::normalizer::raw_response::DeviceInfoRecord;
use tracing::{debug, warn};

/// Records without a `deviceInfo` carry a device error and are kept as they are.
pub fn decode_device_info_records(records: Vec<DeviceInfoRecord>, device: &DeviceDescriptor) -> Vec<DeviceInfoEntry> {
    records
        .into_iter()
        .filter_map(|record| {
            let device_info = match record.device_info.as_deref() {
                None | Some("") => return Some(DeviceInfoEntry::PassThrough(record)),
                Some(device_info) => device_info.to_owned(),
            };

            let envelope = match decode_envelope(&device_info) {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!("⚠️ Dropping device info, unable to decode it: {}", e);
                    return None;
                }
            };

            let identity = envelope.identity();
            if !matches(identity.as_ref(), device) {
                debug!(?identity, "Dropping device info of another device type");
                return None;
            }

            Some(DeviceInfoEntry::Decoded(DecodedDeviceInfo {
                error: record.error,
                device_info,
                device_info_decoded: envelope,
            }))
        })
        .collect()
}
