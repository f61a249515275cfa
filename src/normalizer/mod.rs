mod capture;
mod decoded_response;
mod device_info;
mod discover;
mod envelope;
mod normalize;
mod raw_response;

pub use decoded_response::{
    BiometricEntry, DecodedBiometric, DecodedDeviceInfo, DecodedDiscoverRecord, DecodedEnvelope, DecodedResponse, DeviceInfoEntry,
};
pub use normalize::create_decoded_response;
pub use raw_response::{BiometricRecord, DeviceInfoRecord, DiscoverRecord, RawResponse, RawResponseError};
