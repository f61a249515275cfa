use crate::domain::DecodedIdentity;
use crate::normalizer::raw_response::{BiometricRecord, DeviceInfoRecord, DiscoverRecord};
use serde::Serialize;
use serde_json::{Map, Value};

/// The normalized form of a device response that is sent to the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedResponse {
    Discover(Vec<DecodedDiscoverRecord>),
    DeviceInfo(Vec<DeviceInfoEntry>),
    Capture { biometrics: Vec<BiometricEntry> },
    PassThrough(Value),
}

impl DecodedResponse {
    /// Identities of every decoded entry, pass-through entries have none.
    pub fn identities(&self) -> Vec<Option<DecodedIdentity>> {
        match self {
            DecodedResponse::Discover(records) => records
                .iter()
                .map(|record| DecodedIdentity::from_value(&record.digital_id_decoded))
                .collect(),
            DecodedResponse::DeviceInfo(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    DeviceInfoEntry::Decoded(decoded) => Some(decoded.device_info_decoded.identity()),
                    DeviceInfoEntry::PassThrough(_) => None,
                })
                .collect(),
            DecodedResponse::Capture { biometrics } => biometrics
                .iter()
                .filter_map(|entry| match entry {
                    BiometricEntry::Decoded(decoded) => Some(decoded.data_decoded.identity()),
                    BiometricEntry::PassThrough(_) => None,
                })
                .collect(),
            DecodedResponse::PassThrough(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedDiscoverRecord {
    #[serde(flatten)]
    pub record: DiscoverRecord,
    pub digital_id_decoded: Value,
}

/// A decoded `deviceInfo` or `data` payload with its own digital id decoded alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEnvelope {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub digital_id_decoded: Value,
}

impl DecodedEnvelope {
    pub fn identity(&self) -> Option<DecodedIdentity> {
        DecodedIdentity::from_value(&self.digital_id_decoded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceInfoEntry {
    Decoded(DecodedDeviceInfo),
    PassThrough(DeviceInfoRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedDeviceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    pub device_info: String,
    pub device_info_decoded: DecodedEnvelope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BiometricEntry {
    Decoded(DecodedBiometric),
    PassThrough(BiometricRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBiometric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_key: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<Value>,
    pub data: String,
    pub data_decoded: DecodedEnvelope,
}
