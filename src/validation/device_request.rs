use crate::app_config::AppConfig;
use crate::domain::test_case::attribute_to_string;
use crate::domain::{DeviceDescriptor, TestCase, bio_sub_types};
use crate::extensions::date_time_ext::ToWireTime;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const ENV_DEVELOPER: &str = "Developer";

/// Body of a `CAPTURE` or `RCAPTURE` call to the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    pub env: String,
    pub purpose: String,
    pub spec_version: String,
    pub timeout: String,
    pub capture_time: String,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_uri: Option<String>,
    pub bio: Vec<BioRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BioRequest {
    pub r#type: String,
    pub count: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<Vec<String>>,
    pub requested_score: Value,
    pub device_id: String,
    pub device_sub_id: Value,
    pub previous_hash: String,
    pub bio_sub_type: Vec<String>,
}

pub fn capture_request(device: &DeviceDescriptor, test_case: &TestCase, previous_hash: &str, config: &AppConfig, now: DateTime<Utc>) -> CaptureRequest {
    let mut request = build(device, test_case, previous_hash, config, now);
    request.domain_uri = Some(String::new());
    request
}

/// Like [`capture_request`], with the test case's exceptions and without a domain uri.
pub fn rcapture_request(device: &DeviceDescriptor, test_case: &TestCase, previous_hash: &str, config: &AppConfig, now: DateTime<Utc>) -> CaptureRequest {
    let mut request = build(device, test_case, previous_hash, config, now);
    for bio in request.bio.iter_mut() {
        bio.exception = Some(bio_sub_types(&test_case.other_attributes.exceptions));
    }
    request
}

fn build(device: &DeviceDescriptor, test_case: &TestCase, previous_hash: &str, config: &AppConfig, now: DateTime<Utc>) -> CaptureRequest {
    let attributes = &test_case.other_attributes;

    CaptureRequest {
        env: ENV_DEVELOPER.to_owned(),
        purpose: device.purpose.clone(),
        spec_version: device.spec_version.first().cloned().unwrap_or_default(),
        timeout: effective_timeout(test_case, config),
        capture_time: now.to_iso_millis(),
        transaction_id: transaction_id(test_case, now),
        domain_uri: None,
        bio: vec![BioRequest {
            r#type: device.r#type.clone(),
            count: attributes.bio_count.clone(),
            exception: None,
            requested_score: attributes.requested_score.clone(),
            device_id: device.device_id.clone(),
            device_sub_id: attributes.device_sub_id.clone(),
            previous_hash: previous_hash.to_owned(),
            bio_sub_type: bio_sub_types(&attributes.segments),
        }],
    }
}

/// The test case's own transaction id, or one derived from its id and the current millisecond.
pub fn transaction_id(test_case: &TestCase, now: DateTime<Utc>) -> String {
    match &test_case.other_attributes.transaction_id {
        Some(transaction_id) if !transaction_id.is_null() => attribute_to_string(transaction_id),
        _ => format!("{}-{}", test_case.test_id, now.timestamp_subsec_millis()),
    }
}

pub fn effective_timeout(test_case: &TestCase, config: &AppConfig) -> String {
    match &test_case.other_attributes.timeout {
        Some(timeout) if !timeout.is_null() => attribute_to_string(timeout),
        _ => config.sbi().timeout(),
    }
}
