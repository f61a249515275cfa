use crate::domain::{DeviceDescriptor, TestCase, ValidatorDef};
use crate::extensions::date_time_ext::ToWireTime;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// The `{ id, version, requesttime, request }` wrapper every validator call is sent in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub id: String,
    pub version: String,
    pub requesttime: String,
    pub request: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeHeader {
    pub id: String,
    pub version: String,
}

impl EnvelopeHeader {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        EnvelopeHeader {
            id: id.into(),
            version: version.into(),
        }
    }

    pub fn wrap<T>(&self, request: T, now: DateTime<Utc>) -> Envelope<T> {
        Envelope {
            id: self.id.clone(),
            version: self.version.clone(),
            requesttime: now.to_iso_millis(),
            request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestValidation {
    pub test_case_type: String,
    pub test_name: String,
    pub spec_version: String,
    pub test_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<String>,
    pub method_request: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseValidation {
    pub test_case_type: String,
    pub test_name: String,
    pub spec_version: String,
    pub test_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<String>,
    pub is_negative_testcase: bool,
    pub method_response: String,
    pub method_request: String,
    pub method_name: String,
    pub extra_info_json: String,
    pub validator_defs: Vec<ValidatorDef>,
}

/// Execution details the validator needs besides the request and response themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraInfo {
    pub certification_type: String,
    pub start_execution_time: String,
    pub end_execution_time: String,
    pub timeout: String,
    pub before_key_rotation_resp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,
}

/// What happened while the device was called, as recorded by the test runner.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<'a> {
    pub device: &'a DeviceDescriptor,
    pub start_execution_time: &'a str,
    pub end_execution_time: &'a str,
    pub timeout: String,
    pub before_key_rotation_resp: Option<&'a Value>,
    pub previous_hash: Option<&'a str>,
}

pub fn request_validation(test_case: &TestCase, method_request: &Value) -> Result<RequestValidation, serde_json::Error> {
    Ok(RequestValidation {
        test_case_type: test_case.test_case_type.clone(),
        test_name: test_case.test_name.clone(),
        spec_version: test_case.spec_version.clone(),
        test_description: test_case.test_description.clone(),
        request_schema: test_case.request_schema.first().cloned(),
        method_request: serde_json::to_string(method_request)?,
    })
}

pub fn response_validation<R: Serialize>(
    test_case: &TestCase,
    method_request: &Value,
    method_response: &R,
    execution: &Execution,
) -> Result<ResponseValidation, serde_json::Error> {
    let extra_info = ExtraInfo {
        certification_type: execution.device.certification.clone(),
        start_execution_time: execution.start_execution_time.to_owned(),
        end_execution_time: execution.end_execution_time.to_owned(),
        timeout: execution.timeout.clone(),
        before_key_rotation_resp: execution.before_key_rotation_resp.cloned(),
        modality: test_case.other_attributes.biometric_types.first().cloned(),
        previous_hash: execution.previous_hash.map(str::to_owned),
    };

    Ok(ResponseValidation {
        test_case_type: test_case.test_case_type.clone(),
        test_name: test_case.test_name.clone(),
        spec_version: test_case.spec_version.clone(),
        test_description: test_case.test_description.clone(),
        response_schema: test_case.response_schema.first().cloned(),
        is_negative_testcase: test_case.is_negative_testcase,
        method_response: serde_json::to_string(method_response)?,
        method_request: serde_json::to_string(method_request)?,
        method_name: test_case.method_name.first().cloned().unwrap_or_default(),
        extra_info_json: serde_json::to_string(&extra_info)?,
        validator_defs: test_case.validator_defs.first().cloned().unwrap_or_default(),
    })
}
