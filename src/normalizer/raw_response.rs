use crate::domain::MethodName;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// A device response split by the method that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Discover(Vec<DiscoverRecord>),
    DeviceInfo(Vec<DeviceInfoRecord>),
    Capture(Vec<BiometricRecord>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawResponse {
    /// Splits `response` by method. Individual records that cannot be read are logged and skipped.
    pub fn parse(method: &MethodName, response: Value, is_mobile_app: bool) -> Result<Self, RawResponseError> {
        match method {
            MethodName::Discover if is_mobile_app => match response {
                record @ Value::Object(_) => Ok(RawResponse::Discover(records(vec![record], method))),
                other => Err(RawResponseError::unexpected(method, "a device record", &other)),
            },
            MethodName::Discover => Ok(RawResponse::Discover(records(array(method, response)?, method))),
            MethodName::DeviceInfo => Ok(RawResponse::DeviceInfo(records(array(method, response)?, method))),
            MethodName::Capture | MethodName::RCapture => {
                let biometrics = match response {
                    Value::Object(mut object) => object.remove("biometrics").unwrap_or(Value::Null),
                    other => return Err(RawResponseError::unexpected(method, "an object with biometrics", &other)),
                };
                Ok(RawResponse::Capture(records(array(method, biometrics)?, method)))
            }
            _ => Ok(RawResponse::Other(response)),
        }
    }
}

fn array(method: &MethodName, value: Value) -> Result<Vec<Value>, RawResponseError> {
    match value {
        Value::Array(values) => Ok(values),
        other => Err(RawResponseError::unexpected(method, "an array", &other)),
    }
}

fn records<T: DeserializeOwned>(values: Vec<Value>, method: &MethodName) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%method, index, "⚠️ Skipping unreadable response record: {}", e);
                None
            }
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum RawResponseError {
    #[error("'{method}' response must be {expected}, found {found}")]
    UnexpectedShape {
        method: String,
        expected: &'static str,
        found: String,
    },
}

impl RawResponseError {
    fn unexpected(method: &MethodName, expected: &'static str, found: &Value) -> Self {
        let found = match found {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        RawResponseError::UnexpectedShape {
            method: method.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}
