use crate::domain::MethodName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub test_id: String,
    pub test_name: String,
    #[serde(default)]
    pub test_description: String,
    pub test_case_type: String,
    pub spec_version: String,
    pub method_name: Vec<String>,
    #[serde(default)]
    pub request_schema: Vec<String>,
    #[serde(default)]
    pub response_schema: Vec<String>,
    #[serde(default)]
    pub is_negative_testcase: bool,
    #[serde(default)]
    pub other_attributes: OtherAttributes,
    #[serde(default)]
    pub validator_defs: Vec<Vec<ValidatorDef>>,
}

impl TestCase {
    pub fn primary_method(&self) -> MethodName {
        self.method_name
            .first()
            .map(|name| MethodName::parse(name))
            .unwrap_or_else(|| MethodName::Other(String::new()))
    }

    /// The fault specifier of a negative test case, `None` when absent or empty.
    pub fn invalid_request_attribute(&self) -> Option<&str> {
        self.other_attributes
            .invalid_request_attribute
            .as_deref()
            .filter(|attribute| !attribute.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherAttributes {
    pub invalid_request_attribute: Option<String>,
    #[serde(default)]
    pub bio_count: Value,
    #[serde(default)]
    pub requested_score: Value,
    #[serde(default)]
    pub device_sub_id: Value,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    pub transaction_id: Option<Value>,
    pub timeout: Option<Value>,
    #[serde(default)]
    pub biometric_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidatorDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Renders a scalar attribute the way it is sent on the wire: strings as-is, anything else as JSON.
pub fn attribute_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
