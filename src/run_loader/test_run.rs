use crate::domain::TestCase;
use serde::Deserialize;
use serde_json::Value;

/// One recorded device interaction waiting to be validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub test_case: TestCase,
    /// The selected device as the JSON text discovery produced.
    pub device: String,
    pub method_request: Option<Value>,
    pub method_response: Value,
    pub start_execution_time: String,
    pub end_execution_time: String,
    pub previous_hash: Option<String>,
    pub before_key_rotation_resp: Option<Value>,
}
