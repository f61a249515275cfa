use serde::{Deserialize, Serialize};

/// An entry of the `errors` list returned by the toolkit data service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ServiceError {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError {
            error_code: Some(error_code.into()),
            message: message.into(),
        }
    }

    pub fn without_code(message: impl Into<String>) -> Self {
        ServiceError {
            error_code: None,
            message: message.into(),
        }
    }
}
