use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A locale's resource bundle: flat message keys plus the namespaced sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationBundle {
    #[serde(default, rename = "serviceErrors")]
    service_errors: HashMap<String, String>,
    #[serde(default)]
    testcases: HashMap<String, TestCaseTranslation>,
    #[serde(default)]
    validators: HashMap<String, String>,
    #[serde(default)]
    breadcrumb: Option<HashMap<String, String>>,
    #[serde(flatten)]
    messages: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseTranslation {
    pub test_name: String,
    #[serde(default)]
    pub test_description: String,
}

// Empty translations count as missing so callers fall back to the key.
fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

impl TranslationBundle {
    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).and_then(Value::as_str).and_then(non_empty)
    }

    /// Like [`message`](Self::message), but an empty template is still a template.
    pub fn template(&self, key: &str) -> Option<&str> {
        self.messages.get(key).and_then(Value::as_str)
    }

    pub fn service_error(&self, code: &str) -> Option<&str> {
        self.service_errors.get(code).map(String::as_str).and_then(non_empty)
    }

    pub fn test_case(&self, test_id: &str) -> Option<&TestCaseTranslation> {
        self.testcases.get(test_id)
    }

    pub fn validator(&self, name: &str) -> Option<&str> {
        self.validators.get(name).map(String::as_str).and_then(non_empty)
    }

    pub fn breadcrumb(&self) -> Option<&HashMap<String, String>> {
        self.breadcrumb.as_ref()
    }
}
