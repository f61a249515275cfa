use crate::domain::TranslationBundle;
use crate::translation::message_key::{MessageKey, Segment};
use thiserror::Error;
use tracing::warn;

const PLACEHOLDER: &str = "{}";

/// Renders a compound message key, falling back to the literal key text wherever a template
/// cannot be found.
pub fn resolve(key: &str, bundle: &TranslationBundle) -> String {
    MessageKey::parse(key)
        .segments()
        .iter()
        .map(|segment| {
            resolve_segment(segment, bundle).unwrap_or_else(|e| {
                warn!("⚠️ Unable to translate '{}': {}", key, e);
                segment_text(segment)
            })
        })
        .collect()
}

/// Like [`resolve`], but a templated segment whose key is not in the bundle is an error.
pub fn try_resolve(key: &str, bundle: &TranslationBundle) -> Result<String, TemplateError> {
    MessageKey::parse(key)
        .segments()
        .iter()
        .map(|segment| resolve_segment(segment, bundle))
        .collect()
}

fn resolve_segment(segment: &Segment, bundle: &TranslationBundle) -> Result<String, TemplateError> {
    match segment {
        Segment::Plain(name) => Ok(bundle.message(name).unwrap_or(*name).to_owned()),
        Segment::Template { name, arguments } => {
            let template = bundle.template(name).ok_or_else(|| TemplateError::MissingKey(name.to_string()))?;
            Ok(fill_placeholders(template, arguments, bundle))
        }
    }
}

// A placeholder/argument count mismatch leaves the template untouched.
fn fill_placeholders(template: &str, arguments: &[&str], bundle: &TranslationBundle) -> String {
    let parts = template.split(PLACEHOLDER).collect::<Vec<_>>();
    if parts.len() - 1 != arguments.len() {
        return template.to_owned();
    }

    let mut message = String::with_capacity(template.len());
    for (index, part) in parts.iter().enumerate() {
        message.push_str(part);
        if let Some(argument) = arguments.get(index) {
            message.push_str(bundle.message(argument).unwrap_or(*argument));
        }
    }
    message
}

fn segment_text(segment: &Segment) -> String {
    match segment {
        Segment::Plain(name) => name.to_string(),
        Segment::Template { name, arguments } => format!("{}::{}", name, arguments.join(";")),
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("no template found for key '{0}'")]
    MissingKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn bundle(json: serde_json::Value) -> TranslationBundle {
        serde_json::from_value(json).unwrap()
    }

    #[rstest]
    #[case("A::x;y", json!({ "A": "{}-{}" }), "x-y")]
    #[case("A::x", json!({ "A": "{}-{}" }), "{}-{}")]
    #[case("A,B::x", json!({ "A": "hi ", "B": "{}!" }), "hi x!")]
    #[case("A,B::x", json!({ "A": "hi ", "B": "{}!", "x": "there" }), "hi there!")]
    #[case("UNKNOWN", json!({}), "UNKNOWN")]
    #[case("A,plain text,B", json!({ "A": "a", "B": "b" }), "aplain textb")]
    #[case("A::x;y", json!({ "A": "no placeholders" }), "no placeholders")]
    #[case("A::x", json!({ "A": "{}", "x": "X::y" }), "X::y")]
    #[case("", json!({ "A": "a" }), "")]
    #[case("A::x", json!({ "A": "" }), "")]
    #[case("A::x", json!({ "A": "", "x": "" }), "")]
    fn resolve_renders_message_keys(#[case] key: &str, #[case] bundle_json: serde_json::Value, #[case] expected: &str) {
        assert_eq!(resolve(key, &bundle(bundle_json)), expected);
    }

    #[test]
    fn resolve_renders_a_composite_validator_message() {
        let bundle = bundle(json!({
            "ISO_VALIDATOR_003": "ISO format is invalid. ",
            "ISO_VALIDATOR_004": "Expected format identifier {}. ",
            "ISO_VALIDATOR_005": "Found {} instead.",
        }));

        let message = resolve("ISO_VALIDATOR_003,ISO_VALIDATOR_004::0x46495200,ISO_VALIDATOR_005::0x46495201", &bundle);

        assert_eq!(message, "ISO format is invalid. Expected format identifier 0x46495200. Found 0x46495201 instead.");
    }

    #[test]
    fn resolve_falls_back_to_the_segment_when_a_template_is_missing() {
        let bundle = bundle(json!({ "A": "a " }));

        assert_eq!(resolve("A,B::x;y", &bundle), "a B::x;y");
    }

    #[test]
    fn try_resolve_reports_a_missing_template() {
        let bundle = bundle(json!({ "A": "a " }));

        assert_eq!(try_resolve("A,B::x", &bundle), Err(TemplateError::MissingKey("B".to_string())));
        assert_eq!(try_resolve("A,C", &bundle), Ok("a C".to_string()));
    }

    #[test]
    fn try_resolve_accepts_an_empty_template() {
        let bundle = bundle(json!({ "A": "" }));

        assert_eq!(try_resolve("A::x", &bundle), Ok(String::new()));
    }

    #[test]
    fn resolve_is_repeatable() {
        let bundle = bundle(json!({ "A": "{} {}", "x": "X" }));

        assert_eq!(resolve("A::x;y", &bundle), resolve("A::x;y", &bundle));
    }
}
