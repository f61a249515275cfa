use crate::domain::{ServiceError, TranslationBundle};

const DEFAULT_ERROR_TITLE: &str = "Error";
const UNEXPECTED_ERROR: &str = "Unexpected error occured.";

/// A title and message pair ready for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub title: String,
    pub message: String,
}

/// Describes the first service error, translated through the bundle's `serviceErrors` when
/// possible and prefixed with its code when `show_code` is set. `custom` replaces the message.
pub fn error_message(bundle: &TranslationBundle, errors: &[ServiceError], custom: Option<&str>, show_code: bool) -> Message {
    let title = bundle.service_error("error").unwrap_or(DEFAULT_ERROR_TITLE).to_owned();

    let mut message = errors.first().map(|error| describe(bundle, error, show_code)).unwrap_or_default();
    if let Some(custom) = custom.filter(|custom| !custom.is_empty()) {
        message = custom.to_owned();
    }
    if message.is_empty() {
        message = UNEXPECTED_ERROR.to_owned();
    }

    Message { title, message }
}

fn describe(bundle: &TranslationBundle, error: &ServiceError, show_code: bool) -> String {
    let code = error.error_code.as_deref().filter(|code| !code.is_empty());
    let text = code.and_then(|code| bundle.service_error(code)).unwrap_or(&error.message);

    match code {
        Some(code) if show_code => format!("{} - {}", code, text),
        _ => text.to_owned(),
    }
}

/// Both keys are translated only when the bundle has both, otherwise the keys are shown as-is.
pub fn success_message(bundle: &TranslationBundle, title_key: &str, message_key: &str, custom: Option<&str>) -> Message {
    let (title, mut message) = match (bundle.message(title_key), bundle.message(message_key)) {
        (Some(title), Some(message)) => (title.to_owned(), message.to_owned()),
        _ => (title_key.to_owned(), message_key.to_owned()),
    };
    if let Some(custom) = custom.filter(|custom| !custom.is_empty()) {
        message = format!("{} {}", message, custom);
    }

    Message { title, message }
}
