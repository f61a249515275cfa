use crate::domain::TestCase;
use crate::extensions::date_time_ext::ToWireTime;
use crate::fault_injector::fault_spec::FaultSpec;
use chrono::DateTime;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

pub const NEW_UNKNOWN_VALUE_KEY: &str = "newUnknownValue";
pub const NEW_UNKNOWN_VALUE: &str = "testing with newUnknownValue";
pub const INVALID_ABIS_ID: &str = "abis.invalid.id";
pub const INVALID_KEY_SUFFIX: &str = "XXX";
// Matches what a browser renders for an unparsable date.
const INVALID_DATE: &str = "Invalid Date";

/// Applies the test case's `invalidRequestAttribute`, returning the request unchanged when it has none.
#[instrument(skip_all, fields(test_id = %test_case.test_id))]
pub fn apply_invalid_request_attribute(test_case: &TestCase, request: Value) -> Value {
    let method = test_case.primary_method();
    match test_case.invalid_request_attribute().and_then(|spec| FaultSpec::parse(spec, &method)) {
        Some(fault_spec) => {
            info!(?fault_spec, "Injecting fault into the request");
            inject_fault(&fault_spec, request)
        }
        None => request,
    }
}

/// Produces a deliberately invalid copy of `request`. A fault whose target is missing or of the
/// wrong shape leaves the request as it is.
pub fn inject_fault(fault_spec: &FaultSpec, request: Value) -> Value {
    let Value::Object(mut request) = request else {
        warn!(?fault_spec, "⚠️ Request is not an object, leaving it unchanged");
        return request;
    };

    match fault_spec {
        FaultSpec::NewUnknownValue => {
            request.insert(NEW_UNKNOWN_VALUE_KEY.to_owned(), Value::String(NEW_UNKNOWN_VALUE.to_owned()));
        }
        FaultSpec::IncorrectReferenceUrl => {
            update_string(&mut request, "referenceURL", |url| url.replacen("datashare", "datashare1", 1));
        }
        FaultSpec::InvalidReferenceUrl => {
            update_string(&mut request, "referenceURL", |url| url.replacen('/', ":", 1));
        }
        FaultSpec::InvalidRequestTime => {
            update_string(&mut request, "requesttime", |time| match DateTime::parse_from_rfc3339(time) {
                Ok(time) => time.to_rfc1123(),
                Err(_) => INVALID_DATE.to_owned(),
            });
        }
        FaultSpec::InvalidId => {
            request.insert("id".to_owned(), Value::String(INVALID_ABIS_ID.to_owned()));
        }
        FaultSpec::IndexedPath { array, leaf } => match request.get_mut(*array) {
            Some(Value::Array(elements)) => match elements.first() {
                Some(Value::Object(first)) => {
                    let renamed = rename_key(first, leaf);
                    *elements = vec![Value::Object(renamed)];
                }
                _ => warn!(array, "⚠️ First element of '{}' is not an object, leaving the request unchanged", array),
            },
            _ => warn!(array, "⚠️ '{}' is not an array, leaving the request unchanged", array),
        },
        FaultSpec::NestedPath { object, leaf } => match request.get_mut(*object) {
            Some(Value::Object(nested)) => {
                *nested = rename_key(nested, leaf);
            }
            _ => warn!(object, "⚠️ '{}' is not an object, leaving the request unchanged", object),
        },
        FaultSpec::Key(key) => {
            request = rename_key(&request, key);
        }
    }

    Value::Object(request)
}

fn update_string(request: &mut Map<String, Value>, key: &str, update: impl FnOnce(&str) -> String) {
    match request.get_mut(key) {
        Some(Value::String(value)) => *value = update(value),
        _ => warn!(key, "⚠️ '{}' is missing or not a string, leaving the request unchanged", key),
    }
}

/// Copies `object` with `key` renamed to `{key}XXX`, its value untouched.
fn rename_key(object: &Map<String, Value>, key: &str) -> Map<String, Value> {
    object
        .iter()
        .map(|(name, value)| {
            let name = if name == key { format!("{}{}", name, INVALID_KEY_SUFFIX) } else { name.clone() };
            (name, value.clone())
        })
        .collect()
}
