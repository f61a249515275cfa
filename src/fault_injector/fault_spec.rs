use crate::domain::MethodName;

/// A parsed `invalidRequestAttribute` describing how to break a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FaultSpec<'a> {
    /// Adds an unexpected top level attribute.
    NewUnknownValue,
    /// Points `referenceURL` at a non-existent datashare.
    IncorrectReferenceUrl,
    /// Breaks the syntax of `referenceURL`.
    InvalidReferenceUrl,
    /// Sends `requesttime` in RFC-1123 instead of ISO-8601.
    InvalidRequestTime,
    /// Replaces the ABIS request `id`.
    InvalidId,
    /// `array[0].leaf`: renames `leaf` in the first element of `array`.
    IndexedPath { array: &'a str, leaf: &'a str },
    /// `object.leaf`: renames `leaf` inside `object`.
    NestedPath { object: &'a str, leaf: &'a str },
    /// Renames a top level attribute.
    Key(&'a str),
}

impl<'a> FaultSpec<'a> {
    /// Rules are tried in a fixed order, `invalidId` only applies to ABIS insert and identify
    /// requests and is a plain key rename otherwise. Returns `None` for an empty spec.
    pub fn parse(spec: &'a str, method: &MethodName) -> Option<Self> {
        let fault_spec = match spec {
            "" => return None,
            "newUnknownValue" => FaultSpec::NewUnknownValue,
            "incorrectReferenceURL" => FaultSpec::IncorrectReferenceUrl,
            "invalidReferenceURL" => FaultSpec::InvalidReferenceUrl,
            "invalidRequestTime" => FaultSpec::InvalidRequestTime,
            "invalidId" if method.is_abis() => FaultSpec::InvalidId,
            _ if spec.contains('[') && spec.contains(']') && spec.contains('.') => FaultSpec::IndexedPath {
                array: spec.split('[').next().unwrap_or_default(),
                leaf: spec.split('.').nth(1).unwrap_or_default(),
            },
            _ if spec.contains('.') => {
                let mut parts = spec.split('.');
                FaultSpec::NestedPath {
                    object: parts.next().unwrap_or_default(),
                    leaf: parts.next().unwrap_or_default(),
                }
            }
            _ => FaultSpec::Key(spec),
        };
        Some(fault_spec)
    }
}
