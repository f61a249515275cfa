use crate::domain::{DecodedIdentity, DeviceDescriptor};

/// A decoded device belongs to the test run only when both its type and sub type match exactly.
pub fn matches(decoded: Option<&DecodedIdentity>, expected: &DeviceDescriptor) -> bool {
    decoded.is_some_and(|identity| identity.r#type == expected.r#type && identity.device_sub_type == expected.device_sub_type)
}
