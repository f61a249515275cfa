use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The device selected during discovery that every response of a test run is checked against.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "SerializedDeviceDescriptor", rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub r#type: String,
    pub device_sub_type: String,
    pub device_id: String,
    pub spec_version: Vec<String>,
    pub purpose: String,
    pub certification: String,
}

impl DeviceDescriptor {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn identity(&self) -> DecodedIdentity {
        DecodedIdentity {
            r#type: self.r#type.clone(),
            device_sub_type: self.device_sub_type.clone(),
        }
    }
}

/// Type and sub type declared by a device inside its digital id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedIdentity {
    pub r#type: String,
    pub device_sub_type: String,
}

impl DecodedIdentity {
    /// Reads the identity out of a decoded digital id, `None` unless both fields are strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let r#type = value.get("type")?.as_str()?;
        let device_sub_type = value.get("deviceSubType")?.as_str()?;

        Some(DecodedIdentity {
            r#type: r#type.to_owned(),
            device_sub_type: device_sub_type.to_owned(),
        })
    }
}

// Discovery hands out the device with its identity nested in `digitalIdDecoded`, stored test
// runs may carry it flat.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedDeviceDescriptor {
    r#type: Option<String>,
    device_sub_type: Option<String>,
    digital_id_decoded: Option<DecodedIdentity>,
    #[serde(default)]
    device_id: String,
    #[serde(default)]
    spec_version: Vec<String>,
    #[serde(default)]
    purpose: String,
    #[serde(default)]
    certification: String,
}

impl TryFrom<SerializedDeviceDescriptor> for DeviceDescriptor {
    type Error = DeviceDescriptorError;

    fn try_from(serialized: SerializedDeviceDescriptor) -> Result<Self, Self::Error> {
        let (r#type, device_sub_type) = match (serialized.r#type, serialized.device_sub_type, serialized.digital_id_decoded) {
            (Some(r#type), Some(device_sub_type), _) => (r#type, device_sub_type),
            (_, _, Some(identity)) => (identity.r#type, identity.device_sub_type),
            _ => return Err(DeviceDescriptorError::MissingIdentity),
        };

        Ok(DeviceDescriptor {
            r#type,
            device_sub_type,
            device_id: serialized.device_id,
            spec_version: serialized.spec_version,
            purpose: serialized.purpose,
            certification: serialized.certification,
        })
    }
}

#[derive(Error, Debug)]
pub enum DeviceDescriptorError {
    #[error("device descriptor has neither a type/deviceSubType pair nor a digitalIdDecoded")]
    MissingIdentity,
}
