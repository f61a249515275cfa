use crate::domain::{DeviceDescriptor, MethodName};
use crate::normalizer::capture::decode_biometric_records;
use crate::normalizer::decoded_response::DecodedResponse;
use crate::normalizer::device_info::decode_device_info_records;
use crate::normalizer::discover::decode_discover_records;
use crate::normalizer::raw_response::RawResponse;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Decodes a raw device response for `method`.
///
/// Undecodable records are dropped, never reported as errors. Device info and capture records
/// are also dropped when `device` did not produce them, discovered devices are all kept.
/// A response that does not have the shape of its method decodes to an empty result.
#[instrument(skip(response, device), fields(device_type = %device.r#type, device_sub_type = %device.device_sub_type))]
pub fn create_decoded_response(method: &MethodName, response: Value, device: &DeviceDescriptor, is_mobile_app: bool) -> DecodedResponse {
    let raw_response = match RawResponse::parse(method, response, is_mobile_app) {
        Ok(raw_response) => raw_response,
        Err(e) => {
            warn!("⚠️ Unable to read the device response: {}", e);
            return empty_response(method);
        }
    };

    let decoded_response = match raw_response {
        RawResponse::Discover(records) => DecodedResponse::Discover(decode_discover_records(records)),
        RawResponse::DeviceInfo(records) => DecodedResponse::DeviceInfo(decode_device_info_records(records, device)),
        RawResponse::Capture(records) => DecodedResponse::Capture {
            biometrics: decode_biometric_records(records, device),
        },
        RawResponse::Other(response) => return DecodedResponse::PassThrough(response),
    };

    info!("Decoded {} record(s)", decoded_response.identities().len());
    decoded_response
}

fn empty_response(method: &MethodName) -> DecodedResponse {
    match method {
        MethodName::Discover => DecodedResponse::Discover(Vec::new()),
        MethodName::DeviceInfo => DecodedResponse::DeviceInfo(Vec::new()),
        MethodName::Capture | MethodName::RCapture => DecodedResponse::Capture { biometrics: Vec::new() },
        _ => DecodedResponse::PassThrough(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::fixtures::{base64_json, signed_token};
    use crate::decoder::matches;
    use crate::normalizer::decoded_response::{BiometricEntry, DeviceInfoEntry};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_log::test;

    fn device() -> DeviceDescriptor {
        DeviceDescriptor {
            r#type: "Finger".to_string(),
            device_sub_type: "Slap".to_string(),
            device_id: "1".to_string(),
            spec_version: vec!["0.9.5".to_string()],
            purpose: "Registration".to_string(),
            certification: "L1".to_string(),
        }
    }

    fn digital_id(device_sub_type: &str) -> Value {
        json!({ "type": "Finger", "deviceSubType": device_sub_type, "make": "MOSIP", "model": "SLAP01" })
    }

    fn registered_payload(device_sub_type: &str) -> String {
        signed_token(&json!({
            "deviceCode": "b692b595-3523-slap-99fc-bd76e35f290f",
            "digitalId": signed_token(&digital_id(device_sub_type)),
        }))
    }

    fn unregistered_payload(device_sub_type: &str) -> String {
        base64_json(&json!({
            "deviceStatus": "Not Registered",
            "digitalId": digital_id(device_sub_type).to_string(),
        }))
    }

    #[test]
    fn discover_decodes_the_digital_id_and_keeps_raw_fields() {
        let response = json!([
            { "deviceId": "1", "deviceStatus": "Ready", "digitalId": base64_json(&digital_id("Slap")) },
            { "deviceId": "2", "deviceStatus": "Ready", "digitalId": base64_json(&digital_id("Single")) },
            { "deviceId": "3", "deviceStatus": "Ready", "digitalId": "not base64!" },
        ]);

        let decoded = create_decoded_response(&MethodName::Discover, response, &device(), false);

        let serialized = serde_json::to_value(&decoded).unwrap();
        assert_eq!(
            serialized,
            json!([
                {
                    "deviceId": "1",
                    "deviceStatus": "Ready",
                    "digitalId": base64_json(&digital_id("Slap")),
                    "digitalIdDecoded": digital_id("Slap"),
                },
                {
                    "deviceId": "2",
                    "deviceStatus": "Ready",
                    "digitalId": base64_json(&digital_id("Single")),
                    "digitalIdDecoded": digital_id("Single"),
                }
            ])
        );
    }

    #[test]
    fn discover_keeps_decodable_devices_of_another_type() {
        let iris = json!({ "type": "Iris", "deviceSubType": "Double", "make": "MOSIP" });
        let response = json!([
            { "deviceId": "1", "digitalId": base64_json(&digital_id("Slap")) },
            { "deviceId": "2", "digitalId": base64_json(&iris) },
        ]);

        let decoded = create_decoded_response(&MethodName::Discover, response, &device(), false);

        let identities = decoded.identities();
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[1].as_ref().map(|identity| identity.r#type.as_str()), Some("Iris"));
        assert!(!matches(identities[1].as_ref(), &device()));
    }

    #[test]
    fn discover_reads_a_single_record_from_mobile_apps() {
        let response = json!({ "deviceId": "1", "digitalId": base64_json(&digital_id("Slap")) });

        let decoded = create_decoded_response(&MethodName::Discover, response, &device(), true);

        assert_eq!(decoded.identities().len(), 1);
    }

    #[test]
    fn device_info_passes_records_without_device_info_through() {
        let response = json!([
            { "deviceInfo": "", "error": { "errorCode": "100", "errorInfo": "Device not ready" } },
            { "error": { "errorCode": "101" } },
        ]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response.clone(), &device(), false);

        assert_eq!(serde_json::to_value(&decoded).unwrap(), response);
    }

    #[test]
    fn device_info_keeps_a_matching_registered_device() {
        let device_info = registered_payload("Slap");
        let response = json!([{ "deviceInfo": device_info, "error": { "errorCode": "0" } }]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response, &device(), false);

        let DecodedResponse::DeviceInfo(entries) = &decoded else {
            panic!("expected a device info response, found {:?}", decoded);
        };
        let DeviceInfoEntry::Decoded(entry) = &entries[0] else {
            panic!("expected a decoded entry");
        };
        assert_eq!(entry.device_info, device_info);
        assert_eq!(entry.error, Some(json!({ "errorCode": "0" })));
        assert_eq!(entry.device_info_decoded.digital_id_decoded, digital_id("Slap"));

        let serialized = serde_json::to_value(&decoded).unwrap();
        assert_eq!(serialized[0]["deviceInfoDecoded"]["deviceCode"], json!("b692b595-3523-slap-99fc-bd76e35f290f"));
        assert_eq!(serialized[0]["deviceInfoDecoded"]["digitalIdDecoded"]["deviceSubType"], json!("Slap"));
    }

    #[test]
    fn device_info_keeps_a_matching_unregistered_device() {
        let response = json!([{ "deviceInfo": unregistered_payload("Slap") }]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response, &device(), false);

        assert_eq!(decoded.identities(), vec![Some(device().identity())]);
    }

    #[test]
    fn device_info_drops_a_mismatched_sub_type() {
        let response = json!([
            { "deviceInfo": registered_payload("Single") },
            { "deviceInfo": unregistered_payload("Single") },
        ]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response, &device(), false);

        assert_eq!(decoded, DecodedResponse::DeviceInfo(Vec::new()));
    }

    #[test]
    fn device_info_drops_undecodable_records() {
        let response = json!([{ "deviceInfo": "a.b.c" }, { "deviceInfo": "%%%" }]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response, &device(), false);

        assert_eq!(decoded, DecodedResponse::DeviceInfo(Vec::new()));
    }

    #[test]
    fn capture_decodes_data_and_rewraps_biometrics() {
        let response = json!({
            "biometrics": [
                { "specVersion": "0.9.5", "data": registered_payload("Slap"), "hash": "h1", "sessionKey": "k1", "thumbprint": "t1" },
                { "specVersion": "0.9.5", "data": unregistered_payload("Slap"), "hash": "h2" },
                { "specVersion": "0.9.5", "data": registered_payload("Single"), "hash": "h3" },
                { "specVersion": "0.9.5", "data": "", "error": { "errorCode": "701" } },
            ]
        });

        let decoded = create_decoded_response(&MethodName::Capture, response, &device(), false);

        let DecodedResponse::Capture { biometrics } = &decoded else {
            panic!("expected a capture response, found {:?}", decoded);
        };
        assert_eq!(biometrics.len(), 3);
        let BiometricEntry::Decoded(first) = &biometrics[0] else {
            panic!("expected a decoded biometric");
        };
        assert_eq!(first.hash, Some(json!("h1")));
        assert_eq!(first.session_key, Some(json!("k1")));
        assert!(matches!(biometrics[2], BiometricEntry::PassThrough(_)));

        let serialized = serde_json::to_value(&decoded).unwrap();
        assert_eq!(serialized["biometrics"][1]["dataDecoded"]["deviceStatus"], json!("Not Registered"));
        assert_eq!(serialized["biometrics"][2], json!({ "specVersion": "0.9.5", "data": "", "error": { "errorCode": "701" } }));
    }

    #[test]
    fn rcapture_uses_the_capture_rules() {
        let response = json!({ "biometrics": [{ "data": registered_payload("Slap") }] });

        let decoded = create_decoded_response(&MethodName::RCapture, response, &device(), false);

        assert_eq!(decoded.identities(), vec![Some(device().identity())]);
    }

    #[test]
    fn other_methods_pass_through_unmodified() {
        let response = json!({ "id": "mosip.abis.insert", "returnValue": "1" });

        let decoded = create_decoded_response(&MethodName::Insert, response.clone(), &device(), false);

        assert_eq!(decoded, DecodedResponse::PassThrough(response));
    }

    #[test]
    fn malformed_responses_decode_to_an_empty_result() {
        let decoded = create_decoded_response(&MethodName::DeviceInfo, json!({ "error": "boom" }), &device(), false);

        assert_eq!(decoded, DecodedResponse::DeviceInfo(Vec::new()));
    }

    #[test]
    fn decoded_device_info_entries_always_match_the_device() {
        let response = json!([
            { "deviceInfo": registered_payload("Slap") },
            { "deviceInfo": registered_payload("Single") },
            { "deviceInfo": unregistered_payload("Slap") },
            { "deviceInfo": unregistered_payload("Double") },
        ]);

        let decoded = create_decoded_response(&MethodName::DeviceInfo, response, &device(), false);

        let identities = decoded.identities();
        assert_eq!(identities.len(), 2);
        assert!(identities.iter().all(|identity| matches(identity.as_ref(), &device())));
    }
}
