use crate::app_config::AppConfig;
use crate::data_service::{DataService, ServiceOutcome};
use crate::domain::{DeviceDescriptor, MethodName, TestCase, TranslationBundle};
use crate::fault_injector::apply_invalid_request_attribute;
use crate::normalizer::create_decoded_response;
use crate::run_loader::TestRun;
use crate::translation::{resolve, translate_test_case};
use crate::validation::{
    EnvelopeHeader, Execution, capture_request, effective_timeout, rcapture_request, request_validation, response_validation,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// What the validators made of one test run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub test_id: String,
    pub test_name: String,
    pub request_validation: ServiceOutcome<Value>,
    pub response_validation: ServiceOutcome<Value>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.request_validation.is_success() && self.response_validation.is_success()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub name: String,
    pub status: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationEntry {
    validation_name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    description: String,
    description_key: Option<String>,
}

/// Validates the request and the normalized response of a recorded run.
///
/// Capture and rcapture runs without a recorded request get one built here, any other method
/// needs its recorded request. Fault injection only touches requests built here, a recorded
/// request is validated as it was sent.
#[instrument(skip_all, fields(test_id = %run.test_case.test_id))]
pub async fn execute<S: DataService + ?Sized>(
    run: &TestRun,
    service: &S,
    bundle: &TranslationBundle,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<RunReport, RunError> {
    let test_case = translate_test_case(&run.test_case, bundle);
    let device = DeviceDescriptor::from_json(&run.device).map_err(RunError::Device)?;
    let method = test_case.primary_method();
    let header = EnvelopeHeader::new(config.data_service().validations_id(), config.data_service().version());

    let method_request = match &run.method_request {
        Some(request) => request.clone(),
        None => {
            let request = build_request(&method, &device, &test_case, run.previous_hash.as_deref().unwrap_or_default(), config, now)?;
            if test_case.is_negative_testcase {
                apply_invalid_request_attribute(&test_case, request)
            } else {
                request
            }
        }
    };

    let request = request_validation(&test_case, &method_request).map_err(RunError::Serialization)?;
    let request_outcome = service.validate_request(&header.wrap(request, now)).await;

    let decoded_response = create_decoded_response(&method, run.method_response.clone(), &device, config.core().is_mobile_app());
    debug!(identities = ?decoded_response.identities(), "Normalized the device response");

    let execution = Execution {
        device: &device,
        start_execution_time: &run.start_execution_time,
        end_execution_time: &run.end_execution_time,
        timeout: effective_timeout(&test_case, config),
        before_key_rotation_resp: run.before_key_rotation_resp.as_ref(),
        previous_hash: run.previous_hash.as_deref(),
    };
    let response = response_validation(&test_case, &method_request, &decoded_response, &execution).map_err(RunError::Serialization)?;
    let response_outcome = service.validate_response(&header.wrap(response, now)).await;

    let report = RunReport {
        test_id: test_case.test_id,
        test_name: test_case.test_name,
        request_validation: request_outcome,
        response_validation: response_outcome,
    };
    info!(success = report.is_success(), "Executed '{}'", report.test_name);
    Ok(report)
}

fn build_request(
    method: &MethodName,
    device: &DeviceDescriptor,
    test_case: &TestCase,
    previous_hash: &str,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<Value, RunError> {
    let request = match method {
        MethodName::Capture => serde_json::to_value(capture_request(device, test_case, previous_hash, config, now)),
        MethodName::RCapture => serde_json::to_value(rcapture_request(device, test_case, previous_hash, config, now)),
        other => return Err(RunError::MissingRequest(other.clone())),
    };
    request.map_err(RunError::Serialization)
}

/// Reads the `validationsList` of a validation answer, translating each description key.
pub fn validation_results(body: &Value, bundle: &TranslationBundle) -> Vec<ValidationResult> {
    let Some(list) = body.pointer("/response/validationsList") else {
        return Vec::new();
    };

    serde_json::from_value::<Vec<ValidationEntry>>(list.clone())
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let description = match entry.description_key.as_deref() {
                Some(key) if !key.is_empty() => resolve(key, bundle),
                _ => entry.description,
            };
            ValidationResult {
                name: entry.validation_name,
                status: entry.status,
                description,
            }
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("invalid device descriptor: {0}")]
    Device(serde_json::Error),
    #[error("unable to serialize the validation request: {0}")]
    Serialization(serde_json::Error),
    #[error("a '{0}' run needs its recorded method request")]
    MissingRequest(MethodName),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::{ProjectType, Report, ReportStatus, ServiceError};
    use crate::validation::{Envelope, RequestValidation, ResponseValidation};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use test_log::test;

    #[derive(Default)]
    struct RecordingDataService {
        requests: Mutex<Vec<RequestValidation>>,
        responses: Mutex<Vec<ResponseValidation>>,
        reject_responses: bool,
    }

    #[async_trait]
    impl DataService for RecordingDataService {
        async fn validate_request(&self, envelope: &Envelope<RequestValidation>) -> ServiceOutcome<Value> {
            self.requests.lock().unwrap().push(envelope.request.clone());
            ServiceOutcome::Success(json!({ "response": { "validationsList": [] } }))
        }

        async fn validate_response(&self, envelope: &Envelope<ResponseValidation>) -> ServiceOutcome<Value> {
            self.responses.lock().unwrap().push(envelope.request.clone());
            if self.reject_responses {
                ServiceOutcome::Failed(vec![ServiceError::new("TOOLKIT_REQ_ERR_001", "Invalid request")])
            } else {
                ServiceOutcome::Success(json!({ "response": { "validationsList": [] } }))
            }
        }

        async fn get_resource_bundle(&self, _: &str) -> ServiceOutcome<TranslationBundle> {
            unimplemented!()
        }

        async fn get_partner_report_list(&self, _: ReportStatus) -> ServiceOutcome<Vec<Report>> {
            unimplemented!()
        }

        async fn get_project(&self, _: ProjectType, _: &str) -> ServiceOutcome<Value> {
            unimplemented!()
        }
    }

    fn bundle() -> TranslationBundle {
        serde_json::from_str(include_str!("../tests/resources/resource_bundle.json")).unwrap()
    }

    fn device_info_run() -> TestRun {
        serde_json::from_str(include_str!("../tests/resources/runs/device_info_run.json")).unwrap()
    }

    fn capture_run(other_attributes: Value) -> TestRun {
        serde_json::from_value(json!({
            "testCase": {
                "testId": "SBI1050",
                "testName": "Capture",
                "testCaseType": "SBI",
                "specVersion": "0.9.5",
                "methodName": ["capture"],
                "isNegativeTestcase": true,
                "otherAttributes": other_attributes
            },
            "device": "{\"type\":\"Finger\",\"deviceSubType\":\"Slap\",\"deviceId\":\"4\",\"specVersion\":[\"0.9.5\"],\"purpose\":\"Registration\",\"certification\":\"L1\"}",
            "methodResponse": { "biometrics": [] },
            "startExecutionTime": "2024-03-01T10:15:30.000Z",
            "endExecutionTime": "2024-03-01T10:15:31.000Z"
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap()
    }

    #[test(tokio::test)]
    async fn execute_validates_the_normalized_response() {
        let service = RecordingDataService::default();
        let config = AppConfigBuilder::new().build();

        let report = execute(&device_info_run(), &service, &bundle(), &config, now()).await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.test_name, "Informations du périphérique");

        let responses = service.responses.lock().unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].test_description, "Vérifie la réponse à l'appel info");
        let method_response = serde_json::from_str::<Value>(&responses[0].method_response).unwrap();
        assert_eq!(
            method_response[0]["deviceInfoDecoded"]["digitalIdDecoded"],
            json!({ "type": "Finger", "deviceSubType": "Slap", "make": "MOSIP" })
        );
        assert_eq!(
            serde_json::from_str::<Value>(&responses[0].extra_info_json).unwrap()["timeout"],
            json!("10000")
        );
    }

    #[test(tokio::test)]
    async fn execute_builds_and_breaks_a_missing_capture_request() {
        let service = RecordingDataService::default();
        let config = AppConfigBuilder::new().build();
        let run = capture_run(json!({ "invalidRequestAttribute": "bio[0].deviceId", "segments": ["RightIndex"], "timeout": 5000 }));

        execute(&run, &service, &bundle(), &config, now()).await.unwrap();

        let requests = service.requests.lock().unwrap();
        let method_request = serde_json::from_str::<Value>(&requests[0].method_request).unwrap();
        assert_eq!(method_request["timeout"], json!("5000"));
        assert_eq!(method_request["bio"][0]["bioSubType"], json!(["Right IndexFinger"]));
        assert_eq!(method_request["bio"][0].get("deviceId"), None);
        assert_eq!(method_request["bio"][0]["deviceIdXXX"], json!("4"));
    }

    #[test(tokio::test)]
    async fn execute_reports_rejected_validations() {
        let service = RecordingDataService {
            reject_responses: true,
            ..Default::default()
        };
        let config = AppConfigBuilder::new().build();

        let report = execute(&device_info_run(), &service, &bundle(), &config, now()).await.unwrap();

        assert!(!report.is_success());
        assert!(report.request_validation.is_success());
    }

    #[test(tokio::test)]
    async fn execute_rejects_an_invalid_device() {
        let service = RecordingDataService::default();
        let config = AppConfigBuilder::new().build();
        let mut run = device_info_run();
        run.device = "not json".to_string();

        let result = execute(&run, &service, &bundle(), &config, now()).await;

        assert!(matches!(result, Err(RunError::Device(_))));
        assert!(service.requests.lock().unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn execute_requires_the_recorded_request_of_a_device_info_run() {
        let service = RecordingDataService::default();
        let config = AppConfigBuilder::new().build();
        let mut run = device_info_run();
        run.method_request = None;

        let result = execute(&run, &service, &bundle(), &config, now()).await;

        assert!(matches!(result, Err(RunError::MissingRequest(MethodName::DeviceInfo))));
        assert!(service.requests.lock().unwrap().is_empty());
        assert!(service.responses.lock().unwrap().is_empty());
    }

    #[test]
    fn validation_results_translate_description_keys() {
        let body = json!({
            "response": {
                "validationsList": [
                    { "validationName": "SchemaValidator", "status": "FAILURE", "description": "Field mobile is missing", "descriptionKey": "SCHEMA_VALIDATOR_001::mobile" },
                    { "validationName": "SignatureValidator", "status": "SUCCESS", "description": "Signature is valid" }
                ]
            }
        });

        let results = validation_results(&body, &bundle());

        assert_eq!(
            results,
            vec![
                ValidationResult {
                    name: "SchemaValidator".to_string(),
                    status: "FAILURE".to_string(),
                    description: "Le champ mobile est manquant".to_string(),
                },
                ValidationResult {
                    name: "SignatureValidator".to_string(),
                    status: "SUCCESS".to_string(),
                    description: "Signature is valid".to_string(),
                },
            ]
        );
    }

    #[test]
    fn validation_results_are_empty_without_a_list() {
        assert!(validation_results(&json!({ "response": null }), &bundle()).is_empty());
    }
}
