use crate::app_config::AppConfig;
use crate::data_service::service::{DataService, ServiceOutcome};
use crate::domain::{ProjectType, Report, ReportStatus, ServiceError, TranslationBundle};
use crate::validation::{Envelope, RequestValidation, ResponseValidation};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, instrument, warn};

/// The `{ response, errors }` wrapper the toolkit answers with.
#[derive(Debug, Deserialize)]
struct ServiceResponse<T> {
    response: Option<T>,
    #[serde(default)]
    errors: Option<Vec<ServiceError>>,
}

#[derive(Debug)]
pub struct HttpDataService {
    client: Client,
    config: Arc<AppConfig>,
}

impl HttpDataService {
    pub fn new(client: Client, config: Arc<AppConfig>) -> Self {
        HttpDataService { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.data_service().url().trim_end_matches('/'), path)
    }

    // Only transport failures are retried, the toolkit's answers are final.
    async fn send<T, F>(&self, request: F) -> Result<T, DataServiceError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let settings = self.config.data_service();
        let strategy = ExponentialBackoff::from_millis(settings.retry_ms())
            .factor(2)
            .max_delay(settings.retry_max_delay_ms())
            .map(jitter)
            .take(settings.max_retries());

        let request = &request;
        let response = RetryIf::spawn(
            strategy,
            move || async move { request().send().await?.error_for_status() },
            |e: &reqwest::Error| {
                let transient = e.is_connect() || e.is_timeout();
                if transient {
                    warn!("⚠️ Data service unreachable: {}. Retrying...", e);
                }
                transient
            },
        )
        .await?;

        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataServiceError> {
        let url = self.url(path);
        self.send(|| self.client.get(&url)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, DataServiceError> {
        let url = self.url(path);
        self.send(|| self.client.post(&url).json(body)).await
    }

    async fn validate(&self, path: &str, envelope: Result<Value, serde_json::Error>) -> ServiceOutcome<Value> {
        let result = match envelope {
            Ok(envelope) => self.post::<Value>(path, &envelope).await,
            Err(e) => Err(DataServiceError::Serialization(e)),
        };

        match result {
            Ok(body) => match response_errors(&body) {
                Some(errors) => {
                    warn!(path, "⚠️ Validation call rejected with {} error(s)", errors.len());
                    ServiceOutcome::Failed(errors)
                }
                None => ServiceOutcome::Success(body),
            },
            Err(e) => failed(path, e),
        }
    }
}

#[async_trait]
impl DataService for HttpDataService {
    #[instrument(skip_all)]
    async fn validate_request(&self, envelope: &Envelope<RequestValidation>) -> ServiceOutcome<Value> {
        self.validate("validateRequest", serde_json::to_value(envelope)).await
    }

    #[instrument(skip_all)]
    async fn validate_response(&self, envelope: &Envelope<ResponseValidation>) -> ServiceOutcome<Value> {
        self.validate("validateResponse", serde_json::to_value(envelope)).await
    }

    #[instrument(skip(self))]
    async fn get_resource_bundle(&self, locale: &str) -> ServiceOutcome<TranslationBundle> {
        info!("Retrieving resource bundle...");
        let path = format!("getResourceBundle/{}", locale);
        match self.get::<TranslationBundle>(&path).await {
            Ok(bundle) => {
                info!("Retrieving resource bundle... OK");
                ServiceOutcome::Success(bundle)
            }
            Err(e) => failed(&path, e),
        }
    }

    #[instrument(skip(self))]
    async fn get_partner_report_list(&self, status: ReportStatus) -> ServiceOutcome<Vec<Report>> {
        let path = format!("getPartnerReportList/{}", status);
        unwrap_response(&path, self.get::<ServiceResponse<Vec<Report>>>(&path).await)
    }

    #[instrument(skip(self))]
    async fn get_project(&self, project_type: ProjectType, project_id: &str) -> ServiceOutcome<Value> {
        let path = match project_type {
            ProjectType::Sbi => format!("getSbiProject/{}", project_id),
            ProjectType::Sdk => format!("getSdkProject/{}", project_id),
            ProjectType::Abis => format!("getAbisProject/{}", project_id),
        };
        unwrap_response(&path, self.get::<ServiceResponse<Value>>(&path).await)
    }
}

fn response_errors(body: &Value) -> Option<Vec<ServiceError>> {
    let errors = body.get("errors")?;
    let errors = serde_json::from_value::<Vec<ServiceError>>(errors.clone()).ok()?;
    (!errors.is_empty()).then_some(errors)
}

fn unwrap_response<T>(path: &str, result: Result<ServiceResponse<T>, DataServiceError>) -> ServiceOutcome<T> {
    match result {
        Ok(ServiceResponse { errors: Some(errors), .. }) if !errors.is_empty() => {
            warn!(path, "⚠️ Data service answered with {} error(s)", errors.len());
            ServiceOutcome::Failed(errors)
        }
        Ok(ServiceResponse { response: Some(response), .. }) => ServiceOutcome::Success(response),
        Ok(ServiceResponse { response: None, .. }) => failed(path, DataServiceError::EmptyResponse),
        Err(e) => failed(path, e),
    }
}

fn failed<T>(path: &str, error: DataServiceError) -> ServiceOutcome<T> {
    warn!(path, "⚠️ Data service call failed: {}", error);
    ServiceOutcome::Failed(vec![ServiceError::without_code(error.to_string())])
}

#[derive(Error, Debug)]
pub enum DataServiceError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unable to serialize the request: {0}")]
    Serialization(serde_json::Error),
    #[error("data service answered without a response")]
    EmptyResponse,
}
