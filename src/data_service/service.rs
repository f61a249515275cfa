use crate::domain::{ProjectType, Report, ReportStatus, ServiceError, TranslationBundle};
use crate::validation::{Envelope, RequestValidation, ResponseValidation};
use async_trait::async_trait;
use serde_json::Value;

/// The result of a data service call. Failures are values, callers branch instead of propagating.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome<T> {
    Success(T),
    Failed(Vec<ServiceError>),
}

impl<T> ServiceOutcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            ServiceOutcome::Success(value) => Some(value),
            ServiceOutcome::Failed(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceOutcome<U> {
        match self {
            ServiceOutcome::Success(value) => ServiceOutcome::Success(f(value)),
            ServiceOutcome::Failed(errors) => ServiceOutcome::Failed(errors),
        }
    }
}

/// The compliance toolkit backend that stores test data and runs the validators.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn validate_request(&self, envelope: &Envelope<RequestValidation>) -> ServiceOutcome<Value>;

    async fn validate_response(&self, envelope: &Envelope<ResponseValidation>) -> ServiceOutcome<Value>;

    async fn get_resource_bundle(&self, locale: &str) -> ServiceOutcome<TranslationBundle>;

    async fn get_partner_report_list(&self, status: ReportStatus) -> ServiceOutcome<Vec<Report>>;

    async fn get_project(&self, project_type: ProjectType, project_id: &str) -> ServiceOutcome<Value>;
}
