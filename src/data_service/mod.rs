mod client;
mod http_data_service;
mod reports;
mod service;

pub use client::{ClientError, new_client};
pub use http_data_service::{DataServiceError, HttpDataService};
pub use reports::all_partner_reports;
pub use service::{DataService, ServiceOutcome};
