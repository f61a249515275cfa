use crate::data_service::service::{DataService, ServiceOutcome};
use crate::domain::{Report, ReportStatus};
use futures::future::join_all;
use tracing::{info, instrument, warn};

/// Reports under review, approved and rejected, in that order. A status that cannot be
/// fetched contributes nothing.
#[instrument(skip_all)]
pub async fn all_partner_reports<S: DataService + ?Sized>(service: &S) -> Vec<Report> {
    let outcomes = join_all(ReportStatus::ALL.iter().map(|status| service.get_partner_report_list(*status))).await;

    let reports = ReportStatus::ALL
        .iter()
        .zip(outcomes)
        .flat_map(|(status, outcome)| match outcome {
            ServiceOutcome::Success(reports) => reports,
            ServiceOutcome::Failed(errors) => {
                warn!(%status, "⚠️ Unable to fetch partner reports: {:?}", errors);
                Vec::new()
            }
        })
        .collect::<Vec<_>>();

    info!("Fetched {} partner report(s)", reports.len());
    reports
}
