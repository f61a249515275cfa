use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Review,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [ReportStatus::Review, ReportStatus::Approved, ReportStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Review => "review",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Sbi,
    Sdk,
    Abis,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Sbi => "SBI",
            ProjectType::Sdk => "SDK",
            ProjectType::Abis => "ABIS",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partner's compliance report as listed by the data service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub partner_id: String,
    pub org_name: Option<String>,
    pub project_id: Option<String>,
    pub project_type: String,
    pub project_name: Option<String>,
    pub collection_id: Option<String>,
    pub collection_name: Option<String>,
    pub run_id: Option<String>,
    pub report_status: Option<String>,
    pub partner_comments: Option<String>,
    pub review_dtimes: Option<String>,
    pub approve_reject_dtimes: Option<String>,
}
