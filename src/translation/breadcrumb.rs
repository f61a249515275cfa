use crate::domain::{ProjectType, TranslationBundle};

#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbLabels {
    pub home: String,
    pub project: Option<String>,
    pub collection: String,
}

/// Labels for the home, project and collection crumbs, `None` when the bundle has no breadcrumb section.
pub fn breadcrumb_labels(
    bundle: &TranslationBundle,
    project_type: ProjectType,
    project_name: Option<&str>,
    collection_name: Option<&str>,
) -> Option<BreadcrumbLabels> {
    let labels = bundle.breadcrumb()?;
    let label = |key: &str| labels.get(key).cloned().unwrap_or_default();

    Some(BreadcrumbLabels {
        home: label("home"),
        project: project_name.map(|name| format!("{} {} - {}", project_type, label("project"), name)),
        collection: collection_name
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| label("add")),
    })
}
