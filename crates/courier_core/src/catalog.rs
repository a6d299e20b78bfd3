use crate::JobId;

/// One downloadable catalog entry as shown in the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: JobId,
    pub label: String,
    pub description: Option<String>,
    pub episode_info: Option<String>,
    pub duration: Option<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<JobId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            episode_info: None,
            duration: None,
        }
    }
}

/// State of the search area, as reported by the search dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    Loading,
    TooShort,
    Results(Vec<CatalogItem>),
    Error(String),
}
