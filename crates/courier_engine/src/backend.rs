use std::time::Duration;

use courier_core::{CatalogItem, JobId, RemoteStatus};
use courier_logging::courier_debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::{
    BackendError, DownloadRequest, PollError, SearchError, SubmissionError, SubmissionReceipt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The three backend calls the core depends on.
#[async_trait::async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, SearchError>;

    async fn submit_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<SubmissionReceipt, SubmissionError>;

    async fn poll_status(&self, id: &JobId) -> Result<RemoteStatus, PollError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let invalid = |reason: String| BackendError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            reason,
        };
        let base_url = Url::parse(&settings.base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical url".to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::Client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base url, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl CatalogBackend for HttpBackend {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, SearchError> {
        let mut url = self.endpoint(&["search"]);
        url.query_pairs_mut().append_pair("q", query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                message: error_message(&body, "Search failed"),
            });
        }

        let value: Value =
            serde_json::from_slice(&body).map_err(|err| SearchError::Decode(err.to_string()))?;
        let items = wire_items(value).map_err(|err| SearchError::Decode(err.to_string()))?;
        let total = items.len();
        let items: Vec<CatalogItem> = items
            .into_iter()
            .filter_map(WireItem::into_catalog_item)
            .collect();
        if items.len() < total {
            courier_debug!(
                "search {:?}: dropped {} results without an id",
                query,
                total - items.len()
            );
        }
        Ok(items)
    }

    async fn submit_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let payload = serde_json::to_vec(&WireDownloadRequest {
            pid: request.id.as_str(),
            title: &request.label,
            quality: &request.quality,
            output_dir: &request.output_dir,
        })
        .map_err(|err| SubmissionError::Transport(err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint(&["download"]))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: error_message(
                    &body,
                    status.canonical_reason().unwrap_or("Download failed"),
                ),
            });
        }

        let receipt: WireReceipt = serde_json::from_slice(&body)
            .map_err(|err| SubmissionError::Decode(err.to_string()))?;
        Ok(SubmissionReceipt {
            message: receipt.message,
        })
    }

    async fn poll_status(&self, id: &JobId) -> Result<RemoteStatus, PollError> {
        let response = self
            .client
            .get(self.endpoint(&["check_status", id.as_str()]))
            .send()
            .await
            .map_err(|err| PollError::Transient(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PollError::NotFound);
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| PollError::Transient(err.to_string()))?;

        if !status.is_success() {
            return Err(PollError::Transient(format!(
                "{}: {}",
                status.as_u16(),
                error_message(&body, "Status check failed")
            )));
        }

        let report: WireStatus =
            serde_json::from_slice(&body).map_err(|err| PollError::Transient(err.to_string()))?;
        Ok(RemoteStatus::from_wire(report.status.as_deref().unwrap_or_default()))
    }
}

#[derive(Serialize)]
struct WireDownloadRequest<'a> {
    pid: &'a str,
    title: &'a str,
    quality: &'a str,
    output_dir: &'a str,
}

#[derive(Deserialize)]
struct WireReceipt {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct WireStatus {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize, Default)]
struct WireErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body: &[u8], fallback: &str) -> String {
    let parsed: WireErrorBody = serde_json::from_slice(body).unwrap_or_default();
    [parsed.error, parsed.detail, parsed.message]
        .into_iter()
        .find_map(non_empty)
        .unwrap_or_else(|| fallback.to_string())
}

/// Results arrive either as a bare array or wrapped in `results` / `items`.
/// Any other shape counts as no results.
fn wire_items(value: Value) -> Result<Vec<WireItem>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(mut map) => {
            let results = take_list(&mut map, "results")?;
            if results.is_empty() {
                take_list(&mut map, "items")
            } else {
                Ok(results)
            }
        }
        _ => Ok(Vec::new()),
    }
}

fn take_list(map: &mut Map<String, Value>, key: &str) -> Result<Vec<WireItem>, serde_json::Error> {
    match map.remove(key) {
        Some(list @ Value::Array(_)) => serde_json::from_value(list),
        _ => Ok(Vec::new()),
    }
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(default)]
    pid: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    episode_number: Option<Value>,
    #[serde(default)]
    series_title: Option<String>,
    #[serde(default)]
    duration: Option<Value>,
}

impl WireItem {
    fn into_catalog_item(self) -> Option<CatalogItem> {
        let id = scalar_text(self.pid).or_else(|| scalar_text(self.id))?;
        let label = non_empty(self.title)
            .or_else(|| non_empty(self.name))
            .unwrap_or_else(|| "Untitled".to_string());
        let series = non_empty(self.series_title);
        let episode_info = scalar_text(self.episode_number).map(|number| match series {
            Some(series) => format!("Episode {number} - {series}"),
            None => format!("Episode {number}"),
        });

        Some(CatalogItem {
            id: JobId::new(id),
            label,
            description: non_empty(self.description).or_else(|| non_empty(self.desc)),
            episode_info,
            duration: scalar_text(self.duration),
        })
    }
}

fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => non_empty(Some(text)),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
