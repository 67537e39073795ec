//! Research request construction.
//!
//! `ResearchParams` is what the caller supplies; `ResearchRequest` is the
//! immutable value sent in the start command.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Appended when the mycology filter is active and the query lacks domain terms.
const MYCOLOGY_SUFFIX: &str = "(fungi OR mycology)";

/// Literal substrings that mark a query as already on-topic.
const MYCOLOGY_MARKERS: &[&str] = &["fungi", "mushroom", "mold", "mycology"];

/// Source data that switches the report to hybrid mode.
const LOCAL_SOURCE: &str = "local";

/// Search domains added per active filter, in filter order.
const FILTER_DOMAINS: &[(&str, &[&str])] = &[
    (
        "mycology",
        &["ncbi.nlm.nih.gov", "mycobank.org", "mycology.net"],
    ),
    ("microbiology", &["microbiologyresearch.org", "asm.org"]),
    ("medical", &["cdc.gov", "who.int", "nih.gov"]),
];

/// Where the backend gathers sources from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Web,
    Hybrid,
}

/// Caller-supplied parameters; unset fields take defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchParams {
    pub query: String,
    pub report_type: String,
    pub tone: String,
    pub data_sources: Vec<String>,
    pub filters: Vec<String>,
    pub source_urls: Vec<String>,
    pub document_urls: Vec<String>,
    /// Extra headers merged under the domain-enhancement flags.
    pub headers: serde_json::Map<String, serde_json::Value>,
}

impl ResearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            report_type: "research_report".to_string(),
            tone: "objective".to_string(),
            data_sources: vec!["pubmed".into(), "arxiv".into(), "web".into()],
            filters: vec!["mycology".into()],
            source_urls: Vec::new(),
            document_urls: Vec::new(),
            headers: serde_json::Map::new(),
        }
    }

    pub fn with_report_type(mut self, report_type: impl Into<String>) -> Self {
        self.report_type = report_type.into();
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_data_sources(mut self, sources: Vec<String>) -> Self {
        self.data_sources = sources;
        self
    }

    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.headers.insert(key.into(), value);
        self
    }
}

/// Body of the start command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub task: String,
    pub report_type: String,
    pub report_source: ReportSource,
    pub source_urls: Vec<String>,
    pub document_urls: Vec<String>,
    pub tone: String,
    pub query_domains: Vec<String>,
    pub headers: serde_json::Map<String, serde_json::Value>,
}

impl ResearchRequest {
    pub fn from_params(params: ResearchParams) -> Result<Self, SessionError> {
        if params.query.trim().is_empty() {
            return Err(SessionError::InvalidRequest("query must not be empty".into()));
        }

        let has_filter = |name: &str| params.filters.iter().any(|f| f == name);

        let task = if has_filter("mycology") && !mentions_mycology(&params.query) {
            format!("{} {MYCOLOGY_SUFFIX}", params.query)
        } else {
            params.query.clone()
        };

        let query_domains = FILTER_DOMAINS
            .iter()
            .filter(|(filter, _)| has_filter(filter))
            .flat_map(|(_, domains)| domains.iter().map(|d| d.to_string()))
            .collect();

        let report_source = if params.data_sources.iter().any(|s| s == LOCAL_SOURCE) {
            ReportSource::Hybrid
        } else {
            ReportSource::Web
        };

        let mut headers = params.headers;
        headers.insert("mycology_specific".into(), serde_json::Value::Bool(true));
        headers.insert("prioritize_recent".into(), serde_json::Value::Bool(true));

        Ok(Self {
            task,
            report_type: params.report_type,
            report_source,
            source_urls: params.source_urls,
            document_urls: params.document_urls,
            tone: params.tone,
            query_domains,
            headers,
        })
    }
}

/// Literal, case-insensitive marker check. "fungal" and "fungus" do not match.
fn mentions_mycology(query: &str) -> bool {
    let lowered = query.to_lowercase();
    MYCOLOGY_MARKERS.iter().any(|m| lowered.contains(m))
}
