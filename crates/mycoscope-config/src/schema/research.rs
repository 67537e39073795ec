//! Defaults applied to research requests that leave fields unset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchDefaultsConfig {
    pub report_type: String,
    pub tone: String,
    /// Any of: pubmed, arxiv, web, local. "local" switches the report to hybrid.
    pub data_sources: Vec<String>,
    /// Any of: mycology, microbiology, medical.
    pub filters: Vec<String>,
}

impl Default for ResearchDefaultsConfig {
    fn default() -> Self {
        Self {
            report_type: "research_report".into(),
            tone: "objective".into(),
            data_sources: vec!["pubmed".into(), "arxiv".into(), "web".into()],
            filters: vec!["mycology".into()],
        }
    }
}
