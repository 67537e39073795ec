use crate::schema::MycoscopeConfig;

use super::helpers::validate_one_of;

const DATA_SOURCES: &[&str] = &["pubmed", "arxiv", "web", "local"];
const FILTERS: &[&str] = &["mycology", "microbiology", "medical"];

pub(crate) fn validate_research(errors: &mut Vec<String>, config: &MycoscopeConfig) {
    let research = &config.research;
    if research.report_type.trim().is_empty() {
        errors.push("research.report_type must not be empty".to_string());
    }
    if research.tone.trim().is_empty() {
        errors.push("research.tone must not be empty".to_string());
    }
    for source in &research.data_sources {
        validate_one_of(errors, "research.data_sources", source, DATA_SOURCES);
    }
    for filter in &research.filters {
        validate_one_of(errors, "research.filters", filter, FILTERS);
    }
}
