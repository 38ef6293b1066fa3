use std::path::Path;

use hearth_state::{sniff_version, LoadReport, LoadSource, SavedState, SchemaVersion};
use serde::Serialize;

/// Output of `inspect`. Session tokens are never included, only their kind.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub path: String,
    pub len_bytes: usize,
    pub sniffed_version: Option<String>,
    pub source: &'static str,
    pub loaded_from: Option<String>,
    pub error: Option<String>,
    pub current_version: u32,
    pub active_profile_id: Option<String>,
    pub profiles: Vec<ProfileSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub auth: Option<&'static str>,
    pub has_preferences: bool,
    pub active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateReport {
    pub path: String,
    pub from: Option<String>,
    pub to: String,
    pub rewritten: bool,
}

pub fn source_name(source: &LoadSource) -> &'static str {
    match source {
        LoadSource::NoData => "noData",
        LoadSource::Upgraded { .. } => "upgraded",
        LoadSource::Defaulted(_) => "defaulted",
    }
}

pub fn loaded_from(source: &LoadSource) -> Option<SchemaVersion> {
    match source {
        LoadSource::Upgraded { from } => Some(*from),
        _ => None,
    }
}

impl InspectReport {
    pub fn new(path: &Path, bytes: &[u8], report: &LoadReport) -> Self {
        let sniffed_version = if bytes.is_empty() {
            None
        } else {
            Some(match sniff_version(bytes) {
                Ok(version) => version.to_string(),
                Err(err) => format!("unreadable: {err}"),
            })
        };
        let error = match &report.source {
            LoadSource::Defaulted(err) => Some(err.to_string()),
            _ => None,
        };

        Self {
            path: path.display().to_string(),
            len_bytes: bytes.len(),
            sniffed_version,
            source: source_name(&report.source),
            loaded_from: loaded_from(&report.source).map(|version| version.to_string()),
            error,
            current_version: SchemaVersion::CURRENT.0,
            active_profile_id: report
                .state
                .active_profile_id
                .as_ref()
                .map(ToString::to_string),
            profiles: profile_summaries(&report.state),
        }
    }
}

fn profile_summaries(state: &SavedState) -> Vec<ProfileSummary> {
    state
        .profile_data
        .iter()
        .map(|(id, data)| ProfileSummary {
            id: id.to_string(),
            auth: data.auth.as_ref().and_then(|auth| auth.kind_name()),
            has_preferences: data.preferences.is_some(),
            active: state.active_profile_id.as_ref() == Some(id),
        })
        .collect()
}
