use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ChartPayload;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode chart `{title}`: {source}")]
    Encode {
        title: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write chart export {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Download name for a chart: whitespace runs become `_`, suffixed with `_data.json`.
pub fn export_filename(payload: &ChartPayload) -> String {
    let mut name = String::with_capacity(payload.title.len() + 10);
    let mut in_whitespace = false;
    for ch in payload.title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(ch);
            in_whitespace = false;
        }
    }
    name.push_str("_data.json");
    name
}

/// Pretty-printed JSON body, two-space indented.
pub fn export_json(payload: &ChartPayload) -> Result<String, ExportError> {
    serde_json::to_string_pretty(payload)
        .map_err(|source| ExportError::Encode { title: payload.title.clone(), source })
}

pub fn write_export(payload: &ChartPayload, directory: &Path) -> Result<PathBuf, ExportError> {
    let body = export_json(payload)?;
    let path = directory.join(export_filename(payload));
    std::fs::write(&path, body)
        .map_err(|source| ExportError::Write { path: path.clone(), source })?;
    tracing::info!(
        event_name = "charts.export.written",
        title = %payload.title,
        path = %path.display(),
        "chart export written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{export_filename, export_json, write_export, ExportError};
    use crate::charts::chart_for_agent;
    use crate::domain::agent::AgentId;

    #[test]
    fn filename_collapses_whitespace_runs() {
        let mut chart = chart_for_agent(&AgentId::CustomerExperience, "");
        assert_eq!(export_filename(&chart), "Customer_Retention_Analysis_data.json");

        chart.title = "Q3  2025\tCohorts".to_string();
        assert_eq!(export_filename(&chart), "Q3_2025_Cohorts_data.json");
    }

    #[test]
    fn export_json_is_pretty_printed_cohort_payload() {
        let chart = chart_for_agent(&AgentId::CustomerExperience, "cohort");
        let body = export_json(&chart).expect("encode");

        assert!(body.starts_with("{\n  \"type\": \"cohort\""));
        let value: serde_json::Value = serde_json::from_str(&body).expect("valid json");
        assert_eq!(value["type"], "cohort");
        assert_eq!(value["data"]["cohorts"].as_array().map(Vec::len), Some(10));
        assert_eq!(value["data"]["timeLabels"][0], "0");
    }

    #[test]
    fn write_export_lands_in_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let chart = chart_for_agent(&AgentId::FinancialReports, "");

        let path = write_export(&chart, dir.path()).expect("write");

        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("Revenue_Growth_Analysis_data.json")
        );
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, export_json(&chart).expect("encode"));
    }

    #[test]
    fn write_export_reports_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let chart = chart_for_agent(&AgentId::FinancialReports, "");

        let error = write_export(&chart, &dir.path().join("missing")).expect_err("should fail");
        assert!(matches!(error, ExportError::Write { .. }));
    }
}
