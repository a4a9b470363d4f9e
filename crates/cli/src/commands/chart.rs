use std::path::Path;

use nutrafuel_core::charts::{bar_heights, chart_for_agent, export_json, write_export, ChartPayload};
use nutrafuel_core::domain::agent::{AgentId, AgentTier};
use nutrafuel_core::errors::{ApplicationError, InterfaceError};

use crate::commands::{CommandResult, EXIT_IO, EXIT_UNKNOWN_AGENT};

const BAR_WIDTH: f64 = 40.0;

pub fn run(agent: &str, query: &str, export: Option<&Path>, json_output: bool) -> CommandResult {
    let agent_id = AgentId::parse(agent);
    if agent_id.tier() != Some(AgentTier::Backend) {
        let error = InterfaceError::from(ApplicationError::UnknownAgent {
            agent: agent.to_string(),
            tier: Some(AgentTier::Backend),
        });
        return CommandResult::failure(
            "chart",
            "unknown_agent",
            error.detail(),
            EXIT_UNKNOWN_AGENT,
        );
    }

    let payload = chart_for_agent(&agent_id, query);

    if let Some(directory) = export {
        return match write_export(&payload, directory) {
            Ok(path) => CommandResult::success(
                "chart",
                format!("exported `{}` to {}", payload.title, path.display()),
            ),
            Err(error) => CommandResult::failure("chart", "export", error.to_string(), EXIT_IO),
        };
    }

    if json_output {
        return match export_json(&payload) {
            Ok(body) => CommandResult::text(body),
            Err(error) => CommandResult::failure("chart", "export", error.to_string(), EXIT_IO),
        };
    }

    CommandResult::text(render_text(&payload))
}

/// Text rendering: one bar per label for series charts, a retention table for cohorts.
fn render_text(payload: &ChartPayload) -> String {
    let mut lines = vec![payload.title.clone()];

    if let Some(cohorts) = payload.cohort_data() {
        let header = cohorts.time_labels.join(" ");
        lines.push(format!("{:<10} {:>8}  {header}", "cohort", "signups"));
        for cohort in &cohorts.cohorts {
            let retention: Vec<String> =
                cohort.retention.iter().map(|value| format!("{value:>3}%")).collect();
            let retention = retention.join(" ");
            lines.push(format!("{:<10} {:>8}  {retention}", cohort.month, cohort.signups));
        }
    }

    if let Some(series) = payload.series_data() {
        let width = series.labels.iter().map(String::len).max().unwrap_or(0);
        for dataset in &series.datasets {
            lines.push(String::new());
            lines.push(format!("{}:", dataset.label));
            let values = dataset.values();
            for ((label, value), height) in
                series.labels.iter().zip(&values).zip(bar_heights(&values, BAR_WIDTH))
            {
                let bar = "#".repeat(height.round() as usize);
                lines.push(format!("  {label:<width$} | {bar} {value}"));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::run;

    #[test]
    fn storefront_agents_have_no_charts() {
        let result = run("rachel_nutrition", "", None, false);
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(result.exit_code, 3);
        assert_eq!(payload["error_class"], "unknown_agent");
        assert_eq!(payload["message"], "Backend agent 'rachel_nutrition' not found");
    }

    #[test]
    fn cohort_chart_renders_retention_table() {
        let result = run("customer_experience", "Q3 cohorts", None, false);

        assert_eq!(result.exit_code, 0);
        let mut lines = result.output.lines();
        assert_eq!(lines.next(), Some("Q3 2025 Subscription Cohort Analysis"));
        // header plus ten cohorts
        assert_eq!(lines.count(), 11);
    }

    #[test]
    fn series_chart_draws_full_width_bar_for_peak() {
        let result = run("sales_optimizer", "", None, false);

        assert_eq!(result.exit_code, 0);
        let full_bar = "#".repeat(40);
        assert!(result.output.lines().any(|line| line.contains(&format!("| {full_bar} "))));
    }

    #[test]
    fn json_output_is_the_chart_payload() {
        let result = run("customer_experience", "", None, true);
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(payload["title"], "Customer Retention Analysis");
        assert_eq!(payload["data"]["cohorts"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempdir().expect("tempdir");
        let result = run("customer_experience", "cohort", Some(dir.path()), false);
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(result.exit_code, 0);
        assert_eq!(payload["status"], "ok");
        assert!(dir.path().join("Q3_2025_Subscription_Cohort_Analysis_data.json").exists());
    }
}
