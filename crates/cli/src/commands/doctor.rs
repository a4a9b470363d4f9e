use std::time::Duration;

use nutrafuel_core::config::{AppConfig, LoadOptions};
use nutrafuel_core::domain::agent::{AgentId, AgentProfile};
use nutrafuel_core::landing::generate_landing_page;
use nutrafuel_core::routing::route;
use serde::Serialize;

use crate::commands::{CommandResult, EXIT_CONFIG};

const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_CONFIG };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report() -> DoctorReport {
    let mut checks = vec![check_agent_directory(), check_landing_template()];

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.insert(
                0,
                DoctorCheck {
                    name: "config_validation",
                    status: CheckStatus::Pass,
                    details: "configuration loaded and validated".to_string(),
                },
            );
            checks.push(check_backend_reachability(&config));
        }
        Err(error) => {
            checks.insert(
                0,
                DoctorCheck {
                    name: "config_validation",
                    status: CheckStatus::Fail,
                    details: error.to_string(),
                },
            );
            checks.push(DoctorCheck {
                name: "backend_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_agent_directory() -> DoctorCheck {
    let missing: Vec<String> = AgentId::all_known()
        .filter(|agent| {
            AgentProfile::lookup(agent).is_none() || route(agent, "hello").text.trim().is_empty()
        })
        .map(|agent| agent.to_string())
        .collect();

    if missing.is_empty() {
        DoctorCheck {
            name: "agent_directory",
            status: CheckStatus::Pass,
            details: format!(
                "{} agents answer from the local router",
                AgentId::all_known().count()
            ),
        }
    } else {
        DoctorCheck {
            name: "agent_directory",
            status: CheckStatus::Fail,
            details: format!("agents without a profile or reply: {}", missing.join(", ")),
        }
    }
}

fn check_landing_template() -> DoctorCheck {
    match generate_landing_page("doctor preview") {
        Ok(html) => DoctorCheck {
            name: "landing_template",
            status: CheckStatus::Pass,
            details: format!("rendered {} bytes", html.len()),
        },
        Err(error) => DoctorCheck {
            name: "landing_template",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_backend_reachability(config: &AppConfig) -> DoctorCheck {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "backend_reachability",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    let url = format!("{}/health", config.backend.base_url.trim_end_matches('/'));
    let result = runtime.block_on(async {
        let response = reqwest::Client::new()
            .get(&url)
            .timeout(REACHABILITY_TIMEOUT)
            .send()
            .await
            .map_err(|error| format!("failed to reach `{url}`: {error}"))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("`{url}` answered with status {}", response.status().as_u16()))
        }
    });

    match result {
        Ok(()) => DoctorCheck {
            name: "backend_reachability",
            status: CheckStatus::Pass,
            details: format!("`{url}` is healthy"),
        },
        Err(error) => {
            DoctorCheck { name: "backend_reachability", status: CheckStatus::Fail, details: error }
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
