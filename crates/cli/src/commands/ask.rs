use std::sync::Arc;

use nutrafuel_agent::{AgentClient, ChatSession, HttpAgentClient, MockAgentClient, SendOutcome};
use nutrafuel_core::charts::ChartPayload;
use nutrafuel_core::config::{AppConfig, LoadOptions};
use nutrafuel_core::domain::agent::AgentId;
use nutrafuel_core::routing::{render_with_sentinels, Action};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::commands::{
    CommandResult, EXIT_CANCELLED, EXIT_CONFIG, EXIT_INVALID_INPUT, EXIT_QUERY_FAILED,
};

#[derive(Debug, Serialize)]
struct AskReport<'a> {
    command: &'static str,
    status: &'static str,
    agent: &'a str,
    response: &'a str,
    actions: &'a [Action],
    chart: Option<&'a ChartPayload>,
    landing_page: bool,
}

pub fn run(agent: &str, query: &str, remote: bool, json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "ask",
                "config_validation",
                error.to_string(),
                EXIT_CONFIG,
            )
        }
    };

    let client: Arc<dyn AgentClient> = if remote {
        Arc::new(HttpAgentClient::from_config(&config.backend))
    } else {
        Arc::new(MockAgentClient::from_config(&config.mock))
    };
    let session = ChatSession::open(client, AgentId::parse(agent))
        .with_retrieval_k(config.backend.retrieval_k);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "ask",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                EXIT_QUERY_FAILED,
            )
        }
    };

    runtime.block_on(ask(session, query, json_output))
}

async fn ask(mut session: ChatSession, query: &str, json_output: bool) -> CommandResult {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    eprintln!("{}", session.loading_message());
    let outcome = session.send(query, &cancel).await;
    watcher.abort();

    match outcome {
        SendOutcome::Replied => render_reply(&session, json_output),
        SendOutcome::Ignored => CommandResult::failure(
            "ask",
            "invalid_input",
            "query must not be blank",
            EXIT_INVALID_INPUT,
        ),
        SendOutcome::Cancelled => {
            CommandResult::failure("ask", "cancelled", "request cancelled", EXIT_CANCELLED)
        }
        SendOutcome::Failed(error) => {
            let message = session
                .transcript()
                .last()
                .map(|message| message.content.clone())
                .unwrap_or_else(|| error.user_message().to_string());
            CommandResult::failure("ask", error.error_class(), message, EXIT_QUERY_FAILED)
        }
    }
}

fn render_reply(session: &ChatSession, json_output: bool) -> CommandResult {
    let Some(reply) = session.transcript().last() else {
        return CommandResult::failure(
            "ask",
            "empty_reply",
            "no reply recorded",
            EXIT_QUERY_FAILED,
        );
    };

    if json_output {
        let report = AskReport {
            command: "ask",
            status: "ok",
            agent: session.agent().as_str(),
            response: &reply.content,
            actions: &reply.actions,
            chart: session.chart(),
            landing_page: session.landing_page().is_some(),
        };
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::text(output),
            Err(error) => CommandResult::failure(
                "ask",
                "serialization",
                error.to_string(),
                EXIT_QUERY_FAILED,
            ),
        };
    }

    let mut output = render_with_sentinels(&reply.content, &reply.actions);
    if let Some(chart) = session.chart() {
        let agent = session.agent();
        output.push_str(&format!("\n\nChart: {} (nutrafuel chart {agent})", chart.title));
    }
    CommandResult::text(output)
}

#[cfg(test)]
mod tests {
    use nutrafuel_agent::{ChatSession, MockAgentClient};
    use nutrafuel_core::domain::agent::AgentId;
    use serde_json::Value;
    use std::sync::Arc;

    use super::ask;

    fn session(agent: AgentId) -> ChatSession {
        ChatSession::open(Arc::new(MockAgentClient::instant()), agent)
    }

    #[tokio::test]
    async fn storefront_reply_is_plain_text() {
        let result =
            ask(session(AgentId::RachelNutrition), "muscle building burn stack", false).await;

        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("FAT BURNING STACK"));
        assert!(!result.output.contains("Chart:"));
    }

    #[tokio::test]
    async fn admin_reply_lists_actions_and_chart() {
        let result = ask(session(AgentId::FinancialReports), "compare quarters", false).await;

        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("[View Chart]"));
        assert!(result.output.contains("Chart: "));
    }

    #[tokio::test]
    async fn json_report_carries_chart_payload() {
        let result = ask(session(AgentId::CustomerExperience), "Q3 cohorts", true).await;
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["agent"], "customer_experience");
        assert_eq!(payload["actions"][0], "view_chart");
        assert_eq!(payload["chart"]["title"], "Q3 2025 Subscription Cohort Analysis");
        assert_eq!(payload["landing_page"], false);
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let result = ask(session(AgentId::CustomerService), "  ", false).await;
        let payload: Value = serde_json::from_str(&result.output).expect("json output");

        assert_eq!(result.exit_code, 1);
        assert_eq!(payload["error_class"], "invalid_input");
    }
}
