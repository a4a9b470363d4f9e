use std::time::Duration;

use async_trait::async_trait;
use nutrafuel_core::config::MockConfig;
use nutrafuel_core::routing::{route, Response};
use rand::Rng;

use crate::client::{AgentClient, AgentQuery};
use crate::error::QueryError;

/// Answers from the local response router after a human-feeling pause.
#[derive(Clone, Debug)]
pub struct MockAgentClient {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for MockAgentClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1500))
    }
}

impl MockAgentClient {
    /// A reversed range is treated as its normalised form.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        if min_delay <= max_delay {
            Self { min_delay, max_delay }
        } else {
            Self { min_delay: max_delay, max_delay: min_delay }
        }
    }

    pub fn from_config(config: &MockConfig) -> Self {
        let (min_delay, max_delay) = config.delay_range();
        Self::new(min_delay, max_delay)
    }

    /// No artificial delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn delay_range(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }
}

/// Picks a delay uniformly within `[min, max]`.
pub fn pick_delay(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let millis = rand::thread_rng().gen_range(min.as_millis()..=max.as_millis());
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Sleeps for a random duration within `[min, max]`.
pub async fn simulate_delay(min: Duration, max: Duration) -> Duration {
    let delay = pick_delay(min, max);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    delay
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn query(&self, request: &AgentQuery) -> Result<Response, QueryError> {
        let delay = simulate_delay(self.min_delay, self.max_delay).await;
        tracing::debug!(
            event_name = "agent.mock.replied",
            agent_id = %request.agent,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "mock agent replied"
        );
        Ok(route(&request.agent, &request.query))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nutrafuel_core::domain::agent::AgentId;
    use tokio_util::sync::CancellationToken;

    use super::{pick_delay, simulate_delay, MockAgentClient};
    use crate::client::{query_cancellable, AgentClient, AgentQuery, QueryOutcome};

    #[test]
    fn picked_delay_stays_in_range() {
        let min = Duration::from_millis(500);
        let max = Duration::from_millis(1500);
        for _ in 0..200 {
            let delay = pick_delay(min, max);
            assert!(delay >= min && delay <= max, "{delay:?}");
        }
    }

    #[test]
    fn reversed_range_is_normalised() {
        let client = MockAgentClient::new(Duration::from_millis(900), Duration::from_millis(100));
        assert_eq!(
            client.delay_range(),
            (Duration::from_millis(100), Duration::from_millis(900))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_delay_advances_clock() {
        let started = tokio::time::Instant::now();
        let delay = simulate_delay(Duration::from_millis(500), Duration::from_millis(1500)).await;

        assert!(started.elapsed() >= delay);
        assert!(delay >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn mock_client_answers_with_routed_template() {
        let client = MockAgentClient::default();
        let request =
            AgentQuery::new(AgentId::RachelNutrition, "give me a muscle building burn stack");

        let response = client.query(&request).await.expect("mock never fails");

        assert!(response.text.contains("FAT BURNING STACK"));
        assert_eq!(response.agent_id, AgentId::RachelNutrition);
    }

    #[tokio::test(start_paused = true)]
    async fn mock_client_can_be_cancelled_mid_delay() {
        let client = MockAgentClient::new(Duration::from_secs(5), Duration::from_secs(5));
        let request = AgentQuery::new(AgentId::CustomerService, "track my order");
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let outcome = query_cancellable(&client, &request, &cancel).await;
        assert!(matches!(outcome, QueryOutcome::Cancelled));
    }
}
