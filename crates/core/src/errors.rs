use thiserror::Error;

use crate::domain::agent::AgentTier;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("agent `{agent}` is not available")]
    UnknownAgent { agent: String, tier: Option<AgentTier> },
    #[error("rendering failure: {0}")]
    Rendering(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "The requested resource does not exist.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    /// Detail safe to return to callers. Not-found details name the missing agent and are
    /// kept; everything else is replaced by the generic user message.
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { message, .. } => message.clone(),
            other => other.user_message().to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::NotFound { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::UnknownAgent { agent, tier } => {
                let message = match tier {
                    Some(AgentTier::Frontend) => format!("Frontend agent '{agent}' not found"),
                    Some(AgentTier::Backend) => format!("Backend agent '{agent}' not found"),
                    None => format!("Agent '{agent}' not found"),
                };
                Self::NotFound { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Rendering(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::agent::AgentTier;
    use crate::errors::{ApplicationError, InterfaceError};

    #[test]
    fn unknown_frontend_agent_maps_to_not_found_with_tier_detail() {
        let interface = ApplicationError::UnknownAgent {
            agent: "sales_optimizer".to_owned(),
            tier: Some(AgentTier::Frontend),
        }
        .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::NotFound { ref correlation_id, .. } if correlation_id == "req-1"
        ));
        assert_eq!(interface.status_code(), 404);
        assert_eq!(interface.detail(), "Frontend agent 'sales_optimizer' not found");
    }

    #[test]
    fn unknown_agent_without_tier_uses_generic_detail() {
        let interface =
            ApplicationError::UnknownAgent { agent: "ghost".to_owned(), tier: None }
                .into_interface("req-2");

        assert_eq!(interface.detail(), "Agent 'ghost' not found");
    }

    #[test]
    fn rendering_error_maps_to_internal_and_hides_details() {
        let interface =
            ApplicationError::Rendering("template blew up".to_owned()).into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.correlation_id(), "req-4");
        assert_eq!(interface.detail(), "An unexpected internal error occurred.");
    }
}
