//! Client side of the external agent execution service.
//!
//! The service runs a named prompt template (`slash_command`) with a model and returns whether
//! the run succeeded plus its textual output. [`AgentExecutor`] is the seam the test generator
//! depends on; [`HttpAgentExecutor`] is the production implementation.

mod http;

pub use http::HttpAgentExecutor;

use crate::error::AgentError;
use async_trait::async_trait;
use nlsql_schema::{AgentTemplateRequest, AgentTemplateResponse};

/// Result of an agent run that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Succeeded { output: String },
    Failed { reason: String },
}

impl AgentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Succeeded { .. })
    }
}

impl From<AgentTemplateResponse> for AgentOutcome {
    fn from(resp: AgentTemplateResponse) -> Self {
        if resp.success {
            AgentOutcome::Succeeded {
                output: resp.output,
            }
        } else {
            AgentOutcome::Failed {
                reason: resp.output,
            }
        }
    }
}

#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Runs one agent template to completion.
    ///
    /// `Err` means the service could not be reached or answered garbage; an agent that ran and
    /// failed is `Ok(AgentOutcome::Failed { .. })`.
    async fn execute(&self, request: &AgentTemplateRequest) -> Result<AgentOutcome, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_response_maps_to_tagged_outcome() {
        let ok: AgentOutcome = AgentTemplateResponse {
            success: true,
            output: "[]".to_string(),
        }
        .into();
        assert_eq!(
            ok,
            AgentOutcome::Succeeded {
                output: "[]".to_string()
            }
        );

        let failed: AgentOutcome = AgentTemplateResponse {
            success: false,
            output: "model overloaded".to_string(),
        }
        .into();
        assert!(!failed.is_success());
        assert_eq!(
            failed,
            AgentOutcome::Failed {
                reason: "model overloaded".to_string()
            }
        );
    }
}
