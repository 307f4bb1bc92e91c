use serde::{Deserialize, Serialize};

/// Request sent to the agent execution service.
///
/// `slash_command` names a prompt template on the agent side; `args` are substituted into it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentTemplateRequest {
    pub agent_name: String,
    pub slash_command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub run_id: String,
    pub model: String,
}

/// Raw response of the agent execution service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgentTemplateResponse {
    pub success: bool,
    #[serde(default)]
    pub output: String,
}
