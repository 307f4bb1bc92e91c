use serde::{Deserialize, Serialize};
use url::Url;

/// Agent execution service configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Endpoint accepting `POST` of an agent template request.
    /// TOML: `agent.endpoint`. Default: `http://127.0.0.1:8765/v1/agent/execute`.
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,

    /// Optional upstream HTTP proxy. If set, used for the reqwest client.
    /// TOML: `agent.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Whole-request timeout for a single agent call. Agent runs are slow; keep this generous.
    /// TOML: `agent.timeout_secs`. Default: `900`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Model used for the coverage analysis call.
    /// TOML: `agent.analyzer_model`. Default: `sonnet`.
    #[serde(default = "default_analyzer_model")]
    pub analyzer_model: String,

    /// Model used for each test generation call.
    /// TOML: `agent.generator_model`. Default: `opus`.
    #[serde(default = "default_generator_model")]
    pub generator_model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            analyzer_model: default_analyzer_model(),
            generator_model: default_generator_model(),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse("http://127.0.0.1:8765/v1/agent/execute").expect("valid default agent endpoint")
}

fn default_timeout_secs() -> u64 {
    900
}

fn default_analyzer_model() -> String {
    "sonnet".to_string()
}

fn default_generator_model() -> String {
    "opus".to_string()
}
