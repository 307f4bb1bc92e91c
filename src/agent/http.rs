use super::{AgentExecutor, AgentOutcome};
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::utils::logging::with_pretty_json_debug;
use async_trait::async_trait;
use nlsql_schema::{AgentTemplateRequest, AgentTemplateResponse};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

const AGENT_USER_AGENT: &str = concat!("nlsql/", env!("CARGO_PKG_VERSION"));

/// Posts agent template requests as JSON to a single endpoint. No retries: a failed call is
/// reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpAgentExecutor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAgentExecutor {
    pub fn new(cfg: &AgentConfig) -> Result<Self, AgentError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(AGENT_USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(cfg.timeout_secs));

        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        } else if is_loopback(&cfg.endpoint) {
            // A local agent service must not be routed through HTTP(S)_PROXY from the env.
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: cfg.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => false,
    }
}

#[async_trait]
impl AgentExecutor for HttpAgentExecutor {
    async fn execute(&self, request: &AgentTemplateRequest) -> Result<AgentOutcome, AgentError> {
        with_pretty_json_debug(request, |json| {
            debug!(agent = %request.agent_name, "agent request:\n{json}");
        });

        let start = Instant::now();
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(
            agent = %request.agent_name,
            command = %request.slash_command,
            status = status.as_u16(),
            took_ms = start.elapsed().as_millis() as u64,
            "agent call returned"
        );

        if !status.is_success() {
            return Err(AgentError::UpstreamStatus { status, body });
        }

        let parsed: AgentTemplateResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_loopback_endpoints() {
        for endpoint in [
            "http://127.0.0.1:8765/run",
            "http://localhost/run",
            "http://[::1]:9000/",
        ] {
            assert!(is_loopback(&Url::parse(endpoint).unwrap()), "{endpoint}");
        }
        assert!(!is_loopback(&Url::parse("https://agents.example.com/run").unwrap()));
    }
}
