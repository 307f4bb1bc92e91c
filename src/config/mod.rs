mod agent;
mod basic;

pub use agent::AgentConfig;
pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Agent execution service used by the test generator (see `agent` table in config.toml).
    #[serde(default)]
    pub agent: AgentConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "NLSQL_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and `NLSQL_*`
    /// environment variables (nested keys separated by `__`, e.g. `NLSQL_BASIC__LISTEN_PORT`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from defaults, `config.toml` (if present) and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn load_or_panic() -> Self {
        Self::load().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + config.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load_or_panic);

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};

    #[test]
    fn defaults_point_at_local_database() {
        let cfg = Config::default();
        assert_eq!(cfg.basic.database_url, "sqlite://db/database.db");
        assert_eq!(cfg.basic.listen_port, 8000);
        assert_eq!(cfg.agent.analyzer_model, "sonnet");
        assert_eq!(cfg.agent.generator_model, "opus");
    }

    #[test]
    fn toml_overrides_nested_tables() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9001
                loglevel = "debug"

                [agent]
                endpoint = "http://agents.internal:7000/run"
                timeout_secs = 30
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(cfg.basic.listen_port, 9001);
        assert_eq!(cfg.basic.loglevel, "debug");
        assert_eq!(cfg.agent.endpoint.as_str(), "http://agents.internal:7000/run");
        assert_eq!(cfg.agent.timeout_secs, 30);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.agent.generator_model, "opus");
    }
}
