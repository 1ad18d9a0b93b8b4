use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use llm_client::{ClientConfig, Url};
use std::fmt::Debug;
use std::time::Duration;

#[derive(Parser)]
#[clap(about = "Relays chat messages to an upstream LLM endpoint")]
pub struct Args {
    #[clap(short, long, default_value = "0.0.0.0:8000")]
    pub address: String,
    /// Upstream chat-completion URL
    #[clap(long, env = "AGENT_ENDPOINT")]
    pub agent_endpoint: Url,
    /// Bearer credential for the upstream call
    #[clap(long, env = "DATABRICKS_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub databricks_token: String,
    /// Upstream call timeout; no timeout when unset
    #[clap(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("address", &self.address)
            .field("agent_endpoint", &self.agent_endpoint.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.agent_endpoint.clone(), self.databricks_token.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}
