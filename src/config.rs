use std::env;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Runtime configuration for the HTTP listener and the completions client.
/// Values are sourced from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub completions_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            completions_url: DEFAULT_COMPLETIONS_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("readme-gpt/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - READMEGPT_HOST (default: 127.0.0.1)
    /// - READMEGPT_PORT (default: 8080)
    /// - OPENAI_API_URL (default: https://api.openai.com/v1/chat/completions)
    /// - READMEGPT_USER_AGENT (default: readme-gpt/<version>)
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let host = env::var("READMEGPT_HOST").unwrap_or(defaults.host);
        let port = match env::var("READMEGPT_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid READMEGPT_PORT {:?}: {}", raw, e))?,
            Err(_) => defaults.port,
        };
        let completions_url = env::var("OPENAI_API_URL").unwrap_or(defaults.completions_url);
        url::Url::parse(&completions_url)
            .map_err(|e| format!("Invalid OPENAI_API_URL {:?}: {}", completions_url, e))?;
        let user_agent = env::var("READMEGPT_USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            host,
            port,
            completions_url,
            user_agent,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(h) = host {
            self.host = h;
        }
        if let Some(p) = port {
            self.port = p;
        }
        self
    }
}
