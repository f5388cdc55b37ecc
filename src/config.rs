use std::str::FromStr;

use anyhow::{bail, Context};

pub const DEFAULT_MOCK_ORIGINS: [&str; 3] = [
    "http://localhost:3004",
    "http://localhost:5173",
    "http://localhost:5174",
];

/// Which of the two HTTP services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    Analysis,
    Mock,
}

impl FromStr for ServiceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analysis" => Ok(Self::Analysis),
            "mock" => Ok(Self::Mock),
            other => bail!("unknown SERVICE_MODE {:?} (expected \"analysis\" or \"mock\")", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub allowed_origins: Vec<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: ServiceMode,
    pub host: String,
    pub port: u16,
    pub openai: OpenAiConfig,
    pub mock: MockConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match var("SERVICE_MODE") {
            Some(v) => v.parse()?,
            None => ServiceMode::Analysis,
        };

        let openai = OpenAiConfig {
            api_key: var("OPENAI_API_KEY"),
            base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.piapi.ai/v1".into())
                .trim_end_matches('/')
                .to_string(),
            model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".into()),
            max_tokens: parse_or(var("OPENAI_MAX_TOKENS"), "OPENAI_MAX_TOKENS", 1000)?,
            temperature: parse_or(var("OPENAI_TEMPERATURE"), "OPENAI_TEMPERATURE", 0.1)?,
        };

        let allowed_origins = match var("MOCK_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_MOCK_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        let seed = var("MOCK_SEED")
            .map(|v| v.parse::<u64>().context("MOCK_SEED must be an unsigned integer"))
            .transpose()?;

        Ok(Self {
            mode,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(var("APP_PORT"), "APP_PORT", 8000)?,
            openai,
            mock: MockConfig {
                allowed_origins,
                seed,
            },
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, v)),
        None => Ok(default),
    }
}
