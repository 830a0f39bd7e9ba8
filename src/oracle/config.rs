use crate::constants::{DEFAULT_ORACLE_MAX_TOKENS, DEFAULT_ORACLE_TEMPERATURE};

/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";
/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Oracle backend selection.
pub enum OracleProvider {
    #[default]
    Anthropic,
    OpenAi,
    /// Every call fails with [`OracleError::Unsupported`](super::OracleError::Unsupported).
    Disabled,
}

impl OracleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Disabled => "disabled",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            Self::OpenAi => DEFAULT_OPENAI_MODEL,
            Self::Disabled => "",
        }
    }
}

impl std::str::FromStr for OracleProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            _ => Err(format!("Unknown oracle provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Oracle backend configuration.
pub struct OracleConfig {
    pub provider: OracleProvider,
    /// Explicit model name; `None` uses the provider default.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::default(),
            model: None,
            temperature: DEFAULT_ORACLE_TEMPERATURE,
            max_tokens: DEFAULT_ORACLE_MAX_TOKENS,
        }
    }
}

impl OracleConfig {
    pub fn disabled() -> Self {
        Self::default().with_provider(OracleProvider::Disabled)
    }

    pub fn with_provider(mut self, provider: OracleProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Resolved model name.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}
