use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub directory_url: String,
    pub directory_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tool_steps: usize,
}

impl AppConfig {
    /// API key for the OpenAI-compatible endpoint.
    ///
    /// Directory lookups run without credentials; only the conversational
    /// commands need this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` was not set.
    pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("directory_url", &self.directory_url)
            .field("directory_timeout_secs", &self.directory_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tool_steps", &self.max_tool_steps)
            .finish()
    }
}
