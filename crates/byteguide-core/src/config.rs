use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let directory_url = or_default("BYTEGUIDE_DIRECTORY_URL", "https://www.moaapi.net/tenants.php");
    let directory_timeout_secs = parse_u64("BYTEGUIDE_DIRECTORY_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("BYTEGUIDE_USER_AGENT", "byteguide/0.1 (mall-directory)");
    let log_level = or_default("BYTEGUIDE_LOG_LEVEL", "info");

    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let openai_base_url = or_default("BYTEGUIDE_OPENAI_BASE_URL", "https://api.openai.com");
    let model = or_default("BYTEGUIDE_MODEL", "gpt-4o-mini");

    let temperature = parse_f32("BYTEGUIDE_TEMPERATURE", "0.7")?;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BYTEGUIDE_TEMPERATURE".to_string(),
            reason: format!("must be between 0.0 and 2.0, got {temperature}"),
        });
    }

    let max_tool_steps = parse_usize("BYTEGUIDE_MAX_TOOL_STEPS", "8")?;
    if max_tool_steps == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BYTEGUIDE_MAX_TOOL_STEPS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        directory_url,
        directory_timeout_secs,
        user_agent,
        log_level,
        openai_api_key,
        openai_base_url,
        model,
        temperature,
        max_tool_steps,
    })
}
