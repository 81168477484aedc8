use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::leave::LeavePolicy;

const MAX_DEFAULT_ALLOTMENT: u32 = 366;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub leave: LeaveConfig,
    pub seed: SeedConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LeaveConfig {
    /// Days granted to employees without a ledger entry. Zero disables the default.
    pub default_allotment: u32,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub name: String,
    pub instructions: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub seed_enabled: Option<bool>,
    pub leave_default_allotment: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            leave: LeaveConfig { default_allotment: 20 },
            seed: SeedConfig { enabled: true },
            server: ServerConfig {
                name: "hrdesk-mcp".to_string(),
                instructions: Some(
                    "HR assistant tools: employee directory lookups, leave balances and \
                     applications, equipment tickets, and meeting scheduling."
                        .to_string(),
                ),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("hrdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn leave_policy(&self) -> LeavePolicy {
        match self.leave.default_allotment {
            0 => LeavePolicy::strict(),
            days => LeavePolicy::with_default_allotment(days),
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(leave) = patch.leave {
            if let Some(default_allotment) = leave.default_allotment {
                self.leave.default_allotment = default_allotment;
            }
        }

        if let Some(seed) = patch.seed {
            if let Some(enabled) = seed.enabled {
                self.seed.enabled = enabled;
            }
        }

        if let Some(server) = patch.server {
            if let Some(name) = server.name {
                self.server.name = name;
            }
            if let Some(instructions) = server.instructions {
                self.server.instructions = Some(instructions).filter(|text| !text.trim().is_empty());
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("HRDESK_LEAVE_DEFAULT_ALLOTMENT") {
            self.leave.default_allotment = parse_u32("HRDESK_LEAVE_DEFAULT_ALLOTMENT", &value)?;
        }

        if let Some(value) = read_env("HRDESK_SEED_ENABLED") {
            self.seed.enabled = parse_bool("HRDESK_SEED_ENABLED", &value)?;
        }

        if let Some(value) = read_env("HRDESK_SERVER_NAME") {
            self.server.name = value;
        }

        let log_level = read_env("HRDESK_LOGGING_LEVEL").or_else(|| read_env("HRDESK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("HRDESK_LOGGING_FORMAT").or_else(|| read_env("HRDESK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(seed_enabled) = overrides.seed_enabled {
            self.seed.enabled = seed_enabled;
        }
        if let Some(default_allotment) = overrides.leave_default_allotment {
            self.leave.default_allotment = default_allotment;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_leave(&self.leave)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("hrdesk.toml"), PathBuf::from("config/hrdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_leave(leave: &LeaveConfig) -> Result<(), ConfigError> {
    if leave.default_allotment > MAX_DEFAULT_ALLOTMENT {
        return Err(ConfigError::Validation(format!(
            "leave.default_allotment must be in range 0..={MAX_DEFAULT_ALLOTMENT}"
        )));
    }
    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.name.trim().is_empty() {
        return Err(ConfigError::Validation("server.name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    leave: Option<LeavePatch>,
    seed: Option<SeedPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LeavePatch {
    default_allotment: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct SeedPatch {
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    name: Option<String>,
    instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
