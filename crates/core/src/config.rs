use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog;
use crate::domain::seller::{Availability, Seller};
use crate::negotiation::engine::{
    NegotiationPolicy, DEFAULT_DISCOUNT_MAX, DEFAULT_DISCOUNT_MIN, DEFAULT_THRESHOLD,
};
use crate::negotiation::ranking::DEFAULT_TOP_K;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub negotiation: NegotiationConfig,
    pub voice: VoiceConfig,
    pub logging: LoggingConfig,
    pub sellers: Option<Vec<Seller>>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct NegotiationConfig {
    pub threshold: u32,
    pub discount_min: u32,
    pub discount_max: u32,
    pub top_k: usize,
}

#[derive(Clone, Debug)]
pub struct VoiceConfig {
    pub enabled: bool,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub webhook_url: Option<String>,
    pub email_recipients: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub voice_enabled: Option<bool>,
    pub voice_api_key: Option<String>,
    pub sellers: Option<Vec<Seller>>,
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
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 5000 },
            negotiation: NegotiationConfig {
                threshold: DEFAULT_THRESHOLD,
                discount_min: DEFAULT_DISCOUNT_MIN,
                discount_max: DEFAULT_DISCOUNT_MAX,
                top_k: DEFAULT_TOP_K,
            },
            voice: VoiceConfig {
                enabled: false,
                api_key: None,
                base_url: "https://backend.omnidim.io/api".to_string(),
                webhook_url: None,
                email_recipients: Vec::new(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            sellers: None,
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
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

impl NegotiationConfig {
    pub fn policy(&self) -> NegotiationPolicy {
        NegotiationPolicy {
            threshold: self.threshold,
            discount_min: self.discount_min,
            discount_max: self.discount_max,
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
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("haggle.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// The effective seller catalog: config-supplied list when present,
    /// otherwise the built-in demo fixture.
    pub fn catalog(&self) -> Vec<Seller> {
        self.sellers.clone().unwrap_or_else(catalog::demo_sellers)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(negotiation) = patch.negotiation {
            if let Some(threshold) = negotiation.threshold {
                self.negotiation.threshold = threshold;
            }
            if let Some(discount_min) = negotiation.discount_min {
                self.negotiation.discount_min = discount_min;
            }
            if let Some(discount_max) = negotiation.discount_max {
                self.negotiation.discount_max = discount_max;
            }
            if let Some(top_k) = negotiation.top_k {
                self.negotiation.top_k = top_k;
            }
        }

        if let Some(voice) = patch.voice {
            if let Some(enabled) = voice.enabled {
                self.voice.enabled = enabled;
            }
            if let Some(api_key_value) = voice.api_key {
                self.voice.api_key = Some(secret_value(api_key_value));
            }
            if let Some(base_url) = voice.base_url {
                self.voice.base_url = base_url;
            }
            if let Some(webhook_url) = voice.webhook_url {
                self.voice.webhook_url = Some(webhook_url);
            }
            if let Some(email_recipients) = voice.email_recipients {
                self.voice.email_recipients = email_recipients;
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

        if let Some(sellers) = patch.sellers {
            self.sellers = Some(sellers.into_iter().map(SellerPatch::into_seller).collect());
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("HAGGLE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("HAGGLE_SERVER_PORT") {
            self.server.port = parse_u16("HAGGLE_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("HAGGLE_NEGOTIATION_THRESHOLD") {
            self.negotiation.threshold = parse_u32("HAGGLE_NEGOTIATION_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("HAGGLE_NEGOTIATION_DISCOUNT_MIN") {
            self.negotiation.discount_min = parse_u32("HAGGLE_NEGOTIATION_DISCOUNT_MIN", &value)?;
        }
        if let Some(value) = read_env("HAGGLE_NEGOTIATION_DISCOUNT_MAX") {
            self.negotiation.discount_max = parse_u32("HAGGLE_NEGOTIATION_DISCOUNT_MAX", &value)?;
        }
        if let Some(value) = read_env("HAGGLE_NEGOTIATION_TOP_K") {
            self.negotiation.top_k =
                parse_u32("HAGGLE_NEGOTIATION_TOP_K", &value)? as usize;
        }

        if let Some(value) = read_env("HAGGLE_VOICE_ENABLED") {
            self.voice.enabled = parse_bool("HAGGLE_VOICE_ENABLED", &value)?;
        }
        if let Some(value) = read_env("HAGGLE_VOICE_API_KEY") {
            self.voice.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("HAGGLE_VOICE_BASE_URL") {
            self.voice.base_url = value;
        }
        if let Some(value) = read_env("HAGGLE_VOICE_WEBHOOK_URL") {
            self.voice.webhook_url = Some(value);
        }

        let log_level = read_env("HAGGLE_LOGGING_LEVEL").or_else(|| read_env("HAGGLE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("HAGGLE_LOGGING_FORMAT").or_else(|| read_env("HAGGLE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(voice_enabled) = overrides.voice_enabled {
            self.voice.enabled = voice_enabled;
        }
        if let Some(voice_api_key) = overrides.voice_api_key {
            self.voice.api_key = Some(secret_value(voice_api_key));
        }
        if let Some(sellers) = overrides.sellers {
            self.sellers = Some(sellers);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_negotiation(&self.negotiation)?;
        validate_voice(&self.voice)?;
        validate_logging(&self.logging)?;
        validate_sellers(self.sellers.as_deref())?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("haggle.toml"), PathBuf::from("config/haggle.toml")]
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

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation(
            "server.bind_address must not be empty".to_string(),
        ));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    Ok(())
}

fn validate_negotiation(negotiation: &NegotiationConfig) -> Result<(), ConfigError> {
    if negotiation.threshold == 0 {
        return Err(ConfigError::Validation(
            "negotiation.threshold must be greater than zero".to_string(),
        ));
    }

    if negotiation.discount_min == 0 {
        return Err(ConfigError::Validation(
            "negotiation.discount_min must be greater than zero".to_string(),
        ));
    }

    if negotiation.discount_min > negotiation.discount_max {
        return Err(ConfigError::Validation(
            "negotiation.discount_min must not exceed negotiation.discount_max".to_string(),
        ));
    }

    if negotiation.top_k == 0 {
        return Err(ConfigError::Validation(
            "negotiation.top_k must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_voice(voice: &VoiceConfig) -> Result<(), ConfigError> {
    if voice.enabled {
        let missing = voice
            .api_key
            .as_ref()
            .map(|value| value.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if missing {
            return Err(ConfigError::Validation(
                "voice.api_key is required when voice.enabled is true".to_string(),
            ));
        }
    }

    if !voice.base_url.starts_with("http://") && !voice.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "voice.base_url must start with http:// or https://".to_string(),
        ));
    }

    if let Some(webhook_url) = &voice.webhook_url {
        if !webhook_url.starts_with("http://") && !webhook_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "voice.webhook_url must start with http:// or https://".to_string(),
            ));
        }
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

fn validate_sellers(sellers: Option<&[Seller]>) -> Result<(), ConfigError> {
    let Some(sellers) = sellers else {
        return Ok(());
    };

    if sellers.is_empty() {
        return Err(ConfigError::Validation(
            "sellers must not be an empty list when configured".to_string(),
        ));
    }

    for seller in sellers {
        if seller.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sellers entries must have a non-empty name".to_string(),
            ));
        }
    }

    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    negotiation: Option<NegotiationPatch>,
    voice: Option<VoicePatch>,
    logging: Option<LoggingPatch>,
    sellers: Option<Vec<SellerPatch>>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct NegotiationPatch {
    threshold: Option<u32>,
    discount_min: Option<u32>,
    discount_max: Option<u32>,
    top_k: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct VoicePatch {
    enabled: Option<bool>,
    api_key: Option<String>,
    base_url: Option<String>,
    webhook_url: Option<String>,
    email_recipients: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[derive(Debug, Deserialize)]
struct SellerPatch {
    name: String,
    base_price: u32,
    delivery_days: u32,
    availability: Option<Availability>,
    contact_number: String,
}

impl SellerPatch {
    fn into_seller(self) -> Seller {
        Seller {
            name: self.name,
            base_price: self.base_price,
            delivery_days: self.delivery_days,
            availability: self.availability.unwrap_or(Availability::InStock),
            contact_number: self.contact_number,
        }
    }
}
