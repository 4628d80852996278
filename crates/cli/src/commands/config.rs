use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use haggle_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let file = config_file_doc.as_ref();
    let path = config_file_path.as_deref();

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        field_source("server.bind_address", Some("HAGGLE_SERVER_BIND_ADDRESS"), file, path),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        field_source("server.port", Some("HAGGLE_SERVER_PORT"), file, path),
    ));

    lines.push(render_line(
        "negotiation.threshold",
        &config.negotiation.threshold.to_string(),
        field_source("negotiation.threshold", Some("HAGGLE_NEGOTIATION_THRESHOLD"), file, path),
    ));
    lines.push(render_line(
        "negotiation.discount_min",
        &config.negotiation.discount_min.to_string(),
        field_source(
            "negotiation.discount_min",
            Some("HAGGLE_NEGOTIATION_DISCOUNT_MIN"),
            file,
            path,
        ),
    ));
    lines.push(render_line(
        "negotiation.discount_max",
        &config.negotiation.discount_max.to_string(),
        field_source(
            "negotiation.discount_max",
            Some("HAGGLE_NEGOTIATION_DISCOUNT_MAX"),
            file,
            path,
        ),
    ));
    lines.push(render_line(
        "negotiation.top_k",
        &config.negotiation.top_k.to_string(),
        field_source("negotiation.top_k", Some("HAGGLE_NEGOTIATION_TOP_K"), file, path),
    ));

    lines.push(render_line(
        "voice.enabled",
        &config.voice.enabled.to_string(),
        field_source("voice.enabled", Some("HAGGLE_VOICE_ENABLED"), file, path),
    ));
    let api_key = config
        .voice
        .api_key
        .as_ref()
        .map(|key| redact_token(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "voice.api_key",
        &api_key,
        field_source("voice.api_key", Some("HAGGLE_VOICE_API_KEY"), file, path),
    ));
    lines.push(render_line(
        "voice.base_url",
        &config.voice.base_url,
        field_source("voice.base_url", Some("HAGGLE_VOICE_BASE_URL"), file, path),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", Some("HAGGLE_LOGGING_LEVEL"), file, path),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source("logging.format", Some("HAGGLE_LOGGING_FORMAT"), file, path),
    ));

    let catalog_source = if config.sellers.is_some() { "file" } else { "default" };
    lines.push(render_line(
        "sellers",
        &format!("{} entries", config.catalog().len()),
        catalog_source,
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("  {key} = {value}  (source: {source})")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("haggle.toml"), PathBuf::from("config/haggle.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key: &str,
    env_var: Option<&str>,
    file_doc: Option<&Value>,
    _file_path: Option<&Path>,
) -> &'static str {
    if let Some(var) = env_var {
        if env::var(var).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return "env";
        }
    }

    if let Some(doc) = file_doc {
        let mut cursor = doc;
        let mut found = true;
        for part in key.split('.') {
            match cursor.get(part) {
                Some(next) => cursor = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            return "file";
        }
    }

    "default"
}

fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}

#[cfg(test)]
mod tests {
    use super::redact_token;

    #[test]
    fn redaction_keeps_only_the_prefix() {
        assert_eq!(redact_token("omni-abc123secret"), "omni-***");
        assert_eq!(redact_token("nodashes"), "<redacted>");
        assert_eq!(redact_token("   "), "<empty>");
    }
}
