use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Smtp,
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS (port 587)
    Starttls,
    /// Implicit TLS (port 465)
    Tls,
    /// Unencrypted, for local relays only
    #[serde(rename = "none")]
    Plain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_transport")]
    pub email_transport: TransportKind,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_smtp_security")]
    pub smtp_security: SmtpSecurity,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    #[serde(with = "humantime_serde", default = "default_smtp_timeout")]
    pub smtp_timeout: Duration,
    pub smtp_from_email: String,
    #[serde(default = "default_from_name")]
    pub smtp_from_name: String,

    #[serde(alias = "recipient_email")]
    pub recipient_emails: Vec<String>,

    #[serde(default)]
    pub brevo_api_key: Option<String>,
    #[serde(default = "default_brevo_api_url")]
    pub brevo_api_url: String,

    // Accepted so existing deployments keep loading; requests are not verified against it
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one recipient email must be configured")]
    NoRecipients,

    #[error("invalid email address '{address}' in {field}")]
    InvalidAddress { field: &'static str, address: String },

    #[error("{0} is required for the configured email transport")]
    MissingField(&'static str),
}

fn default_app_name() -> String {
    "BPO Acceptor Lead Service".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8001
}

const fn default_transport() -> TransportKind {
    TransportKind::Smtp
}

fn default_smtp_host() -> String {
    "smtp-relay.brevo.com".to_string()
}

const fn default_smtp_port() -> u16 {
    587
}

const fn default_smtp_security() -> SmtpSecurity {
    SmtpSecurity::Starttls
}

const fn default_smtp_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_from_name() -> String {
    "BPO Acceptor".to_string()
}

fn default_brevo_api_url() -> String {
    "https://api.brevo.com/v3".to_string()
}

impl Config {
    /// Checks the settings required by the selected transport and that every
    /// configured address parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recipient_emails.is_empty() {
            return Err(ConfigError::NoRecipients);
        }

        check_address("smtp_from_email", &self.smtp_from_email)?;
        for recipient in &self.recipient_emails {
            check_address("recipient_emails", recipient)?;
        }

        match self.email_transport {
            TransportKind::Smtp => {
                if self.smtp_username.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::MissingField("smtp_username"));
                }
                if self.smtp_password.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::MissingField("smtp_password"));
                }
            }
            TransportKind::Api => {
                if self.brevo_api_key.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::MissingField("brevo_api_key"));
                }
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn check_address(field: &'static str, address: &str) -> Result<(), ConfigError> {
    address
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidAddress {
            field,
            address: address.to_string(),
        })
}

const CONFIG_PATH_VAR: &str = "LEAD_SERVICE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const EXAMPLE_CONFIG_FILE: &str = "config.example.yaml";

impl Config {
    // Comma-separated env values keep the blanks around each entry
    fn normalized(mut self) -> Self {
        self.recipient_emails = self
            .recipient_emails
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }
}

/// Builds a config from `(NAME, value)` pairs, matching names case-insensitively
/// against the config keys.
pub fn from_vars<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(vars).map(Config::normalized)
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    Ok(config.normalized())
}

/// Loads the config from the file named by `LEAD_SERVICE_CONFIG`, then
/// `config.yaml`, then `config.example.yaml`, then the process environment.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_from(env::var(CONFIG_PATH_VAR).ok(), env::vars())
}

/// The first existing file wins; `vars` are only read when no file exists.
pub fn load_config_from<I>(
    config_path: Option<String>,
    vars: I,
) -> Result<Config, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config_path = config_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to '{DEFAULT_CONFIG_FILE}'",
            config_path
        );
        return load_from_file(DEFAULT_CONFIG_FILE);
    }

    // Fallback to config.example.yaml
    if Path::new(EXAMPLE_CONFIG_FILE).exists() {
        tracing::warn!(
            "Config file '{}' and '{DEFAULT_CONFIG_FILE}' not found, falling back to '{EXAMPLE_CONFIG_FILE}'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file(EXAMPLE_CONFIG_FILE);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match from_vars(vars) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', '{DEFAULT_CONFIG_FILE}', '{EXAMPLE_CONFIG_FILE}', and environment variables. \
             Error: {e}"
        )
        .into()),
    }
}
