use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    practicum: PracticumSettings,
    telegram: TelegramSettings,
    poller: PollerSettings,
    http: HttpSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct PracticumSettings {
    pub(crate) token: String,
    pub(crate) endpoint: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TelegramSettings {
    pub(crate) token: String,
    pub(crate) chat_id: String,
    pub(crate) api_base: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PollerSettings {
    pub(crate) retry_period_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpSettings {
    pub(crate) timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
    pub(crate) prometheus_addr: SocketAddr,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required secret for {0}")]
    MissingSecret(&'static str),
}

impl Settings {
    pub(crate) fn load(telemetry: TelemetrySettings) -> Result<Self, ConfigError> {
        let practicum_token = env_or_default("PRACTICUM_TOKEN", "");
        let telegram_token = env_or_default("TELEGRAM_TOKEN", "");
        let telegram_chat_id = env_or_default("TELEGRAM_CHAT_ID", "");

        let endpoint = env_or_default("PRACTICUM_ENDPOINT", DEFAULT_PRACTICUM_ENDPOINT);
        let api_base = env_or_default("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let retry_period_seconds =
            parse_u64("RETRY_PERIOD_SECONDS", env_or_default("RETRY_PERIOD_SECONDS", "600"))?;
        let timeout_seconds =
            parse_u64("HTTP_TIMEOUT_SECONDS", env_or_default("HTTP_TIMEOUT_SECONDS", "30"))?;

        let settings = Self {
            practicum: PracticumSettings { token: practicum_token, endpoint },
            telegram: TelegramSettings {
                token: telegram_token,
                chat_id: telegram_chat_id,
                api_base,
            },
            poller: PollerSettings { retry_period_seconds },
            http: HttpSettings { timeout_seconds },
            telemetry,
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn practicum(&self) -> &PracticumSettings {
        &self.practicum
    }

    pub(crate) fn telegram(&self) -> &TelegramSettings {
        &self.telegram
    }

    pub(crate) fn poller(&self) -> &PollerSettings {
        &self.poller
    }

    pub(crate) fn http(&self) -> &HttpSettings {
        &self.http
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !check_tokens(&self.practicum.token, &self.telegram.token, &self.telegram.chat_id) {
            let missing = [
                ("PRACTICUM_TOKEN", &self.practicum.token),
                ("TELEGRAM_TOKEN", &self.telegram.token),
                ("TELEGRAM_CHAT_ID", &self.telegram.chat_id),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .unwrap_or("PRACTICUM_TOKEN");
            return Err(ConfigError::MissingSecret(missing));
        }

        if self.poller.retry_period_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "RETRY_PERIOD_SECONDS",
                value: String::from("0"),
            });
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "HTTP_TIMEOUT_SECONDS",
                value: String::from("0"),
            });
        }

        Ok(())
    }
}

impl TelemetrySettings {
    /// Loaded on its own so tracing is up before the secrets are checked.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let log_level = env_or_default("BOT_LOG_LEVEL", "info");
        let json = env_optional("BOT_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_addr =
            parse_addr("PROMETHEUS_ADDR", env_or_default("PROMETHEUS_ADDR", "127.0.0.1:9000"))?;

        Ok(Self { log_level, json, prometheus_enabled, prometheus_addr })
    }
}

impl PollerSettings {
    pub(crate) fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_seconds)
    }
}

impl HttpSettings {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Returns true only when every credential is present and non-blank.
pub(crate) fn check_tokens(practicum_token: &str, telegram_token: &str, chat_id: &str) -> bool {
    [practicum_token, telegram_token, chat_id].iter().all(|value| !value.trim().is_empty())
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_addr(field: &'static str, value: String) -> Result<SocketAddr, ConfigError> {
    value.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}
