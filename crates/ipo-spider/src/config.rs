use chrono_tz::Tz;
use std::time::Duration;

pub const DEFAULT_CALENDAR_URL: &str = "https://stockanalysis.com/ipos/calendar/";
pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 465;
pub const DAYS_AHEAD: u32 = 7;
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Everything a single run needs, resolved once at start-up and handed to each stage.
#[derive(Clone)]
pub struct Config {
    // Mail
    pub sender: String,
    pub app_password: String,
    pub recipient: String,
    pub smtp_host: String,
    pub smtp_port: u16,

    // Calendar
    pub calendar_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,

    // Window
    pub timezone: Tz,
    pub days_ahead: u32,
}

impl Config {
    /// Build a config with explicit credentials; every other field takes its default.
    pub fn new(
        sender: impl Into<String>,
        app_password: impl Into<String>,
        recipient: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            sender: sender.into(),
            app_password: app_password.into(),
            recipient: recipient.into(),
            smtp_host: SMTP_HOST.to_string(),
            smtp_port: SMTP_PORT,
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout: HTTP_TIMEOUT,
            timezone,
            days_ahead: DAYS_AHEAD,
        }
    }

    /// Read the config from the process environment, after loading any `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Read the config through `lookup`, which maps a variable name to its value.
    ///
    /// `GMAIL_USER`, `GMAIL_PASS` and `RECIPIENT` are required; blank values count as missing.
    /// `TIMEZONE`, `CALENDAR_URL` and `USER_AGENT` fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };
        let required =
            |key: &str| value(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let sender = required("GMAIL_USER")?;
        let app_password = required("GMAIL_PASS")?;
        let recipient = required("RECIPIENT")?;

        let timezone = value("TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
            .parse::<Tz>()
            .map_err(|err| ConfigError::InvalidEnvVar("TIMEZONE".to_string(), err.to_string()))?;

        let mut config = Self::new(sender, app_password, recipient, timezone);
        if let Some(url) = value("CALENDAR_URL") {
            config.calendar_url = url;
        }
        if let Some(user_agent) = value("USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

// the app password never reaches the logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("sender", &self.sender)
            .field("app_password", &mask_secret(&self.app_password, 2, 2))
            .field("recipient", &self.recipient)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("calendar_url", &self.calendar_url)
            .field("user_agent", &self.user_agent)
            .field("http_timeout", &self.http_timeout)
            .field("timezone", &self.timezone)
            .field("days_ahead", &self.days_ahead)
            .finish()
    }
}

fn mask_secret(s: &str, left: usize, right: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= left + right {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..left].iter().collect();
    let tail: String = chars[chars.len() - right..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - left - right))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = Config::from_lookup(lookup(&[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_PASS", "abcd efgh ijkl mnop"),
            ("RECIPIENT", "inbox@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.calendar_url, DEFAULT_CALENDAR_URL);
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 465);
        assert_eq!(config.days_ahead, 7);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_PASS", "secret"),
            ("RECIPIENT", "inbox@example.com"),
            ("TIMEZONE", "Europe/London"),
            ("CALENDAR_URL", "http://localhost:8080/calendar"),
        ]))
        .unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.calendar_url, "http://localhost:8080/calendar");
    }

    #[test]
    fn blank_required_value_is_missing() {
        let err = Config::from_lookup(lookup(&[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_PASS", "   "),
            ("RECIPIENT", "inbox@example.com"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "GMAIL_PASS"));
    }

    #[test]
    fn unknown_timezone_is_invalid() {
        let err = Config::from_lookup(lookup(&[
            ("GMAIL_USER", "sender@gmail.com"),
            ("GMAIL_PASS", "secret"),
            ("RECIPIENT", "inbox@example.com"),
            ("TIMEZONE", "Mars/Olympus_Mons"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "TIMEZONE"));
    }

    #[test]
    fn debug_masks_app_password() {
        let config = Config::new(
            "sender@gmail.com",
            "abcdefghijkl",
            "inbox@example.com",
            chrono_tz::UTC,
        );
        let debug = format!("{config:?}");

        assert!(!debug.contains("abcdefghijkl"));
        assert!(debug.contains("ab********kl"));
    }
}
