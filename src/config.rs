//! Mail configuration
//!
//! Values are layered with `figment`, lowest priority first:
//!
//! 1. the defaults of [`Config::default`]
//! 2. a TOML file, ignored when missing
//! 3. environment variables
//!
//! | Variable            | Key                        |
//! |---------------------|----------------------------|
//! | `MANDRILL_URL`      | `mandrill.url`             |
//! | `MANDRILL_SECRET`   | `services.mandrill.secret` |
//! | `MAIL_FROM_ADDRESS` | `mail.from_address`        |
//! | `MAIL_FROM_NAME`    | `mail.from_name`           |
//! | `MAIL_MAILER`       | `mail.default`             |
//!
//! ```toml
//! [mail]
//! default = "mandrill"
//! from_address = "noreply@example.org"
//!
//! [mandrill]
//! url = "https://mandrillapp.com/api/1.0"
//!
//! [services.mandrill]
//! secret = "md-secret"
//! connect_timeout = 10
//! ```

use std::{env, path::Path};

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::transport::mandrill::{ClientOptions, Sender, DEFAULT_URL};

/// Environment variables and the keys they override
const ENV_KEYS: [(&str, &str); 5] = [
    ("MANDRILL_URL", "mandrill.url"),
    ("MANDRILL_SECRET", "services.mandrill.secret"),
    ("MAIL_FROM_ADDRESS", "mail.from_address"),
    ("MAIL_FROM_NAME", "mail.from_name"),
    ("MAIL_MAILER", "mail.default"),
];

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[mail]` section
    pub mail: MailSettings,
    /// `[mandrill]` section
    pub mandrill: MandrillSettings,
    /// `[services]` section
    pub services: Services,
}

/// Settings shared by every transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Name of the transport returned by
    /// [`MailManager::default_mailer`](crate::MailManager::default_mailer)
    pub default: String,
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    /// Sender display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            default: "mandrill".to_owned(),
            from_address: None,
            from_name: None,
        }
    }
}

/// `[mandrill]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandrillSettings {
    /// Base URL of the API, without the endpoint path
    pub url: String,
}

impl Default for MandrillSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
        }
    }
}

/// Credentials of third party services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    /// `[services.mandrill]` section
    pub mandrill: MandrillService,
}

/// `[services.mandrill]` section
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandrillService {
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Options of the HTTP client
    #[serde(flatten)]
    pub client: ClientOptions,
}

impl std::fmt::Debug for MandrillService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillService")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("client", &self.client)
            .finish()
    }
}

impl Config {
    /// Loads the defaults, then the TOML file at `path`, then the environment
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()));
        with_env(figment).extract()
    }

    /// Loads the defaults, then the environment
    pub fn from_env() -> Result<Self, figment::Error> {
        with_env(Figment::from(Serialized::defaults(Self::default()))).extract()
    }

    /// Sender put in every Mandrill request
    pub fn sender(&self) -> Sender {
        Sender::new(self.mail.from_address.clone(), self.mail.from_name.clone())
    }

    /// API key, empty when not configured
    pub fn mandrill_secret(&self) -> &str {
        self.services.mandrill.secret.as_deref().unwrap_or_default()
    }
}

// values are merged as strings, so that numeric looking secrets stay strings
fn with_env(figment: Figment) -> Figment {
    ENV_KEYS
        .iter()
        .filter_map(|(var, key)| env::var(var).ok().map(|value| (*key, value)))
        .fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::global(key, value))
        })
}
