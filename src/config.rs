use crate::error::{GatewayError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Merchant settings and binary locations used by [`GatewayClient`](crate::application::client::GatewayClient).
///
/// Can be built in code or read from a JSON file:
///
/// ```json
/// {
///   "merchant_id": "014295303911111",
///   "country": "fr",
///   "pathfile": "/etc/sips/pathfile",
///   "request_path": "/opt/sips/bin/request",
///   "response_path": "/opt/sips/bin/response",
///   "debug": true,
///   "timeout_secs": 30
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    merchant_id: String,
    /// ISO 3166 country code of the merchant.
    country: String,
    pathfile: PathBuf,
    request_path: PathBuf,
    response_path: PathBuf,
    /// Selects the SIPS demo environment.
    #[serde(default)]
    debug: bool,
    /// No bound on the binary's run time when absent.
    #[serde(default, rename = "timeout_secs", deserialize_with = "deserialize_secs")]
    timeout: Option<Duration>,
}

fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = Option::<u64>::deserialize(deserializer)?;
    Ok(secs.map(Duration::from_secs))
}

impl ClientConfig {
    pub fn new(
        merchant_id: impl Into<String>,
        country: impl Into<String>,
        pathfile: impl Into<PathBuf>,
        request_path: impl Into<PathBuf>,
        response_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            country: country.into(),
            pathfile: pathfile.into(),
            request_path: request_path.into(),
            response_path: response_path.into(),
            debug: false,
            timeout: None,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Loads and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(GatewayError::Config("merchant_id must not be empty".into()));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(GatewayError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn pathfile(&self) -> &Path {
        &self.pathfile
    }

    pub fn request_path(&self) -> &Path {
        &self.request_path
    }

    pub fn response_path(&self) -> &Path {
        &self.response_path
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
