use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_SBI_TIMEOUT: &str = "10000";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    data_service: DataService,
    sbi: Sbi,
    runs: Runs,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn data_service(&self) -> &DataService {
        &self.data_service
    }

    pub fn sbi(&self) -> &Sbi {
        &self.sbi
    }

    pub fn runs(&self) -> &Runs {
        &self.runs
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    locale: String,
    #[serde(default)]
    is_mobile_app: bool,
    #[serde(default)]
    show_error_code: bool,
}

impl Core {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Mobile SBI apps answer a discover call with a single device record instead of a list.
    pub fn is_mobile_app(&self) -> bool {
        self.is_mobile_app
    }

    pub fn show_error_code(&self) -> bool {
        self.show_error_code
    }
}

#[derive(Debug, Deserialize)]
pub struct DataService {
    url: String,
    retry_ms: u64,
    retry_max_delay_ms: u64,
    max_retries: usize,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    validations_id: String,
    version: String,
}

impl DataService {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay_ms(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn validations_id(&self) -> &str {
        &self.validations_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[derive(Debug, Deserialize)]
pub struct Sbi {
    timeout_ms: Option<u64>,
}

impl Sbi {
    /// Device timeout used when a test case does not carry its own, as sent on the wire.
    pub fn timeout(&self) -> String {
        self.timeout_ms
            .map(|timeout| timeout.to_string())
            .unwrap_or_else(|| DEFAULT_SBI_TIMEOUT.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct Runs {
    directory: String,
}

impl Runs {
    pub fn directory(&self) -> &str {
        &self.directory
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    locale: "eng".to_string(),
                    is_mobile_app: false,
                    show_error_code: false,
                },
                data_service: DataService {
                    url: "https://toolkit.url".to_string(),
                    retry_ms: 1,
                    retry_max_delay_ms: 2,
                    max_retries: 2,
                    request_timeout: Duration::from_secs(5),
                    validations_id: "mosip.toolkit.validations.add".to_string(),
                    version: "1.0".to_string(),
                },
                sbi: Sbi { timeout_ms: None },
                runs: Runs {
                    directory: "runs".to_string(),
                },
            },
        }
    }

    pub fn data_service_url(mut self, url: String) -> Self {
        self.config.data_service.url = url;
        self
    }

    pub fn sbi_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.sbi.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn mobile_app(mut self, is_mobile_app: bool) -> Self {
        self.config.core.is_mobile_app = is_mobile_app;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbi_timeout_falls_back_to_the_default() {
        let config = AppConfigBuilder::new().build();

        assert_eq!(config.sbi().timeout(), "10000");
    }

    #[test]
    fn sbi_timeout_uses_the_configured_value() {
        let config = AppConfigBuilder::new().sbi_timeout_ms(25_000).build();

        assert_eq!(config.sbi().timeout(), "25000");
    }
}
