//! API configuration

use chrono::{Duration, Utc};
use serde::Deserialize;

use core_kernel::AcademicYear;
use domain_claims::adapters::StaticPolicyConfiguration;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Minutes of inactivity after which a journey session is discarded
    pub session_timeout_minutes: i64,
    /// Academic year claims are made in, like `2022/2023`
    ///
    /// Defaults to the academic year the server starts in.
    pub academic_year: Option<String>,
    /// JSON file of schools served by the school search
    pub schools_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            session_timeout_minutes: 30,
            academic_year: None,
            schools_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables on top of the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("session_timeout_minutes", defaults.session_timeout_minutes)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::minutes(self.session_timeout_minutes)
    }

    /// Academic year every policy is configured for
    pub fn claim_academic_year(&self) -> Result<AcademicYear, config::ConfigError> {
        match &self.academic_year {
            Some(year) => year
                .parse()
                .map_err(|e| config::ConfigError::Message(format!("API_ACADEMIC_YEAR: {}", e))),
            None => Ok(AcademicYear::at(Utc::now())),
        }
    }

    /// Policy configuration served to the claims engine
    pub fn policy_configuration(&self) -> Result<StaticPolicyConfiguration, config::ConfigError> {
        Ok(StaticPolicyConfiguration::new(self.claim_academic_year()?))
    }
}
