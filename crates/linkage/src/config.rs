use serde::Deserialize;

use crate::error::LinkageError;

pub const DEFAULT_YEARS: u32 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_OUTPUT: &str = "mortgage_assessed_join.csv";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration, usually read from a `.join.toml` file. Every section is
/// optional; command-line flags fill in or override what is missing.
///
/// `properties`, `mortgages`, `output` and `http` are for the caller that
/// fetches inputs and writes the result. [`crate::engine::run`] reads only
/// `window`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinConfig {
    #[serde(default)]
    pub properties: SourceConfig,
    #[serde(default)]
    pub mortgages: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Where one input CSV comes from: a local path or a URL, never both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "default_years")]
    pub years: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { years: DEFAULT_YEARS }
    }
}

fn default_years() -> u32 {
    DEFAULT_YEARS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl JoinConfig {
    pub fn from_toml(input: &str) -> Result<Self, LinkageError> {
        let config: JoinConfig =
            toml::from_str(input).map_err(|e| LinkageError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LinkageError> {
        for (name, source) in [("properties", &self.properties), ("mortgages", &self.mortgages)] {
            if source.path.is_some() && source.url.is_some() {
                return Err(LinkageError::AmbiguousSource { name: name.into() });
            }
            if source.path.as_deref() == Some("") || source.url.as_deref() == Some("") {
                return Err(LinkageError::ConfigValidation(format!(
                    "source '{name}': location must not be empty"
                )));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(LinkageError::ConfigValidation(
                "http.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.output.path.as_deref() == Some("") {
            return Err(LinkageError::ConfigValidation(
                "output.path must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
