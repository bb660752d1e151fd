//! Report configuration.
//!
//! Defaults suit most hosts. Deployments can override them through the
//! environment:
//!
//! - `INCIDENT_COLOR`: `auto`, `always` or `never`
//! - `INCIDENT_FRAMEWORK_PATHS`: comma-separated framework path markers
//! - `INCIDENT_FRAMEWORK_MODULES`: comma-separated framework module paths
//! - `INCIDENT_MAX_VALUE_LEN`: maximum rendered value length (0 = unlimited)

use std::str::FromStr;

use incident_trace::FrameClassifier;
use incident_value::{ValueSerializer, DEFAULT_MAX_LEN};

/// Color mode environment variable.
pub const ENV_COLOR: &str = "INCIDENT_COLOR";
/// Framework path markers environment variable.
pub const ENV_FRAMEWORK_PATHS: &str = "INCIDENT_FRAMEWORK_PATHS";
/// Framework module paths environment variable.
pub const ENV_FRAMEWORK_MODULES: &str = "INCIDENT_FRAMEWORK_MODULES";
/// Value length limit environment variable.
pub const ENV_MAX_VALUE_LEN: &str = "INCIDENT_MAX_VALUE_LEN";

/// Path markers identifying this workspace's own sources, when built from a
/// checkout.
pub const DEFAULT_FRAMEWORK_MARKERS: &[&str] = &[
    "/incident/src/",
    "/incident_trace/src/",
    "/incident_value/src/",
];

/// Modules whose frames belong to the framework however the crates were
/// built (workspace, registry, vendored).
pub const DEFAULT_FRAMEWORK_MODULES: &[&str] = &["incident", "incident_trace", "incident_value"];

/// Errors from loading configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown color mode `{0}` (expected `auto`, `always` or `never`)")]
    UnknownColorMode(String),
    #[error("invalid INCIDENT_MAX_VALUE_LEN `{0}`: expected a non-negative integer")]
    InvalidMaxValueLen(String),
}

/// Color output mode for rendered reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Decorate only when writing to a terminal.
    #[default]
    Auto,
    /// Always decorate.
    Always,
    /// Never decorate.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean.
    ///
    /// `is_tty` is only consulted in `Auto` mode.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::UnknownColorMode(s.to_string())),
        }
    }
}

/// Configuration for rendering incident reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Substrings identifying framework source files.
    pub framework_markers: Vec<String>,
    /// Module paths whose symbols are framework frames.
    pub framework_modules: Vec<String>,
    /// Maximum rendered length of a single value (0 = unlimited).
    pub max_value_len: usize,
    /// Color mode for [`Exception::emit`](crate::Exception::emit).
    pub color: ColorMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            framework_markers: DEFAULT_FRAMEWORK_MARKERS
                .iter()
                .map(ToString::to_string)
                .collect(),
            framework_modules: DEFAULT_FRAMEWORK_MODULES
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_value_len: DEFAULT_MAX_LEN,
            color: ColorMode::Auto,
        }
    }
}

impl ReportConfig {
    /// Load from the process environment. Unset variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the environment, falling back to defaults on error.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("ignoring incident report configuration: {e}");
            ReportConfig::default()
        })
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ReportConfig::default();
        if let Some(mode) = lookup(ENV_COLOR) {
            config.color = mode.parse()?;
        }
        if let Some(paths) = lookup(ENV_FRAMEWORK_PATHS) {
            config.framework_markers = split_list(&paths);
        }
        if let Some(modules) = lookup(ENV_FRAMEWORK_MODULES) {
            config.framework_modules = split_list(&modules);
        }
        if let Some(len) = lookup(ENV_MAX_VALUE_LEN) {
            config.max_value_len = len
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidMaxValueLen(len.clone()))?;
        }
        Ok(config)
    }

    pub fn classifier(&self) -> FrameClassifier {
        FrameClassifier::new(self.framework_markers.iter().cloned())
            .with_modules(self.framework_modules.iter().cloned())
    }

    pub fn serializer(&self) -> ValueSerializer {
        ValueSerializer::new(self.max_value_len)
    }
}

/// Comma-separated list, blanks dropped.
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
