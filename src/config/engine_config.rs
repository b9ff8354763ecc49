//! Engine Configuration - standards tables and reconciliation tuning as TOML
//!
//! Every struct implements `Default` with the built-in values from
//! `defaults`, so an absent config file or section changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::catalog::TnpFallback;
use crate::reconciliation::SeverityThresholds;
use crate::types::{AngleBucket, BhaAction, ConnectionType};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one reconciliation deployment.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$RIGBOOK_CONFIG` env var
/// 2. `./rigbook.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    /// Numeric tolerances
    #[serde(default)]
    pub engine: EngineSection,

    /// Efficiency severity boundaries
    #[serde(default)]
    pub efficiency: SeverityThresholds,

    /// Cause catalog policy
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Connection, trip and BHA standards tables
    #[serde(default)]
    pub standards: StandardsConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$RIGBOOK_CONFIG` environment variable
    /// 2. `./rigbook.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        info!("No {} found, using built-in standards", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings; range violations are errors.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate thresholds and tables.
    ///
    /// Range errors fail the load; suspicious values are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Config Errors
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSection {
    /// Breakdown-sum and conservation tolerance (hours)
    pub tolerance: f64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            tolerance: defaults::SUM_TOLERANCE_HOURS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// What to offer for TNP causes when no TNP catalog is loaded
    pub tnp_fallback: TnpFallback,
}

/// Standards tables as they appear in TOML (arrays of tables).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StandardsConfig {
    pub connection: Vec<ConnectionStandardEntry>,
    pub trip: Vec<TripStandardEntry>,
    pub bha: Vec<BhaStandardEntry>,
}

impl Default for StandardsConfig {
    fn default() -> Self {
        Self {
            connection: defaults::CONNECTION_STANDARDS
                .iter()
                .map(|(connection_type, angle_bucket, s)| ConnectionStandardEntry {
                    connection_type: *connection_type,
                    angle_bucket: *angle_bucket,
                    preconnection: s.preconnection,
                    connection: s.connection,
                    postconnection: s.postconnection,
                    total: Some(s.total()),
                })
                .collect(),
            trip: defaults::TRIP_STANDARDS
                .iter()
                .map(|(activity, velocity, conn)| TripStandardEntry {
                    activity: (*activity).to_string(),
                    velocity_m_per_hr: *velocity,
                    connection_time_min: *conn,
                })
                .collect(),
            bha: defaults::BHA_STANDARD_HOURS
                .iter()
                .flat_map(|(bha_type, assemble, disassemble)| {
                    [
                        BhaStandardEntry {
                            bha_type: *bha_type,
                            action: BhaAction::Assemble,
                            standard_hours: *assemble,
                        },
                        BhaStandardEntry {
                            bha_type: *bha_type,
                            action: BhaAction::Disassemble,
                            standard_hours: *disassemble,
                        },
                    ]
                })
                .collect(),
        }
    }
}

/// `[[standards.connection]]` - minutes per component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStandardEntry {
    pub connection_type: ConnectionType,
    pub angle_bucket: AngleBucket,
    pub preconnection: f64,
    pub connection: f64,
    pub postconnection: f64,
    /// Optional published total; must equal the component sum when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// `[[standards.trip]]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripStandardEntry {
    pub activity: String,
    pub velocity_m_per_hr: f64,
    pub connection_time_min: f64,
}

/// `[[standards.bha]]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BhaStandardEntry {
    pub bha_type: u8,
    pub action: BhaAction,
    pub standard_hours: f64,
}
