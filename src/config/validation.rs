//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks on thresholds and standards tables.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::EngineConfig;
use crate::types::BhaType;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Entries of `[[standards.*]]` arrays share one path per field.
/// Any new field added to EngineConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [engine]
        "engine",
        "engine.tolerance",
        // [efficiency]
        "efficiency",
        "efficiency.ok_percent",
        "efficiency.warning_percent",
        // [catalog]
        "catalog",
        "catalog.tnp_fallback",
        // [standards]
        "standards",
        // [[standards.connection]]
        "standards.connection",
        "standards.connection.connection_type",
        "standards.connection.angle_bucket",
        "standards.connection.preconnection",
        "standards.connection.connection",
        "standards.connection.postconnection",
        "standards.connection.total",
        // [[standards.trip]]
        "standards.trip",
        "standards.trip.activity",
        "standards.trip.velocity_m_per_hr",
        "standards.trip.connection_time_min",
        // [[standards.bha]]
        "standards.bha",
        "standards.bha.bha_type",
        "standards.bha.action",
        "standards.bha.standard_hours",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields
/// `["a", "a.b", "a.c"]`. Tables inside arrays contribute their keys under
/// the array's path, without an index.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for key in walk_toml_keys(item, &path) {
                            if !keys.contains(&key) {
                                keys.push(key);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate ranges on a parsed EngineConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent the engine from being built; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(config: &EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Tolerance: used as the accept/reject band for cause breakdowns
    let tol = config.engine.tolerance;
    if !tol.is_finite() || tol <= 0.0 {
        errors.push(format!("engine.tolerance = {tol} must be > 0"));
    } else if tol > 0.01 {
        warnings.push(ValidationWarning {
            field: "engine.tolerance".to_string(),
            message: format!("engine.tolerance = {tol} h accepts breakdowns off by more than 36 s"),
            suggestion: None,
        });
    }

    // Efficiency thresholds: percentages, OK above warning
    let eff = &config.efficiency;
    for (name, value) in [
        ("ok_percent", eff.ok_percent),
        ("warning_percent", eff.warning_percent),
    ] {
        if !(0.0..=100.0).contains(&value) {
            errors.push(format!("efficiency.{name} = {value:.1} is outside 0-100"));
        }
    }
    if eff.ok_percent < eff.warning_percent {
        errors.push(format!(
            "efficiency.ok_percent ({:.1}) must be >= efficiency.warning_percent ({:.1})",
            eff.ok_percent, eff.warning_percent
        ));
    }

    validate_connection_table(config, &mut errors, &mut warnings);
    validate_trip_table(config, &mut errors, &mut warnings);
    validate_bha_table(config, &mut errors);

    (errors, warnings)
}

fn validate_connection_table(
    config: &EngineConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut seen = HashSet::new();
    for entry in &config.standards.connection {
        let key = format!("{} / {}", entry.connection_type, entry.angle_bucket);
        if !seen.insert((entry.connection_type, entry.angle_bucket)) {
            errors.push(format!("standards.connection: duplicate entry for {key}"));
        }
        for (name, value) in [
            ("preconnection", entry.preconnection),
            ("connection", entry.connection),
            ("postconnection", entry.postconnection),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("standards.connection[{key}].{name} = {value} cannot be negative"));
            }
        }
        let sum = entry.preconnection + entry.connection + entry.postconnection;
        if let Some(total) = entry.total {
            if (total - sum).abs() > 1e-9 {
                errors.push(format!(
                    "standards.connection[{key}].total = {total} does not match component sum {sum}"
                ));
            }
        }
        if sum == 0.0 {
            warnings.push(ValidationWarning {
                field: "standards.connection".to_string(),
                message: format!("Connection standard for {key} is 0: no excess will ever be computed"),
                suggestion: None,
            });
        }
    }
}

fn validate_trip_table(
    config: &EngineConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut seen = HashSet::new();
    for entry in &config.standards.trip {
        let name = entry.activity.trim();
        if name.is_empty() {
            errors.push("standards.trip: activity name cannot be empty".to_string());
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            errors.push(format!("standards.trip: duplicate entry for '{name}'"));
        }
        if !entry.velocity_m_per_hr.is_finite() || entry.velocity_m_per_hr < 0.0 {
            errors.push(format!(
                "standards.trip['{name}'].velocity_m_per_hr = {} cannot be negative",
                entry.velocity_m_per_hr
            ));
        } else if entry.velocity_m_per_hr == 0.0 {
            warnings.push(ValidationWarning {
                field: "standards.trip.velocity_m_per_hr".to_string(),
                message: format!("Trip standard '{name}' has velocity 0: velocity term ignored"),
                suggestion: None,
            });
        }
        if !entry.connection_time_min.is_finite() || entry.connection_time_min < 0.0 {
            errors.push(format!(
                "standards.trip['{name}'].connection_time_min = {} cannot be negative",
                entry.connection_time_min
            ));
        }
    }
}

fn validate_bha_table(config: &EngineConfig, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for entry in &config.standards.bha {
        if BhaType::new(entry.bha_type).is_err() {
            errors.push(format!(
                "standards.bha.bha_type = {} is outside {}..={}",
                entry.bha_type,
                BhaType::MIN,
                BhaType::MAX
            ));
        }
        if !seen.insert((entry.bha_type, entry.action)) {
            errors.push(format!(
                "standards.bha: duplicate entry for type {} ({})",
                entry.bha_type, entry.action
            ));
        }
        if !entry.standard_hours.is_finite() || entry.standard_hours < 0.0 {
            errors.push(format!(
                "standards.bha[type {} {}].standard_hours = {} cannot be negative",
                entry.bha_type, entry.action, entry.standard_hours
            ));
        }
    }
}
