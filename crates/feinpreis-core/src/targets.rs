use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::types::Target;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct TargetsFile {
    pub targets: Vec<Target>,
}

/// Load and validate the scrape target list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation. A bad target list is fatal: nothing is scraped.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let targets_file: TargetsFile = serde_yaml::from_str(&content)?;

    validate_targets(&targets_file)?;

    Ok(targets_file)
}

fn validate_targets(targets_file: &TargetsFile) -> Result<(), ConfigError> {
    if targets_file.targets.is_empty() {
        return Err(ConfigError::Validation(
            "target list must contain at least one target".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for target in &targets_file.targets {
        if target.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target id must be non-empty".to_string(),
            ));
        }

        if target.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "target '{}' has an empty url",
                target.id
            )));
        }

        if !(target.url.starts_with("http://") || target.url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "target '{}' has a non-http(s) url: {}",
                target.id, target.url
            )));
        }

        if let Some(grams) = target.fine_in_grams {
            if !(grams.is_finite() && grams > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "target '{}' has invalid fine_in_grams {grams}",
                    target.id
                )));
            }
        }

        if !seen_ids.insert(target.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target id: '{}'",
                target.id
            )));
        }
    }

    Ok(())
}
