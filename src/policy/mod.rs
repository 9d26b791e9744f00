mod init;
mod schema;
mod validation;

pub use init::write_default_policy;
pub use schema::*;
pub use validation::{policy_warnings, validate_policy};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/truthlens/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("truthlens"))
}

/// Get the default policy file path (~/.config/truthlens/scoring.json)
pub fn get_policy_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("scoring.json"))
}

/// Where a loaded policy came from, for verbose reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicySource {
    File(PathBuf),
    BuiltIn,
}

/// Load the scoring policy.
///
/// # Arguments
///
/// * `path` - Optional path to a policy file. If None, uses the default path
///   (~/.config/truthlens/scoring.json) when it exists, otherwise the
///   built-in policy.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit policy file does not exist
/// - The policy file cannot be read
/// - The JSON or YAML cannot be parsed
pub fn load_policy(path: Option<PathBuf>) -> Result<(Policy, PolicySource)> {
    let policy_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Policy file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_policy_path()?;
            if !default_path.exists() {
                return Ok((Policy::default(), PolicySource::BuiltIn));
            }
            default_path
        }
    };

    let policy = read_policy_file(&policy_path)?;
    Ok((policy, PolicySource::File(policy_path)))
}

/// Parse a policy file, choosing YAML or JSON by extension.
pub fn read_policy_file(path: &Path) -> Result<Policy> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file at {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse policy: invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse policy: invalid JSON in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = env::temp_dir().join("truthlens_test_missing_policy.json");
        let _ = fs::remove_file(&path);

        let err = load_policy(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Policy file not found"));
    }

    #[test]
    fn test_load_json_policy() {
        let path = env::temp_dir().join("truthlens_test_policy.json");
        fs::write(&path, r#"{ "base": 40, "evidence_floor": { "min_sources": 1 } }"#).unwrap();

        let (policy, source) = load_policy(Some(path.clone())).unwrap();
        assert_eq!(policy.base(), 40.0);
        assert_eq!(policy.evidence_floor.min_sources(), 1.0);
        assert_eq!(source, PolicySource::File(path.clone()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_yaml_policy() {
        let path = env::temp_dir().join("truthlens_test_policy.yaml");
        fs::write(&path, "base: 65\nladder:\n  - { min: 0, label: \"Open\" }\n").unwrap();

        let (policy, _) = load_policy(Some(path.clone())).unwrap();
        assert_eq!(policy.base(), 65.0);
        assert_eq!(policy.ladder[0].label.as_deref(), Some("Open"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_json_reports_path() {
        let path = env::temp_dir().join("truthlens_test_policy_bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_policy_file(&path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let _ = fs::remove_file(&path);
    }
}
