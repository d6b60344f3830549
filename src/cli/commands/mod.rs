//! CLI command implementations.

pub mod analyze;
pub mod interactive;
pub mod prompt;

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::models::UserInput;

/// Read a [`UserInput`] from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
/// Collection invariants are re-applied after parsing.
pub async fn load_input(path: &Path) -> Result<UserInput> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let input: UserInput = if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    };

    input
        .normalized()
        .with_context(|| format!("Invalid input in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Bucket;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("me.yaml");
        fs::write(&yaml, "love: [music, '  ']\ngoodAt: [teaching]\nvalues: [a, b, c, d]\n").unwrap();
        let input = load_input(&yaml).await.unwrap();
        assert_eq!(input.bucket(Bucket::Love), ["music"]);
        assert_eq!(input.values().len(), 3);
        assert_eq!(input.energy_level(), 3);

        let json = dir.path().join("me.JSON");
        fs::write(&json, r#"{"needs": ["clean water"], "energyLevel": 5}"#).unwrap();
        let input = load_input(&json).await.unwrap();
        assert_eq!(input.bucket(Bucket::Needs), ["clean water"]);
        assert_eq!(input.energy_level(), 5);
    }

    #[tokio::test]
    async fn test_load_rejects_bad_energy_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "energyLevel: 9\n").unwrap();
        assert!(load_input(&path).await.is_err());
        assert!(load_input(&dir.path().join("missing.yaml")).await.is_err());
    }
}
