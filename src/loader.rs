//! Form file loading
//!
//! Reads a `FormValues` document from YAML or JSON, dispatching on the
//! file extension. Validation is a separate step; a file that parses here
//! may still fail every rule.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::FormValues;

pub fn load_form(path: &Path) -> Result<FormValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {path:?}"))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML from: {path:?}")),
        "json" => from_json_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {path:?}")),
        other => anyhow::bail!(
            "Unsupported form file extension {other:?} for {path:?} (expected yaml, yml or json)"
        ),
    }
}

pub fn from_yaml_str(content: &str) -> Result<FormValues> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> Result<FormValues> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_form() {
        let temp_dir = TempDir::new().unwrap();
        let form_path = temp_dir.path().join("form.yml");

        fs::write(
            &form_path,
            r#"
fullName: Ada Lovelace
donationsAmount: 50
termsAndConditions: true
donations:
  - institution: Red Cross
    percentage: 100
"#,
        )
        .unwrap();

        let values = load_form(&form_path).unwrap();
        assert_eq!(values.full_name, "Ada Lovelace");
        assert_eq!(values.donations_amount, Some(50.0));
        assert!(values.terms_and_conditions);
        assert_eq!(values.donations.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_load_json_form_without_donations() {
        let temp_dir = TempDir::new().unwrap();
        let form_path = temp_dir.path().join("form.json");

        fs::write(
            &form_path,
            r#"{"fullName": "Ada", "donationsAmount": 25, "termsAndConditions": true}"#,
        )
        .unwrap();

        // The simpler form variant: no donations key at all.
        let values = load_form(&form_path).unwrap();
        assert!(values.donations.is_none());
    }

    #[test]
    fn test_missing_keys_deserialize_as_absent() {
        let values = from_yaml_str("fullName: Ada").unwrap();
        assert_eq!(values.donations_amount, None);
        assert!(!values.terms_and_conditions);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let form_path = temp_dir.path().join("form.toml");
        fs::write(&form_path, "fullName = 'Ada'").unwrap();

        let err = load_form(&form_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported form file extension"));
    }
}
