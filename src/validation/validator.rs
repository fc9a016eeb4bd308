use anyhow::{Context, Result};
use miette::Report;
use std::path::Path;
use tracing::{debug, info};

use super::error_reporter::SpannedForm;
use super::rules::{self, ValidationReport};
use crate::models::FormValues;

/// Facade that loads a form file, runs the rule set, and prints one
/// diagnostic per failing field path.
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Pure rule evaluation, no I/O. Exposed for callers that already
    /// hold a [`FormValues`].
    pub fn validate_values(&self, values: &FormValues) -> ValidationReport {
        rules::validate(values)
    }

    /// Validate a form file, dispatching on the extension. YAML files get
    /// span-labeled diagnostics; JSON files get a plain listing.
    ///
    /// Returns the parsed values when the form is valid.
    pub fn validate_file(&self, path: &Path) -> Result<FormValues> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => self.validate_yaml(path),
            "json" => self.validate_json(path),
            other => anyhow::bail!(
                "Unsupported form file extension {other:?} for {path:?} (expected yaml, yml or json)"
            ),
        }
    }

    fn validate_yaml(&self, path: &Path) -> Result<FormValues> {
        let spanned = SpannedForm::new(path)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML from {path:?}: {e}"))?;
        let values: FormValues = spanned
            .values()
            .with_context(|| format!("Form file {path:?} does not match the form shape"))?;

        debug!("Running form rules");
        let report = rules::validate(&values);

        if !report.is_valid() {
            eprintln!(); // Blank line before the first diagnostic
            for (field_path, error) in report.iter() {
                let diagnostic = spanned.create_error(field_path, error.message.clone());
                eprintln!("{:?}", Report::new(diagnostic));
            }
            anyhow::bail!("Form validation failed for {path:?} (see detailed errors above)");
        }

        info!("✓ Form validation passed: {path:?}");
        Ok(values)
    }

    fn validate_json(&self, path: &Path) -> Result<FormValues> {
        let values = crate::loader::load_form(path)?;

        debug!("Running form rules");
        let report = rules::validate(&values);

        if !report.is_valid() {
            eprintln!();
            for (field_path, error) in report.iter() {
                eprintln!("  {field_path}: {}", error.message);
            }
            anyhow::bail!("Form validation failed for {path:?} (see detailed errors above)");
        }

        info!("✓ Form validation passed: {path:?}");
        Ok(values)
    }
}
