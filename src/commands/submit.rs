use anyhow::Result;
use std::path::Path;

use crate::submit::Submitter;
use crate::validation::Validator;

/// Validate a form file and, when it passes, run the stub submission.
/// The busy line mirrors the form's disabled-button state: nothing else
/// happens until the submission resolves.
pub fn submit_command(file: &Path) -> Result<()> {
    let validator = Validator::new();
    let values = validator.validate_file(file)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        println!("Submitting…");
        Submitter::new().submit(&values).await;
    });

    println!("\n✅ Donation submitted. Thank you, {}!", values.full_name);
    Ok(())
}
