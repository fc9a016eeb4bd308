use anyhow::Result;
use std::path::Path;

use crate::validation::Validator;

pub fn validate_command(file: &Path) -> Result<()> {
    println!("Validating form file: {}", file.display());

    let validator = Validator::new();
    let _values = validator.validate_file(file)?;

    println!("\n✅ Form is valid!");
    Ok(())
}
