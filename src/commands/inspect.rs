use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::loader;
use crate::validation;

/// Dump the parsed values together with the current error map, the same
/// `{ values, errors }` pair the form page used for debugging.
pub fn inspect_command(file: &Path) -> Result<()> {
    let values = loader::load_form(file)?;
    let report = validation::validate(&values);

    let dump = json!({
        "values": values,
        "errors": report,
    });
    println!("{}", serde_json::to_string_pretty(&dump)?);

    Ok(())
}
