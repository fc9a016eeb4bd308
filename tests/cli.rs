use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const VALID_FORM: &str = r#"
fullName: Ada Lovelace
donationsAmount: 50
termsAndConditions: true
donations:
  - institution: Red Cross
    percentage: 70
  - institution: UNICEF
    percentage: 30
"#;

#[test]
fn validate_accepts_a_valid_form() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(&form_path, VALID_FORM)?;

    let mut cmd = Command::cargo_bin("donform")?;
    cmd.arg("validate").arg(&form_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Form is valid"));
    Ok(())
}

#[test]
fn validate_accepts_the_simpler_variant() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(
        &form_path,
        "fullName: Ada\ndonationsAmount: 25\ntermsAndConditions: true\n",
    )?;

    Command::cargo_bin("donform")?
        .arg("validate")
        .arg(&form_path)
        .assert()
        .success();
    Ok(())
}

#[test]
fn validate_reports_each_failing_field() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(
        &form_path,
        r#"
fullName: ''
donationsAmount: 9
termsAndConditions: false
donations:
  - institution: AB
    percentage: 60
  - institution: UNICEF
    percentage: 30
"#,
    )?;

    let mut cmd = Command::cargo_bin("donform")?;
    cmd.arg("validate").arg(&form_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("You need to provide a name"))
        .stderr(predicate::str::contains(
            "Donation amount needs to be at least 10",
        ))
        .stderr(predicate::str::contains(
            "You cannot proceed if you do not agree",
        ))
        .stderr(predicate::str::contains(
            "Insitution needs to be at least 3 characters",
        ))
        .stderr(predicate::str::contains(
            "Percentage is currently 90, it should add up to 100%",
        ))
        .stderr(predicate::str::contains("Form validation failed"));
    Ok(())
}

#[test]
fn validate_handles_json_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.json");
    fs::write(
        &form_path,
        r#"{
            "fullName": "Ada Lovelace",
            "donationsAmount": 50,
            "termsAndConditions": true,
            "donations": [{"institution": "Red Cross", "percentage": 100}]
        }"#,
    )?;

    Command::cargo_bin("donform")?
        .arg("validate")
        .arg(&form_path)
        .assert()
        .success();
    Ok(())
}

#[test]
fn submit_runs_the_stub_on_a_valid_form() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(&form_path, VALID_FORM)?;

    let mut cmd = Command::cargo_bin("donform")?;
    // Skip the 2.5 s stand-in for the network round trip.
    cmd.env("DONFORM_SUBMIT_DELAY_MS", "0")
        .arg("submit")
        .arg(&form_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Submitting…"))
        .stdout(predicate::str::contains("Donation submitted"))
        .stdout(predicate::str::contains("Ada Lovelace"));
    Ok(())
}

#[test]
fn submit_refuses_an_invalid_form() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(&form_path, "fullName: ''\n")?;

    let mut cmd = Command::cargo_bin("donform")?;
    cmd.env("DONFORM_SUBMIT_DELAY_MS", "0")
        .arg("submit")
        .arg(&form_path);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Submitting").not())
        .stderr(predicate::str::contains("Form validation failed"));
    Ok(())
}

#[test]
fn inspect_dumps_values_and_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let form_path = dir.path().join("form.yml");
    fs::write(
        &form_path,
        "fullName: ''\ndonationsAmount: 50\ntermsAndConditions: true\n",
    )?;

    let mut cmd = Command::cargo_bin("donform")?;
    cmd.arg("inspect").arg(&form_path);

    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let dump: serde_json::Value = serde_json::from_str(&stdout)?;

    assert_eq!(dump["values"]["fullName"], "");
    assert_eq!(dump["errors"]["fullName"], "You need to provide a name");
    Ok(())
}

#[test]
fn validate_rejects_a_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("donform")?
        .arg("validate")
        .arg(dir.path().join("nope.yml"))
        .assert()
        .failure();
    Ok(())
}
