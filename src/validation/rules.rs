//! The donation form rule set.
//!
//! `validate` is a pure function of the current [`FormValues`]: it never
//! touches the filesystem and carries no state, so it can be re-run on
//! every value change to drive an "is submit enabled" signal. Each field
//! path reports at most one error (the first failing rule for that path);
//! fields never suppress each other.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::{Donation, FormValues};

/// Minimum accepted donation amount.
pub const MIN_DONATION_AMOUNT: f64 = 10.0;
/// Minimum length of an institution name, in characters.
pub const MIN_INSTITUTION_CHARS: usize = 3;
/// Bounds on the beneficiary list length.
pub const MIN_DONATIONS: usize = 1;
pub const MAX_DONATIONS: usize = 3;
/// What the beneficiary percentages must add up to.
pub const PERCENTAGE_TOTAL: f64 = 100.0;

/// Locates a value within the form.
///
/// The derived ordering matches document order (scalar fields first, then
/// the list path, then each row's fields in sequence), so iterating a
/// report enumerates errors the way the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldPath {
    FullName,
    DonationsAmount,
    TermsAndConditions,
    /// The beneficiary list as a whole. Length and sum violations land
    /// here rather than on any individual row.
    Donations,
    DonationField(usize, DonationField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DonationField {
    Institution,
    Percentage,
}

impl FieldPath {
    pub fn institution(index: usize) -> Self {
        Self::DonationField(index, DonationField::Institution)
    }

    pub fn percentage(index: usize) -> Self {
        Self::DonationField(index, DonationField::Percentage)
    }

    /// JSON-pointer form, used to look up source spans in the input file.
    pub fn pointer(&self) -> String {
        match self {
            Self::FullName => "/fullName".into(),
            Self::DonationsAmount => "/donationsAmount".into(),
            Self::TermsAndConditions => "/termsAndConditions".into(),
            Self::Donations => "/donations".into(),
            Self::DonationField(i, field) => format!("/donations/{i}/{field}"),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName => write!(f, "fullName"),
            Self::DonationsAmount => write!(f, "donationsAmount"),
            Self::TermsAndConditions => write!(f, "termsAndConditions"),
            Self::Donations => write!(f, "donations"),
            Self::DonationField(i, field) => write!(f, "donations[{i}].{field}"),
        }
    }
}

impl fmt::Display for DonationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Institution => write!(f, "institution"),
            Self::Percentage => write!(f, "percentage"),
        }
    }
}

/// Which rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingField,
    NotAccepted,
    BelowMinimum,
    AboveMaximum,
    TooShort,
    TooFew,
    TooMany,
    SumMismatch,
}

/// A single validation failure: the rule that fired plus the message shown
/// next to the field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The outcome of validating a [`FormValues`]: a map from field path to the
/// first applicable error for that path. An empty map means the form is
/// valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldPath, FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// The error code recorded for `path`, if any.
    pub fn code(&self, path: &FieldPath) -> Option<ErrorCode> {
        self.errors.get(path).map(|e| e.code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.errors.iter()
    }

    /// Record an error unless the path already has one. Rule order in
    /// [`validate`] therefore decides which error a path reports.
    fn record(&mut self, path: FieldPath, code: ErrorCode, message: impl Into<String>) {
        if let Entry::Vacant(entry) = self.errors.entry(path) {
            entry.insert(FieldError {
                code,
                message: message.into(),
            });
        }
    }
}

// Serialized as `{ "donations[0].institution": "Institution is required" }`
// for the inspect dump.
impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, error) in &self.errors {
            map.serialize_entry(&path.to_string(), &error.message)?;
        }
        map.end()
    }
}

/// Validate the whole form. See the module docs for the evaluation
/// contract.
pub fn validate(values: &FormValues) -> ValidationReport {
    let mut report = ValidationReport::default();

    if values.full_name.is_empty() {
        report.record(
            FieldPath::FullName,
            ErrorCode::MissingField,
            "You need to provide a name",
        );
    }

    match values.donations_amount {
        None => report.record(
            FieldPath::DonationsAmount,
            ErrorCode::MissingField,
            "You need a donation amount",
        ),
        Some(amount) if amount < MIN_DONATION_AMOUNT => report.record(
            FieldPath::DonationsAmount,
            ErrorCode::BelowMinimum,
            "Donation amount needs to be at least 10",
        ),
        Some(_) => {}
    }

    // Only `true` passes; an unticked box and an absent one are the same
    // thing to this form.
    if !values.terms_and_conditions {
        report.record(
            FieldPath::TermsAndConditions,
            ErrorCode::NotAccepted,
            "You cannot proceed if you do not agree",
        );
    }

    if let Some(donations) = &values.donations {
        validate_donations(donations, &mut report);
    }

    report
}

fn validate_donations(donations: &[Donation], report: &mut ValidationReport) {
    if donations.len() < MIN_DONATIONS {
        report.record(
            FieldPath::Donations,
            ErrorCode::TooFew,
            "You need at least 1 donation",
        );
    } else if donations.len() > MAX_DONATIONS {
        report.record(
            FieldPath::Donations,
            ErrorCode::TooMany,
            "You cannot have more than 3 donations",
        );
    }

    // Per-row rules, each keyed to the row's own path and independent of
    // its siblings.
    for (i, donation) in donations.iter().enumerate() {
        if donation.institution.is_empty() {
            report.record(
                FieldPath::institution(i),
                ErrorCode::MissingField,
                "Institution is required",
            );
        } else if donation.institution.chars().count() < MIN_INSTITUTION_CHARS {
            report.record(
                FieldPath::institution(i),
                ErrorCode::TooShort,
                "Insitution needs to be at least 3 characters",
            );
        }

        match donation.percentage {
            None => report.record(
                FieldPath::percentage(i),
                ErrorCode::MissingField,
                "Percentage is required",
            ),
            Some(p) if p < 1.0 => report.record(
                FieldPath::percentage(i),
                ErrorCode::BelowMinimum,
                "Percentage needs to be at least 1",
            ),
            Some(p) if p > 100.0 => report.record(
                FieldPath::percentage(i),
                ErrorCode::AboveMaximum,
                "Percentage cannot be greater than 100",
            ),
            Some(_) => {}
        }
    }

    // List-level sum invariant. Runs unconditionally, but `record` keeps
    // the first error per path, so a length violation on `donations` wins.
    let sum: f64 = donations.iter().filter_map(|d| d.percentage).sum();
    if sum != PERCENTAGE_TOTAL {
        report.record(
            FieldPath::Donations,
            ErrorCode::SumMismatch,
            format!(
                "Percentage is currently {}, it should add up to 100%",
                display_number(sum)
            ),
        );
    }
}

/// Format a total the way the original form did: integral values print
/// without a fractional part.
fn display_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
