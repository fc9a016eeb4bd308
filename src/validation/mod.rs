mod error_reporter;
mod rules;
mod validator;


pub use error_reporter::{FormFileError, SpannedForm};
pub use rules::{
    DonationField, ErrorCode, FieldError, FieldPath, MAX_DONATIONS, MIN_DONATION_AMOUNT,
    MIN_DONATIONS, MIN_INSTITUTION_CHARS, PERCENTAGE_TOTAL, ValidationReport, validate,
};
pub use validator::Validator;
