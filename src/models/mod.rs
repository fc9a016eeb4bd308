pub mod form;

// Re-export commonly used types
pub use form::{Donation, FormValues};
