mod inspect;
mod submit;
mod validate;

pub use inspect::inspect_command;
pub use submit::submit_command;
pub use validate::validate_command;
