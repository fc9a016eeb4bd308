pub mod commands;
pub mod loader;
pub mod models;
pub mod submit;
pub mod validation;
