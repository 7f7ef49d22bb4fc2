pub mod prompt;
pub mod registry;
pub mod registry_model;
