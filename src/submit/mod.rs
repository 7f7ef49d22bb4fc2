pub mod coordinator;
pub mod submit_model;
