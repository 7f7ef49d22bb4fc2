pub mod selection_model;
pub mod tracker;
