pub mod tree_model;
pub mod view;
