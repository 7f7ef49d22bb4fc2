pub mod eligibility_model;
pub mod negotiator;
