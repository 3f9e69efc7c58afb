mod engine;
mod error;
mod profile;
mod types;

pub use engine::{
    expected_savings_at_retirement, project, required_retirement_income,
    required_retirement_savings,
};
pub use error::{InvalidPlanError, ScenarioError, ValidationError};
pub use profile::{Profile, local_today};
pub use types::{
    DEFAULT_ANNUAL_SALARY_INCREASE, DEFAULT_INFLATION_RATE, ProjectionResult, RawProfile, Scenario,
};
