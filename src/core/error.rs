use chrono::NaiveDate;
use thiserror::Error;

/// A profile violates one of the plan's temporal invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPlanError {
    #[error("retirement age must exceed current age")]
    RetirementNotAfterCurrentAge { retirement_age: u32, current_age: u32 },
    #[error("life expectancy must exceed retirement age")]
    LifeExpectancyNotAfterRetirement {
        life_expectancy: u32,
        retirement_age: u32,
    },
}

/// Reasons a raw profile is rejected. None of these are retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a positive integer, got {value}")]
    NonPositive { field: &'static str, value: i64 },
    #[error("{field} of {value} years is out of range")]
    YearsOutOfRange { field: &'static str, value: i64 },
    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("date of birth {date_of_birth} is after {today}")]
    DateOfBirthInFuture {
        date_of_birth: NaiveDate,
        today: NaiveDate,
    },
    #[error(transparent)]
    InvalidPlan(#[from] InvalidPlanError),
}

/// Scenario rates rejected at the boundary before any projection runs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} must be a finite rate greater than -1, got {value}")]
pub struct ScenarioError {
    pub field: &'static str,
    pub value: f64,
}
