use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ScenarioError;

pub const DEFAULT_ANNUAL_SALARY_INCREASE: f64 = 0.02;
pub const DEFAULT_INFLATION_RATE: f64 = 0.03;

/// Profile fields as they arrive from a profile source, before validation.
///
/// The three rate fields are whole-number percentages (`9` means 9%).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawProfile {
    pub id: u64,
    pub full_name: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub life_expectancy: i64,
    pub retirement_age: i64,
    pub current_retirement_savings: f64,
    pub household_income: f64,
    pub current_savings_rate: f64,
    pub expected_rate_of_return: f64,
    pub pre_retirement_income_percent: f64,
}

/// Planning assumptions supplied by the caller for one projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub annual_salary_increase: f64,
    pub inflation_rate: f64,
}

impl Scenario {
    pub fn new(annual_salary_increase: f64, inflation_rate: f64) -> Result<Self, ScenarioError> {
        for (field, value) in [
            ("annual salary increase", annual_salary_increase),
            ("inflation rate", inflation_rate),
        ] {
            if !value.is_finite() || value <= -1.0 {
                return Err(ScenarioError { field, value });
            }
        }
        Ok(Self {
            annual_salary_increase,
            inflation_rate,
        })
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            annual_salary_increase: DEFAULT_ANNUAL_SALARY_INCREASE,
            inflation_rate: DEFAULT_INFLATION_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub expected_retirement_savings: u64,
    pub required_retirement_savings: u64,
}
