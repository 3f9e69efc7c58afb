use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::RawProfile;

/// A user record as served by the users API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserRecord {
    pub user_info: UserInfo,
    pub assumptions: PlanAssumptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserInfo {
    pub date_of_birth: NaiveDate,
    pub household_income: f64,
    pub current_savings_rate: f64,
    pub current_retirement_savings: f64,
    pub full_name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlanAssumptions {
    pub pre_retirement_income_percent: f64,
    pub life_expectancy: i64,
    pub expected_rate_of_return: f64,
    pub retirement_age: i64,
}

impl UserRecord {
    /// The record does not carry its own id; callers attach the one they
    /// looked it up by.
    pub fn into_raw_profile(self, id: u64) -> RawProfile {
        let UserRecord {
            user_info,
            assumptions,
        } = self;
        RawProfile {
            id,
            full_name: user_info.full_name,
            address: user_info.address,
            date_of_birth: user_info.date_of_birth,
            life_expectancy: assumptions.life_expectancy,
            retirement_age: assumptions.retirement_age,
            current_retirement_savings: user_info.current_retirement_savings,
            household_income: user_info.household_income,
            current_savings_rate: user_info.current_savings_rate,
            expected_rate_of_return: assumptions.expected_rate_of_return,
            pre_retirement_income_percent: assumptions.pre_retirement_income_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_payload_flattens_into_raw_profile() {
        let json = r#"{
          "user_info": {
            "date_of_birth": "1994-06-05",
            "household_income": 60000,
            "current_savings_rate": 10,
            "current_retirement_savings": 10000,
            "full_name": "John Keats",
            "address": "26 Piazza di Spagna\nRome, Italy 00187"
          },
          "assumptions": {
            "pre_retirement_income_percent": 67,
            "life_expectancy": 90,
            "expected_rate_of_return": 10,
            "retirement_age": 60
          }
        }"#;
        let record: UserRecord = serde_json::from_str(json).expect("record should parse");
        let raw = record.into_raw_profile(42);

        assert_eq!(raw.id, 42);
        assert_eq!(raw.full_name, "John Keats");
        assert_eq!(
            raw.date_of_birth,
            NaiveDate::from_ymd_opt(1994, 6, 5).expect("valid date")
        );
        assert_eq!(raw.life_expectancy, 90);
        assert_eq!(raw.retirement_age, 60);
        assert_eq!(raw.household_income, 60_000.0);
        assert_eq!(raw.current_retirement_savings, 10_000.0);
        assert_eq!(raw.current_savings_rate, 10.0);
        assert_eq!(raw.expected_rate_of_return, 10.0);
        assert_eq!(raw.pre_retirement_income_percent, 67.0);
    }

    #[test]
    fn missing_assumptions_group_is_rejected() {
        let json = r#"{"user_info": {
            "date_of_birth": "1994-06-05",
            "household_income": 60000,
            "current_savings_rate": 10,
            "current_retirement_savings": 10000,
            "full_name": "John Keats",
            "address": "Rome"
        }}"#;
        let err = serde_json::from_str::<UserRecord>(json).expect_err("incomplete record");
        assert!(err.to_string().contains("assumptions"));
    }
}
