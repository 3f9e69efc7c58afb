use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{Profile, Scenario, project, required_retirement_income};
use crate::error::AppError;
use crate::source::ProfileSource;

/// One user's projection under one scenario, as returned by the HTTP API and
/// rendered by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub user_id: u64,
    pub full_name: String,
    pub retirement_age: u32,
    pub current_age: u32,
    pub years_to_retirement: u32,
    pub expected_years_in_retirement: u32,
    pub annual_salary_increase: f64,
    pub inflation_rate: f64,
    pub required_retirement_income: u64,
    pub expected_retirement_savings: u64,
    pub required_retirement_savings: u64,
}

impl UserProjection {
    pub fn new(profile: &Profile, scenario: &Scenario) -> Self {
        let result = project(profile, scenario);
        Self {
            user_id: profile.id(),
            full_name: profile.full_name().to_string(),
            retirement_age: profile.retirement_age(),
            current_age: profile.current_age(),
            years_to_retirement: profile.years_to_retirement(),
            expected_years_in_retirement: profile.expected_years_in_retirement(),
            annual_salary_increase: scenario.annual_salary_increase,
            inflation_rate: scenario.inflation_rate,
            required_retirement_income: required_retirement_income(
                profile,
                scenario.annual_salary_increase,
            ),
            expected_retirement_savings: result.expected_retirement_savings,
            required_retirement_savings: result.required_retirement_savings,
        }
    }

    /// Console summary: a blank line, the target age, then both totals as
    /// dollar amounts right-aligned in a ten character column.
    pub fn render(&self) -> String {
        format!(
            "\nTo retire at age {}\nYou will need:       ${:>10}\nYou will have saved: ${:>10}\n",
            self.retirement_age,
            group_thousands(self.required_retirement_savings),
            group_thousands(self.expected_retirement_savings),
        )
    }
}

/// Fetches, validates and projects one user.
pub async fn project_user(
    source: &dyn ProfileSource,
    user_id: u64,
    scenario: &Scenario,
    today: NaiveDate,
) -> Result<UserProjection, AppError> {
    let raw = source.fetch(user_id).await?;
    let profile = Profile::validate(raw, today)?;
    Ok(UserProjection::new(&profile, scenario))
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawProfile;
    use crate::source::{SourceError, UserRecord};
    use async_trait::async_trait;
    use chrono::Days;
    use std::fs;
    use std::path::Path;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    fn sample_raw() -> RawProfile {
        RawProfile {
            id: 1,
            full_name: "John Keats".to_string(),
            address: "26 Piazza di Spagna\nRome, Italy 00187".to_string(),
            date_of_birth: today()
                .checked_sub_days(Days::new(365 * 30 + 10))
                .expect("date in range"),
            life_expectancy: 90,
            retirement_age: 60,
            current_retirement_savings: 10_000.0,
            household_income: 60_000.0,
            current_savings_rate: 10.0,
            expected_rate_of_return: 10.0,
            pre_retirement_income_percent: 67.0,
        }
    }

    fn sample_projection() -> UserProjection {
        let profile = Profile::validate(sample_raw(), today()).expect("valid profile");
        UserProjection::new(&profile, &Scenario::default())
    }

    fn assert_golden_snapshot(path: &str, actual: &str) {
        let update = matches!(
            std::env::var("UPDATE_GOLDEN").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        let snapshot_path = Path::new(path);

        if update {
            if let Some(parent) = snapshot_path.parent() {
                fs::create_dir_all(parent).expect("failed to create snapshot directory");
            }
            fs::write(snapshot_path, actual).expect("failed to write golden snapshot");
            return;
        }

        let expected = fs::read_to_string(snapshot_path).unwrap_or_else(|_| {
            panic!("missing golden snapshot at {path}; run with UPDATE_GOLDEN=1 to generate")
        });
        assert_eq!(
            actual, expected,
            "snapshot mismatch for {path}; run with UPDATE_GOLDEN=1 to refresh if expected"
        );
    }

    /// Serves one fixed raw profile under every id.
    struct FixedSource(RawProfile);

    #[async_trait]
    impl ProfileSource for FixedSource {
        async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
            Err(SourceError::NotFound(id))
        }

        async fn fetch(&self, id: u64) -> Result<RawProfile, SourceError> {
            Ok(RawProfile {
                id,
                ..self.0.clone()
            })
        }
    }

    #[test]
    fn thousands_are_comma_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(903_589), "903,589");
        assert_eq!(group_thousands(1_347_347), "1,347,347");
        assert_eq!(group_thousands(12_345_678_901), "12,345,678,901");
    }

    #[test]
    fn render_right_aligns_amounts() {
        let rendered = sample_projection().render();
        assert_eq!(
            rendered,
            "\nTo retire at age 60\nYou will need:       $   903,589\nYou will have saved: $ 1,347,347\n"
        );
    }

    #[test]
    fn projection_carries_derived_horizons() {
        let projection = sample_projection();
        assert_eq!(projection.current_age, 30);
        assert_eq!(projection.years_to_retirement, 30);
        assert_eq!(projection.expected_years_in_retirement, 30);
        assert_eq!(projection.required_retirement_income, 72_817);
    }

    #[tokio::test]
    async fn project_user_validates_before_projecting() {
        let mut raw = sample_raw();
        raw.life_expectancy = 55;
        let source = FixedSource(raw);

        let err = project_user(&source, 3, &Scenario::default(), today())
            .await
            .expect_err("life expectancy before retirement");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn project_user_attaches_requested_id() {
        let source = FixedSource(sample_raw());
        let projection = project_user(&source, 8, &Scenario::default(), today())
            .await
            .expect("valid projection");
        assert_eq!(projection.user_id, 8);
        assert_eq!(projection.expected_retirement_savings, 1_347_347);
    }

    #[test]
    fn golden_snapshot_reference_projection_json() {
        let json = format!(
            "{}\n",
            serde_json::to_string(&sample_projection()).expect("projection should serialize")
        );
        assert_golden_snapshot("tests/golden/reference_projection.json", &json);
    }
}
