use chrono::{Local, NaiveDate};

use super::error::{InvalidPlanError, ValidationError};
use super::types::RawProfile;

const DAYS_PER_YEAR: f64 = 365.25;

type PlanCheck = fn(&Profile) -> Result<(), InvalidPlanError>;

/// Evaluated in order; the first failure is reported.
const PLAN_CHECKS: [PlanCheck; 2] = [
    check_retirement_after_current_age,
    check_life_expectancy_after_retirement,
];

/// A validated individual record.
///
/// Only [`Profile::validate`] builds one, so every instance satisfies
/// `retirement_age > current_age` and `life_expectancy > retirement_age` for
/// its evaluation date. Rate fields are stored as fractions (`0.09` for 9%).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    id: u64,
    full_name: String,
    address: String,
    date_of_birth: NaiveDate,
    life_expectancy: u32,
    retirement_age: u32,
    current_retirement_savings: f64,
    household_income: f64,
    current_savings_rate: f64,
    expected_rate_of_return: f64,
    pre_retirement_income_percent: f64,
    as_of: NaiveDate,
}

impl Profile {
    /// Validates `raw` as of `today`, which is also the date every derived
    /// age of the returned profile is measured against.
    pub fn validate(raw: RawProfile, today: NaiveDate) -> Result<Self, ValidationError> {
        let life_expectancy = positive_years("life expectancy", raw.life_expectancy)?;
        let retirement_age = positive_years("retirement age", raw.retirement_age)?;
        let current_retirement_savings =
            non_negative_amount("current retirement savings", raw.current_retirement_savings)?;
        let household_income = non_negative_amount("household income", raw.household_income)?;
        let current_savings_rate =
            percent_to_fraction("current savings rate", raw.current_savings_rate)?;
        let expected_rate_of_return =
            percent_to_fraction("expected rate of return", raw.expected_rate_of_return)?;
        let pre_retirement_income_percent = percent_to_fraction(
            "pre-retirement income percent",
            raw.pre_retirement_income_percent,
        )?;

        if raw.date_of_birth > today {
            return Err(ValidationError::DateOfBirthInFuture {
                date_of_birth: raw.date_of_birth,
                today,
            });
        }

        let profile = Self {
            id: raw.id,
            full_name: raw.full_name,
            address: raw.address,
            date_of_birth: raw.date_of_birth,
            life_expectancy,
            retirement_age,
            current_retirement_savings,
            household_income,
            current_savings_rate,
            expected_rate_of_return,
            pre_retirement_income_percent,
            as_of: today,
        };

        for check in PLAN_CHECKS {
            check(&profile)?;
        }
        Ok(profile)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn life_expectancy(&self) -> u32 {
        self.life_expectancy
    }

    pub fn retirement_age(&self) -> u32 {
        self.retirement_age
    }

    pub fn current_retirement_savings(&self) -> f64 {
        self.current_retirement_savings
    }

    pub fn household_income(&self) -> f64 {
        self.household_income
    }

    pub fn current_savings_rate(&self) -> f64 {
        self.current_savings_rate
    }

    pub fn expected_rate_of_return(&self) -> f64 {
        self.expected_rate_of_return
    }

    pub fn pre_retirement_income_percent(&self) -> f64 {
        self.pre_retirement_income_percent
    }

    /// Whole years since birth, using a 365.25-day year truncated toward zero.
    pub fn current_age(&self) -> u32 {
        age_on(self.date_of_birth, self.as_of)
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age - self.current_age()
    }

    pub fn expected_years_in_retirement(&self) -> u32 {
        self.life_expectancy - self.retirement_age
    }
}

/// The local calendar date, used as the evaluation date for live requests.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - date_of_birth).num_days().max(0);
    (days as f64 / DAYS_PER_YEAR) as u32
}

fn check_retirement_after_current_age(profile: &Profile) -> Result<(), InvalidPlanError> {
    let current_age = profile.current_age();
    if profile.retirement_age <= current_age {
        return Err(InvalidPlanError::RetirementNotAfterCurrentAge {
            retirement_age: profile.retirement_age,
            current_age,
        });
    }
    Ok(())
}

fn check_life_expectancy_after_retirement(profile: &Profile) -> Result<(), InvalidPlanError> {
    if profile.life_expectancy <= profile.retirement_age {
        return Err(InvalidPlanError::LifeExpectancyNotAfterRetirement {
            life_expectancy: profile.life_expectancy,
            retirement_age: profile.retirement_age,
        });
    }
    Ok(())
}

fn positive_years(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::YearsOutOfRange { field, value })
}

fn non_negative_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Converts a written percentage to its fractional form (9 -> 0.09).
fn percent_to_fraction(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if !(0.0..100.0).contains(&value) {
        return Err(ValidationError::RateOutOfRange { field, value });
    }
    Ok(value / 100.0)
}
