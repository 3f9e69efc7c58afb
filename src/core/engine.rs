use super::profile::Profile;
use super::types::{ProjectionResult, Scenario};

/// Rates closer than this are treated as equal and use the limiting form of
/// the annuity factor.
const RATE_EPSILON: f64 = 1e-9;

/// Runs both savings projections for `profile` under `scenario`.
pub fn project(profile: &Profile, scenario: &Scenario) -> ProjectionResult {
    ProjectionResult {
        expected_retirement_savings: expected_savings_at_retirement(
            profile,
            scenario.annual_salary_increase,
        ),
        required_retirement_savings: required_retirement_savings(
            profile,
            scenario.inflation_rate,
            scenario.annual_salary_increase,
        ),
    }
}

/// Yearly spending in the first year of retirement: income grown to the
/// retirement year, scaled by the pre-retirement income percent.
///
/// ```text
///                t
/// A = P × (1 + g)  × pre_retirement_income_percent
/// ```
pub fn required_retirement_income(profile: &Profile, annual_salary_increase: f64) -> u64 {
    let years = profile.years_to_retirement();
    let future_salary = profile.household_income() * compound(annual_salary_increase, years);
    round_currency(future_salary * profile.pre_retirement_income_percent())
}

/// Current savings compounded to retirement plus the future value of a growing
/// annuity of contributions.
///
/// ```text
///                           ⎛       t          t⎞
///                 t         ⎜(1 + r)  - (1 + g) ⎟
/// FV = P × (1 + r)  + PMT × ⎜───────────────────⎟
///                           ⎝       r - g       ⎠
/// ```
pub fn expected_savings_at_retirement(profile: &Profile, annual_salary_increase: f64) -> u64 {
    let years = profile.years_to_retirement();
    let r = profile.expected_rate_of_return();
    let g = annual_salary_increase;
    let contribution = profile.household_income() * profile.current_savings_rate();

    let compounded_savings = profile.current_retirement_savings() * compound(r, years);
    let contributions = contribution * growing_annuity_future_value_factor(r, g, years);
    round_currency(compounded_savings + contributions)
}

/// Lump sum needed at retirement to fund the required income for every year
/// of retirement at the real rate of return `r - i`.
///
/// ```text
///          ⎛    ⎛             -t⎞ ⎞
///          ⎜1 - ⎝(1 + (r - i))  ⎠ ⎟
/// PV = A × ⎜─────────────────────⎟
///          ⎝        r - i        ⎠
/// ```
pub fn required_retirement_savings(
    profile: &Profile,
    inflation_rate: f64,
    annual_salary_increase: f64,
) -> u64 {
    let income = required_retirement_income(profile, annual_salary_increase) as f64;
    let real_return = profile.expected_rate_of_return() - inflation_rate;
    let years = profile.expected_years_in_retirement();
    round_currency(income * annuity_present_value_factor(real_return, years))
}

fn compound(rate: f64, years: u32) -> f64 {
    (1.0 + rate).powf(years as f64)
}

fn growing_annuity_future_value_factor(r: f64, g: f64, years: u32) -> f64 {
    if (r - g).abs() < RATE_EPSILON {
        if years == 0 {
            return 0.0;
        }
        return years as f64 * (1.0 + r).powf(years as f64 - 1.0);
    }
    (compound(r, years) - compound(g, years)) / (r - g)
}

fn annuity_present_value_factor(real_return: f64, years: u32) -> f64 {
    if real_return.abs() < RATE_EPSILON {
        return years as f64;
    }
    (1.0 - (1.0 + real_return).powf(-(years as f64))) / real_return
}

/// Nearest whole currency unit, ties away from zero. Negative and NaN values
/// clamp to zero.
fn round_currency(amount: f64) -> u64 {
    amount.round().max(0.0) as u64
}
