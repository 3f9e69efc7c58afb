use clap::{Args, Parser, Subcommand};

use crate::config::SourceConfig;
use crate::core::{DEFAULT_ANNUAL_SALARY_INCREASE, DEFAULT_INFLATION_RATE, Scenario, ScenarioError};

#[derive(Parser, Debug)]
#[command(
    name = "retirement-calc",
    version,
    about = "Projects how much a user will need, and will have saved, by their retirement age",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve projections over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(help = "The ID of the target user")]
    pub user_id: Option<u64>,
    #[arg(
        short = 'r',
        long,
        default_value_t = DEFAULT_ANNUAL_SALARY_INCREASE,
        help = "The annual expected salary increase for the target user"
    )]
    pub annual_salary_increase: f64,
    #[arg(
        short = 'i',
        long,
        default_value_t = DEFAULT_INFLATION_RATE,
        help = "The inflation rate used to calculate the purchasing power of future savings"
    )]
    pub inflation_rate: f64,
    #[command(flatten)]
    pub source: SourceConfig,
}

impl ReportArgs {
    pub fn scenario(&self) -> Result<Scenario, ScenarioError> {
        Scenario::new(self.annual_salary_increase, self.inflation_rate)
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub source: SourceConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_uses_default_scenario() {
        let cli = Cli::try_parse_from(["retirement-calc", "1"]).expect("user id parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.report.user_id, Some(1));
        assert_eq!(
            cli.report.scenario().expect("default scenario"),
            Scenario::default()
        );
    }

    #[test]
    fn short_flags_set_scenario_rates() {
        let cli = Cli::try_parse_from(["retirement-calc", "7", "-r", "0.04", "-i", "0.025"])
            .expect("flags parse");
        let scenario = cli.report.scenario().expect("valid scenario");
        assert_eq!(scenario.annual_salary_increase, 0.04);
        assert_eq!(scenario.inflation_rate, 0.025);
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        assert!(Cli::try_parse_from(["retirement-calc", "one"]).is_err());
        assert!(Cli::try_parse_from(["retirement-calc", "-5"]).is_err());
    }

    #[test]
    fn serve_subcommand_takes_port() {
        let cli = Cli::try_parse_from(["retirement-calc", "serve", "--port", "9000"])
            .expect("serve parses");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, 9000),
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
