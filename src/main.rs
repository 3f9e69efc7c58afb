use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use retirement_calc::cli::{Cli, Command, ReportArgs};
use retirement_calc::config::SourceConfig;
use retirement_calc::core::local_today;
use retirement_calc::report::project_user;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let default_level = match cli.command {
        Some(Command::Serve(_)) => "info",
        None => "warn",
    };
    init_tracing(default_level);

    let result = match cli.command {
        Some(Command::Serve(args)) => serve(args.port, &args.source).await,
        None => report(cli.report).await,
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn report(args: ReportArgs) -> anyhow::Result<()> {
    let Some(user_id) = args.user_id else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the USER_ID argument is required",
            )
            .exit();
    };

    let scenario = args.scenario()?;
    let source = args
        .source
        .build()
        .context("failed to set up profile source")?;
    let projection = project_user(source.as_ref(), user_id, &scenario, local_today())
        .await
        .with_context(|| format!("could not project retirement for user {user_id}"))?;

    println!("{}", projection.render());
    Ok(())
}

async fn serve(port: u16, source: &SourceConfig) -> anyhow::Result<()> {
    let source = source.build().context("failed to set up profile source")?;
    retirement_calc::api::run_http_server(port, Arc::from(source))
        .await
        .context("server error")
}
