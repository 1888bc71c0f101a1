use crate::demo::{run_demo, run_import, run_simulate, DemoArgs, ImportArgs, SimulateArgs};
use crate::server;
use calculette::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Calculette",
    about = "Simulate client margins and serve the margin simulation API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a single margin simulation from command-line inputs
    Simulate(SimulateArgs),
    /// Validate a commercial parameters CSV export and report what it would change
    Import(ImportArgs),
    /// Walk through sample clients and proposals in the terminal
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulate(args),
        Command::Import(args) => run_import(args),
        Command::Demo(args) => run_demo(args),
    }
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
    fn missing_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["calculette-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn simulate_requires_exactly_one_cost_source() {
        let both = Cli::try_parse_from([
            "calculette-api",
            "simulate",
            "--salary",
            "75000",
            "--hourly-rate",
            "80",
            "--proposed-rate",
            "115",
        ]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["calculette-api", "simulate", "--proposed-rate", "115"]);
        assert!(neither.is_err());
    }

    #[test]
    fn simulate_accepts_decimal_comma() {
        let cli = Cli::try_parse_from([
            "calculette-api",
            "simulate",
            "--hourly-rate",
            "80,47",
            "--proposed-rate",
            "115",
            "--target-rate",
            "120",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Simulate(args)) => {
                assert_eq!(args.hourly_rate, Some(rust_decimal_macros::dec!(80.47)));
            }
            other => panic!("expected simulate command, got {other:?}"),
        }
    }
}
