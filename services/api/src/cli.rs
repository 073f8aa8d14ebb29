use crate::analyze::{run_analyze, run_interactive, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ethos_deliver::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ETHOS-DELIVER",
    about = "Ethical priority triage for delivery dispatch, over HTTP or from the command line",
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
    /// Triage a single package description and print the decision
    Analyze(AnalyzeArgs),
    /// Prompt for package descriptions until 'q' is entered
    Interactive,
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
        // the fallback classifier uses a blocking HTTP client
        Command::Analyze(args) => tokio::task::spawn_blocking(move || run_analyze(args)).await?,
        Command::Interactive => tokio::task::spawn_blocking(run_interactive).await?,
    }
}
