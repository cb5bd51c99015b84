use crate::commands::{run_aspects, run_score, AspectsCommand, ScoreArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interview_insights::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Insights",
    about = "Score mock interviews and explore aspect score history from the command line",
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
    /// Score one interview from a JSON request file
    Score(ScoreArgs),
    /// Inspect or move the aspect score history stored in a JSON file
    Aspects {
        /// Aspect store file (defaults to APP_ASPECT_STORE)
        #[arg(long, global = true)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        command: AspectsCommand,
    },
    /// Run a scripted interview series through scoring and history analytics
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
    /// Override the configured aspect store file
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Aspects { store, command } => run_aspects(store, command),
        Command::Demo(args) => run_demo(args),
    }
}
