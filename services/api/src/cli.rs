use crate::demo::{run_demo, run_score, run_take, DemoArgs, ScoreArgs, TakeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use motivation_catalyst::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Motivation Catalyst",
    about = "Run the motivation assessment service or take the questionnaire from the terminal",
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
    /// Take the questionnaire interactively and print the full profile
    Take(TakeArgs),
    /// Print the profile produced by one of the demo answer sets
    Demo(DemoArgs),
    /// Score every respondent in a CSV answer sheet
    Score(ScoreArgs),
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
        Command::Take(args) => run_take(args),
        Command::Demo(args) => run_demo(args),
        Command::Score(args) => run_score(args),
    }
}
