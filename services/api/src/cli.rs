use agentcast::broadcast::geography;
use agentcast::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Agent Broadcast Service",
    about = "Run and demo the broadcast targeting service from the command line",
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
    /// Print the resolved town list for a state and county
    Towns(TownsArgs),
    /// Run an end-to-end CLI demo covering preferences, matching, and dispatch
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

#[derive(Args, Debug)]
pub(crate) struct TownsArgs {
    /// Two-letter state code or full state name
    #[arg(long)]
    pub(crate) state: String,
    /// County to resolve; defaults to every county in the state
    #[arg(long, default_value = geography::ALL_COUNTIES)]
    pub(crate) county: String,
    /// Also list the known sub-areas under each resolved town
    #[arg(long)]
    pub(crate) sub_areas: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Towns(args) => run_towns(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_towns(args: TownsArgs) -> Result<(), AppError> {
    let code = geography::normalize_state_code(&args.state);
    let towns = geography::resolve_towns(&args.state, &args.county);

    if towns.is_empty() {
        println!("no towns on file for {code} ({})", args.county);
        return Ok(());
    }

    println!("{} town(s) in {code} ({})", towns.len(), args.county);
    for town in &towns {
        println!("  {town}");
        if args.sub_areas {
            for area in geography::resolve_sub_areas(&code, town) {
                println!("    {town} – {area}");
            }
        }
    }

    Ok(())
}
