//! CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gemgate_cli::{Cli, Commands, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => handlers::serve::execute(&args).await?,
        Commands::Ask(args) => match handlers::ask::execute(&args).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code());
            }
        },
    }

    Ok(())
}
