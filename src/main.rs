use clap::Parser as ClapParser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/commands.rs"]
mod commands;
#[path = "main/shared.rs"]
mod shared;

use cli::{Cli, Commands};
use commands::{cmd_chain, cmd_compile, cmd_k, cmd_t};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let host = shared::build_host(&cli.defines).unwrap_or_else(|e| shared::fail(e));

    match &cli.command {
        Commands::Compile { source } => cmd_compile(source, &host),
        Commands::T {
            receiver,
            spec,
            args,
        } => cmd_t(receiver, spec, args, &host),
        Commands::K {
            receiver,
            spec,
            args,
        } => cmd_k(receiver, spec, args, &host),
        Commands::Chain { receiver, steps } => cmd_chain(receiver, steps, &host),
    }
}
