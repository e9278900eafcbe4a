use clap::{Parser as ClapParser, Subcommand};

#[derive(ClapParser)]
#[command(name = "kestrel", about = "K and T combinators with string lambdas")]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
    /// Log compilation and dispatch decisions (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub(super) verbose: bool,
    /// Bind an outer-scope name for lambda bodies: NAME=EXPR
    #[arg(short = 'D', long = "define", global = true, value_name = "NAME=EXPR")]
    pub(super) defines: Vec<String>,
}

#[derive(Subcommand)]
pub(super) enum Commands {
    /// Compile a string lambda and show its form, parameters and body
    Compile { source: String },
    /// Run a spec against a receiver and print its result
    T {
        /// Receiver expression; text that does not evaluate is taken as a string
        receiver: String,
        /// Member name or lambda source
        spec: String,
        /// Extra argument expressions
        args: Vec<String>,
    },
    /// Run a spec against a receiver and print the receiver afterwards
    K {
        receiver: String,
        spec: String,
        args: Vec<String>,
    },
    /// Run a chained sequence of steps, each `k:SPEC` or `t:SPEC`
    Chain {
        receiver: String,
        #[arg(required = true)]
        steps: Vec<String>,
    },
}
