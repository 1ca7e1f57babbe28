use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod auth;
pub mod serve;

use crate::api;

#[derive(Subcommand)]
enum Command {
    /// Run the relay server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port, overriding PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the Google consent URL
    AuthUrl {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Values in a local .env file are picked up but never override the
    // real environment
    dotenvy::dotenv().ok();
    api::init_tracing();

    // Handle each sub command, serving when none is given
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::AuthUrl {}) => {
            auth::run()?;
        }
        None => {
            serve::run(String::from("0.0.0.0"), None).await?;
        }
    }

    Ok(())
}
