//! blog-admin-cli: sign in and manage posts and tags over the blog API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

use std::process::ExitCode;

use blog_admin::config::{LogFormat, LoggingSettings};
use blog_admin::infra::telemetry;
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{posts, session, tags};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    telemetry::init(&LoggingSettings {
        level: cli.log_level,
        format: LogFormat::Compact,
    })?;
    let ctx = build_ctx_from_cli(&cli)?;

    match cli.command {
        Commands::Login { email, password } => session::login(&ctx, &email, password).await?,
        Commands::Logout => session::logout(&ctx)?,
        Commands::Whoami => session::whoami(&ctx)?,
        Commands::Posts(cmd) => posts::handle(&ctx, cmd.action).await?,
        Commands::Tags(cmd) => tags::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
