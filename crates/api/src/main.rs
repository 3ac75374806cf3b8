//! `oidc-session` - command-line front end for the session client
//!
//! Every command loads the configuration, restores the persisted session and
//! prints its result as JSON on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oidc_session_domain::LogFormat;
use oidc_session_infra::{config, init_tracing};
use oidc_session_lib::{commands, AppContext};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "oidc-session", version, about = "OpenID-Connect session client")]
struct Cli {
    /// Configuration file; the environment and standard locations are used otherwise
    #[arg(long, env = "OIDC_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format (`pretty` or `json`); overrides the configuration
    #[arg(long, env = "OIDC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the current session
    Status,
    /// Print the authorization URL to open in a browser
    Login,
    /// Complete a login from the provider's redirect URL
    Callback {
        /// The full URL the provider redirected to
        redirect_url: String,
    },
    /// Log out at the provider
    Logout {
        /// Only clear the local session
        #[arg(long)]
        local: bool,
    },
    /// Print the current access token
    Token,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(cli.log_format.unwrap_or(app_config.log_format));
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let ctx = AppContext::new_with_config(app_config).context("failed to initialise session")?;
    ctx.session.restore().await;

    match cli.command {
        Command::Status => print_json(&commands::status(&ctx).await?),
        Command::Login => print_json(&commands::login(&ctx).await?),
        Command::Callback { redirect_url } => {
            let outcome = commands::callback(&ctx, &redirect_url).await;
            match outcome {
                Ok(response) => print_json(&response),
                Err(err) => {
                    print_json(&commands::status(&ctx).await?)?;
                    Err(anyhow::Error::new(err).context("Fehler bei der Anmeldung"))
                }
            }
        }
        Command::Logout { local: false } => print_json(&commands::logout(&ctx).await?),
        Command::Logout { local: true } => print_json(&commands::local_logout(&ctx).await?),
        Command::Token => print_json(&commands::token(&ctx).await?),
    }
}
