//! Portal - drive the sign-up, sign-in and subscribe flows from the shell.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, ClientConfig};
use portal_lib::components::INVALID_EMAIL_MESSAGE;
use portal_lib::{AppState, CanActivate, SubmitEvent, SubmitOutcome, TracingNotifier};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "User registration and sign-in client")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL
    #[arg(long, global = true, env = "PORTAL_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirm: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Sign in and print whether a token was issued
    Login {
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        password: String,
    },
    /// Subscribe an email address to the newsletter
    Subscribe {
        #[arg(long)]
        email: String,
    },
    /// Check whether a protected route would activate
    CheckRoute {
        #[arg(long)]
        path: String,
        /// Access token to check with
        #[arg(long, env = "PORTAL_TOKEN")]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }

    let state = AppState::from_config(config, Arc::new(TracingNotifier))?;

    match cli.command {
        Commands::Register {
            user_name,
            password,
            password_confirm,
            email,
            first_name,
            last_name,
        } => {
            let mut sign_up = state.sign_up();
            sign_up.input("userName", user_name)?;
            sign_up.input("passwords.password", password)?;
            sign_up.input("passwords.passwordConfirm", password_confirm)?;
            sign_up.input("email", email)?;
            sign_up.input("firstName", first_name)?;
            sign_up.input("lastName", last_name)?;

            let outcome = sign_up.submit(&mut SubmitEvent::new()).await;
            if outcome == SubmitOutcome::Invalid {
                for (path, errors) in sign_up.form().error_map() {
                    for (_, detail) in errors.iter() {
                        eprintln!("{}: {}", path, detail.message());
                    }
                }
            }
            finish(outcome)?;
        }
        Commands::Login {
            user_name,
            password,
        } => {
            let mut sign_in = state.sign_in();
            sign_in.input("userName", user_name)?;
            sign_in.input("password", password)?;
            finish(sign_in.submit(&mut SubmitEvent::new()).await)?;
        }
        Commands::Subscribe { email } => {
            if !state.subscribe().on_submit(&email) {
                return Err(AppError::validation(INVALID_EMAIL_MESSAGE).into());
            }
        }
        Commands::CheckRoute { path, token } => {
            if let Some(token) = token {
                state.auth.set_token(token);
            }
            let guard = state.auth_guard();
            if guard.can_activate(&path) {
                println!("{}: allowed", path);
            } else {
                println!("{}: redirect to {}", path, guard.login_route());
            }
        }
    }

    Ok(())
}

/// Turn a non-successful submission into a process error.
fn finish(outcome: SubmitOutcome) -> Result<(), AppError> {
    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Invalid => Err(AppError::validation("Form is invalid")),
        SubmitOutcome::Rejected(message) | SubmitOutcome::Failed(message) => {
            Err(AppError::validation(message))
        }
    }
}
