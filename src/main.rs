use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keywarden::config::Config;
use keywarden::email::EmailService;
use keywarden::handlers;
use keywarden::licensing;
use keywarden::models::Plan;
use keywarden::state::AppState;
use keywarden::store::LicenseStore;

#[derive(Parser)]
#[command(name = "keywarden", about = "License issuance and device activation server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Issue a license from the command line (no email is sent)
    Issue {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "personal")]
        plan: String,
    },
    /// Revoke a license
    Revoke {
        #[arg(long)]
        key: String,
    },
    /// List licenses in the store
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keywarden=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Issue { email, plan } => {
            let store = open_store(&config)?;
            let plan: Plan = plan
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown plan: {plan}"))?;
            let license = licensing::issue(&store, &email, plan, &config.key_prefix)?;
            println!("{}", license.key);
            Ok(())
        }
        Command::Revoke { key } => {
            let store = open_store(&config)?;
            licensing::revoke(&store, &key)?;
            println!("revoked {key}");
            Ok(())
        }
        Command::List => {
            let store = open_store(&config)?;
            for license in store.all()? {
                println!(
                    "{}\t{}\t{}\t{}/{}",
                    license.key,
                    license.email,
                    license.status.as_ref(),
                    license.active_devices(),
                    license.max_activations
                );
            }
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<LicenseStore> {
    // A corrupt store file is fatal here, never handled per-request.
    LicenseStore::open(&config.store_path)
        .with_context(|| format!("open license store at {}", config.store_path))
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let email = EmailService::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
        config.product_name.clone(),
    );

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, issue/revoke endpoints are disabled");
    }

    let state = AppState {
        store: Arc::new(store),
        email,
        key_prefix: config.key_prefix.clone(),
        admin_token: config.admin_token.clone(),
    };

    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("bind {}", config.addr()))?;
    tracing::info!(addr = %config.addr(), store = %config.store_path, "keywarden listening");

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
