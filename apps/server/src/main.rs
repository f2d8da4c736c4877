//! dealwatch - Woot deal watcher
//!
//! Polls the Woot affiliate API when triggered over HTTP, emails new
//! keyword matches, and tracks what has already been notified.

mod config;
mod http;
mod run;

use clap::Parser;
use config::Config;
use dealwatch_alerts::{Notifier, SeenStore, SmtpMailer};
use dealwatch_feeds::WootClient;
use http::AppState;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// dealwatch CLI
#[derive(Parser, Debug)]
#[command(name = "dealwatch")]
#[command(about = "Woot deal watcher with email alerts", long_about = None)]
struct Args {
    /// Port to listen on for scheduler triggers
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Configuration error");
            std::process::exit(1);
        }
    };

    info!("dealwatch starting...");
    info!("  Category: {}", config.feed_category);
    info!("  Keywords: {}", config.keywords.join(", "));
    info!("  Recipient: {}", config.email_recipient);
    info!("  Seen set: {}", config.seen_path.display());

    let mailer = match SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        &config.smtp_username,
        &config.smtp_password,
        &config.email_from,
        &config.email_recipient,
    ) {
        Ok(mailer) => mailer,
        Err(err) => {
            error!(error = %err, "SMTP configuration error");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        source: WootClient::new(&config.woot_api_key, &config.feed_category),
        store: SeenStore::new(&config.seen_path),
        notifier: Notifier::new(mailer),
        keywords: config.keywords,
    });

    let app = http::router(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, port = args.port, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Listening on 0.0.0.0:{}", args.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server error");
    }
}
