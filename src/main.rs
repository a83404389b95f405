//! User service entry point.

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use user_service::api::{create_router, AppState};
use user_service::client::ServiceClient;
use user_service::config::{Config, LogFormat};
use user_service::metrics;
use user_service::models::UserPayload;
use user_service::openapi::openapi_json;
use user_service::seed::{self, JsonSummary};
use user_service::utils::shutdown_signal;

/// In-memory user directory service.
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(about = "User CRUD API with static frontend hosting")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Probe the health endpoint of a running server.
    CheckHealth {
        /// Server address.
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },

    /// List users and create a test user on a running server.
    SmokeUsers {
        /// Server address.
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },

    /// Write generated users to a JSON file usable as SEED_FILE.
    GenerateUsers {
        /// Number of users.
        #[arg(short, long, default_value_t = 10)]
        count: u32,
        /// Output file path.
        #[arg(short, long, default_value = "users.json")]
        output: PathBuf,
    },

    /// Check that a file is valid JSON and summarize it.
    ValidateJson {
        /// JSON file path.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the OpenAPI document.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives the log format, so load it before logging
    let config = Config::load();
    init_logging(args.verbose, config.as_ref().ok());

    let mut config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // Handle subcommands
    match args.command {
        Some(Command::Serve) | None => cmd_serve(config).await,
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::CheckHealth { url }) => cmd_check_health(&url).await,
        Some(Command::SmokeUsers { url }) => cmd_smoke_users(&url).await,
        Some(Command::GenerateUsers { count, output }) => cmd_generate_users(count, &output),
        Some(Command::ValidateJson { file }) => cmd_validate_json(&file),
        Some(Command::Openapi) => cmd_openapi(),
    }
}

/// Install the tracing subscriber.
fn init_logging(verbose: bool, config: Option<&Config>) {
    let filter = if verbose {
        EnvFilter::new("user_service=debug,info")
    } else {
        config
            .and_then(|c| EnvFilter::try_new(&c.rust_log).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    };

    let format = config.map(|c| c.log_format).unwrap_or_default();
    let (text, json) = match format {
        LogFormat::Text => (Some(fmt::layer()), None),
        LogFormat::Json => (None, Some(fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

/// Run the HTTP service until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    // Initialize metrics
    metrics::init_metrics();
    if let Some(addr) = config.metrics_addr()? {
        metrics::install_exporter(addr)?;
    }

    // Build the store
    let store = seed::initial_store(&config).map_err(|e| {
        error!("Failed to load seed users: {}", e);
        e
    })?;
    info!(users = store.len(), "User store ready");

    let app_state = AppState::new(store);
    let router = create_router(app_state, &config)?;

    // Start HTTP server
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;
    info!("HTTP server listening on {}", addr);
    info!("API: http://localhost:{}/api", config.port);
    info!("Health check: http://localhost:{}/api/health", config.port);
    info!("Users: http://localhost:{}/api/users", config.port);
    info!("Frontend: {}", config.frontend_dist.display());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USER SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    if let Some(path) = &config.seed_file {
        print!("Loading seed file... ");
        match seed::load_users(path) {
            Ok(users) => println!("OK ({} users)", users.len()),
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("Seed file invalid"));
            }
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.bind_host, config.port);
    println!("  Frontend Dist: {}", config.frontend_dist.display());
    println!("  CORS Origins: {}", config.cors_origins.join(", "));
    println!(
        "  Seed File: {}",
        config
            .seed_file
            .as_ref()
            .map_or_else(|| "(demo users)".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Metrics: {}",
        config
            .metrics_port
            .map_or_else(|| "Disabled".to_string(), |p| format!("port {}", p))
    );
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Probe the health endpoint of a running server.
async fn cmd_check_health(url: &str) -> anyhow::Result<()> {
    let client = ServiceClient::new(url);
    println!("Checking health: {}", client.health_url());

    match client.health().await {
        Ok(response) => {
            println!("Service is up ({})", response.code);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            println!("Health check failed: {}", e);
            println!("Make sure the server is running at {}", client.base_url());
            Err(e.into())
        }
    }
}

/// List users, then create one, against a running server.
async fn cmd_smoke_users(url: &str) -> anyhow::Result<()> {
    let client = ServiceClient::new(url);

    println!("Listing users: {}", client.users_url());
    let listed = client.list_users().await?;
    let users = listed.data.unwrap_or_default();
    println!("  {} users", users.len());
    for (index, user) in users.iter().take(3).enumerate() {
        println!("  {}. {} ({})", index + 1, user.name, user.email);
    }

    println!("Creating test user...");
    let created = client
        .create_user(&UserPayload::new("Test User", "test@example.com"))
        .await?;
    match created.data {
        Some(user) => println!("  Created user {} on {}", user.id, user.created_at),
        None => println!("  {}", created.message),
    }

    Ok(())
}

/// Write generated users to `output`.
fn cmd_generate_users(count: u32, output: &std::path::Path) -> anyhow::Result<()> {
    println!("Generating {} users...", count);

    let users = seed::generate_users(count, Local::now().date_naive());
    std::fs::write(output, serde_json::to_string_pretty(&users)?)?;

    println!("Wrote {} users to {}", users.len(), output.display());
    Ok(())
}

/// Check that `file` holds valid JSON and describe it.
fn cmd_validate_json(file: &std::path::Path) -> anyhow::Result<()> {
    println!("Validating {}", file.display());

    let content = std::fs::read_to_string(file)?;
    match seed::summarize_json(&content)? {
        JsonSummary::Users { total, preview } => {
            println!("Valid JSON: {} user records", total);
            for (index, user) in preview.iter().enumerate() {
                println!("  {}. {} ({})", index + 1, user.name, user.email);
            }
            if total > preview.len() {
                println!("  ... {} more", total - preview.len());
            }
        }
        JsonSummary::Other { keys } => {
            println!("Valid JSON (not a user list)");
            for key in keys {
                println!("  - {}", key);
            }
        }
    }

    Ok(())
}

/// Print the OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    println!("{}", openapi_json()?);
    Ok(())
}
