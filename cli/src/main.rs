//! Blog service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/blog-service/config.toml)
//! blog-service
//!
//! # Custom config path
//! blog-service --config /etc/blog-service/config.toml
//!
//! # Override the port
//! blog-service --port 8080
//!
//! # Validate config without starting
//! blog-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use blogapp::config::AppConfig;
use blogapp::server::{init_tracing, ServerHandle, ServerOptions};

/// Blog backend with bearer-token authentication.
#[derive(Parser, Debug)]
#[command(
    name = "blog-service",
    version,
    about = "CRUD blog backend with bearer-token authentication",
    long_about = "REST API for users, password credentials and blog posts.\n\n\
                  Default config: ~/.config/blog-service/config.toml\n\
                  DATABASE_URL and JWT_SECRET override the config file."
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let (mut config, load_error) = match AppConfig::load(cli.config.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides(|key| std::env::var(key).ok());
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Algorithm   : {}", config.security.algorithm);
        println!(
            "   Token TTL   : {} min",
            config.security.access_token_expire_minutes
        );
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    if let Some(e) = load_error {
        warn!("Failed to load config: {}", e);
        warn!("Using default configuration.");
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
