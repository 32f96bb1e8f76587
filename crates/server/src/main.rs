use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_mcp_sdk::{
    mcp_server::{hyper_server, HyperServerOptions},
    schema::{
        Implementation, InitializeResult, ServerCapabilities, ServerCapabilitiesTools,
        LATEST_PROTOCOL_VERSION,
    },
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use odocs_client::DocsResolver;
use odocs_core::DetectedPackage;
use odocs_server::{detection::detect_packages, Config, OdocsHandler};

#[derive(Parser)]
#[command(
    name = "odocs",
    about = "Solving version blindness in AI-assisted development",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Log level filter", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the documentation server")]
    Serve {
        #[arg(short, long, help = "Port to run the server on")]
        port: Option<u16>,
    },

    #[command(about = "Detect packages and versions in the current project")]
    Detect,

    #[command(about = "Pull documentation for a package")]
    Pull {
        #[arg(help = "Package name")]
        package: String,

        #[arg(help = "Package version (defaults to latest)")]
        version: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Detect => run_detect().await,
        Commands::Pull { package, version } => run_pull(config, &package, version.as_deref()).await,
        Commands::Serve { port } => run_serve(config, port).await,
    }
}

async fn run_detect() -> Result<()> {
    println!("Scanning package.json...");
    let packages = detect_packages(&std::env::current_dir()?).await;

    if packages.is_empty() {
        println!("No supported packages detected.");
    } else {
        println!("Detected packages:");
        for pkg in &packages {
            println!("  - {}:{}", pkg.name, pkg.version);
        }
    }

    Ok(())
}

async fn run_pull(config: Config, package: &str, version: Option<&str>) -> Result<()> {
    config.validate()?;
    let resolver = DocsResolver::from_config(&config.client_config())?;

    let specifier = version.unwrap_or("latest");
    println!("Pulling documentation for {package}@{specifier}...");

    match resolver.resolve(package, specifier).await {
        Ok(doc) => {
            println!(
                "Documentation fetched successfully for {}@{}",
                doc.package, doc.version
            );
            Ok(())
        }
        Err(e) => {
            error!(%package, specifier, error = %e, "Error fetching documentation");
            std::process::exit(1);
        }
    }
}

async fn run_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Scanning package.json...");
    let packages = detect_packages(&std::env::current_dir()?).await;

    if packages.is_empty() {
        println!("No supported packages detected.");
    } else {
        println!("Detected packages:");
        for pkg in &packages {
            println!("  - {}:{}", pkg.name, pkg.version);
        }
    }

    let handler = OdocsHandler::new(config.clone(), packages.clone())?;

    if !packages.is_empty() {
        println!("Pulling documentation for detected packages...");
        prefetch_documentation(handler.resolver(), &packages).await;
    }

    let server_details = InitializeResult {
        server_info: Implementation {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools::default()),
            ..Default::default()
        },
        instructions: Some(
            "Serves version-pinned package documentation for the current project".to_string(),
        ),
        meta: None,
        protocol_version: LATEST_PROTOCOL_VERSION.into(),
    };

    info!(
        bind_address = %config.server.bind_address,
        port = config.server.port,
        "Starting documentation server"
    );
    println!(
        "Server running at http://{}:{}/",
        config.server.bind_address, config.server.port
    );

    let server = hyper_server::create_server(
        server_details,
        handler,
        HyperServerOptions {
            host: config.server.bind_address.clone(),
            port: config.server.port,
            ping_interval: Duration::from_secs(5),
            ..Default::default()
        },
    );

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Prefetch documentation for every detected package concurrently.
/// Partial-failure tolerant: each package reports its own outcome and a
/// failure never aborts the server start.
async fn prefetch_documentation(resolver: Arc<DocsResolver>, packages: &[DetectedPackage]) {
    let results = futures::future::join_all(packages.iter().map(|pkg| {
        let resolver = Arc::clone(&resolver);
        async move {
            let outcome = resolver.resolve(&pkg.name, &pkg.version).await;
            (pkg, outcome)
        }
    }))
    .await;

    let mut pulled = Vec::new();
    let mut failed = Vec::new();
    for (pkg, outcome) in results {
        match outcome {
            Ok(doc) => pulled.push(format!("{}@{}", doc.package, doc.version)),
            Err(e) => {
                warn!(package = %pkg.name, version = %pkg.version, error = %e, "Prefetch failed");
                failed.push(format!("{}@{}: {e}", pkg.name, pkg.version));
            }
        }
    }

    if !pulled.is_empty() {
        println!("Documentation pulled successfully for:");
        for entry in pulled {
            println!("  - {entry}");
        }
    }
    if !failed.is_empty() {
        println!("Failed to pull documentation for:");
        for entry in failed {
            println!("  - {entry}");
        }
    }
}
