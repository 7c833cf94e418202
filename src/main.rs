//! CLI entry point for inspektra-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use inspektra_site::{Section, Site};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inspektra-site")]
#[command(version)]
#[command(about = "Builds the Inspektra blog, webinars page and academy", long_about = None)]
struct Cli {
    /// Set the site root (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every section (the default)
    #[command(alias = "b")]
    Build {
        /// Rebuild when content, templates or config change
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new content file
    New {
        /// Section to add to
        #[arg(value_enum)]
        section: Section,

        /// Title of the new entry
        title: String,

        /// Academy category (guides, tutorials)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove generated pages
    Clean,

    /// List content in build order
    List {
        /// Section to list (all when omitted)
        #[arg(value_enum)]
        section: Option<Section>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inspektra_site=debug,info"
    } else {
        "inspektra_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command.unwrap_or(Commands::Build { watch: false }) {
        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            let report = site.build()?;
            println!("Built {}", report.summary());

            if watch {
                tokio::task::spawn_blocking(move || {
                    inspektra_site::commands::build::watch(&site)
                })
                .await??;
            }
        }

        Commands::New {
            section,
            title,
            category,
        } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Creating new {} entry: {}", section, title);
            let path = site.new_content(section, &title, category.as_deref())?;
            println!("Created {}", path.display());
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = Site::new(&base_dir)?;

            // Build first
            site.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            inspektra_site::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { section } => {
            let site = Site::new(&base_dir)?;
            inspektra_site::commands::list::run(&site, section)?;
        }
    }

    Ok(())
}
