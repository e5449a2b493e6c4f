//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Blog content and draft previews for a portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Include drafts and posts pending review
        #[arg(long)]
        drafts: bool,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Case-insensitive search over title, summary and tags
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single post, whatever its status
    Show {
        slug: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a preview token grants access to a post
    Preview {
        slug: String,

        /// Token in the form <hex-signature>.<epoch-millis-expiry>
        #[arg(short, long)]
        token: String,
    },

    /// Tag counts over published posts
    Tags,

    /// Write sitemap.xml for published posts
    Sitemap {
        /// Output file, or - for stdout (defaults to <public_dir>/sitemap.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report unreadable files and duplicate slugs
    Check,

    /// Start the JSON API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let load = || -> Result<folio::Folio> {
        let folio = folio::Folio::new(&base_dir)?;
        tracing::debug!("Content directory: {:?}", folio.posts().dir());
        Ok(folio)
    };

    match cli.command {
        Commands::List {
            drafts,
            tag,
            search,
        } => {
            let options = commands::list::ListOptions {
                include_drafts: drafts,
                tag,
                search,
            };
            commands::list::run(&load()?, &options)?;
        }

        Commands::Show { slug, json } => {
            commands::show::run(&load()?, &slug, json)?;
        }

        Commands::Preview { slug, token } => {
            commands::preview::run(&load()?, &slug, &token)?;
        }

        Commands::Tags => {
            commands::tags::run(&load()?)?;
        }

        Commands::Sitemap { output } => {
            commands::sitemap::run(&load()?, output.as_deref())?;
        }

        Commands::Check => {
            commands::check::run(&load()?)?;
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(load()?, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
