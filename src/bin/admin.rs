//! CLI administration tool for tinylink.
//!
//! Manages links in the configured store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links (optionally filtered by title)
//! cargo run --bin admin -- list --query rust
//!
//! # Create a link
//! cargo run --bin admin -- create --title "Docs" --url https://docs.rs --code docs
//!
//! # Delete a link
//! cargo run --bin admin -- delete docs
//!
//! # Show where a path would redirect
//! cargo run --bin admin -- resolve /docs
//!
//! # Check that the store answers
//! cargo run --bin admin -- probe
//! ```
//!
//! # Environment Variables
//!
//! Uses the same `STORE_*`, `SEED_SOURCE`, `REMOTE_*` and `PROBE_*`
//! variables as the server (see `config`).

use tinylink::application::services::{LinkService, RedirectService};
use tinylink::config::{self, Config};
use tinylink::domain::entities::NewLink;
use tinylink::infrastructure::probe::{ProbeProgress, wait_until_ready};
use tinylink::server::build_repository;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;
use tokio::sync::watch;

/// CLI tool for managing tinylink links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List links
    List {
        /// Case-insensitive title filter
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Create a link
    Create {
        #[arg(short, long)]
        title: Option<String>,

        /// Absolute http(s) target URL
        #[arg(short, long)]
        url: Option<String>,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a link by code
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Count a click on a link
    Click { code: String },

    /// Show the target a path redirects to (does not count a click)
    Resolve { path: String },

    /// Wait for the store to become ready
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let repository = build_repository(&config)?;
    let service = Arc::new(LinkService::new(repository, config.code_length));

    match cli.command {
        Commands::List { query } => list_links(&service, &config, query).await?,
        Commands::Create {
            title,
            url,
            code,
            yes,
        } => create_link(&service, &config, title, url, code, yes).await?,
        Commands::Delete { code, yes } => delete_link(&service, code, yes).await?,
        Commands::Click { code } => {
            let link = service.record_click(&code).await?;
            println!(
                "{} {} now has {} clicks",
                "✅".green(),
                link.code.cyan(),
                link.total_clicks.to_string().bright_white().bold()
            );
        }
        Commands::Resolve { path } => {
            let redirects = RedirectService::new(service.clone());
            match redirects.lookup(&path).await {
                Some(target) => println!("  {} -> {}", path.cyan(), target.bright_white()),
                None => println!("{}", "  No redirect (dashboard would be shown)".yellow()),
            }
        }
        Commands::Probe => probe(&service, &config).await?,
    }

    Ok(())
}

/// Lists links with click counts.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code       Title                          Clicks  Target
///   ──────────────────────────────────────────────────────────────────
///   rust       The Rust Programming Language  12      https://doc.rust-lang.org/book/
/// ```
async fn list_links(service: &LinkService, config: &Config, query: Option<String>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list_filtered(query.as_deref().unwrap_or_default())
        .await?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<30} {:<7} {}",
        "Code".bright_white().bold(),
        "Title".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<30} {:<7} {}",
            link.code.cyan(),
            link.title,
            link.total_clicks.to_string().bright_black(),
            link.target_url.bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}  (short URLs under {})",
        links.len().to_string().bright_white().bold(),
        config.base_url
    );
    println!();

    Ok(())
}

/// Creates a link, prompting for missing fields.
async fn create_link(
    service: &LinkService,
    config: &Config,
    title: Option<String>,
    url: Option<String>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create link".bright_blue().bold());
    println!();

    let title = match title {
        Some(t) => t,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let target_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    println!("  Title:  {}", title.cyan());
    println!("  Target: {}", target_url.cyan());
    if let Some(code) = &code {
        println!("  Code:   {}", code.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create(NewLink {
            title,
            target_url,
            code,
        })
        .await?;

    println!("{}", "✅ Link created".green().bold());
    println!(
        "  {}",
        service
            .short_url(&config.base_url, &link.code)
            .bright_yellow()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: String, skip_confirm: bool) -> Result<()> {
    let link = service.get(&code).await?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Title:  {}", link.title);
    println!("  Target: {}", link.target_url.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(&code).await?;
    println!("{}", "✅ Link deleted".green().bold());

    Ok(())
}

/// Runs the readiness probe against the configured store.
async fn probe(service: &LinkService, config: &Config) -> Result<()> {
    println!("{}", "Checking link store...".bright_blue());

    let (tx, _rx) = watch::channel(ProbeProgress::default());
    let outcome = wait_until_ready(&service.repository(), &config.probe_config(), &tx).await?;

    println!(
        "{} after {} attempt(s) in {:.1}s",
        "✅ Store ready".green().bold(),
        outcome.attempts,
        outcome.elapsed.as_secs_f64()
    );

    Ok(())
}
