use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use plaza::api::{ApiClient, ListingFilter};
use plaza::app::App;
use plaza::config::Config;
use plaza::session::Session;
use plaza::{logging, ui};

#[derive(Parser)]
#[command(name = "plaza")]
#[command(about = "Terminal client for the Plaza classifieds marketplace")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        email: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Print a page of listings without entering the TUI
    Listings {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Result page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only the logged-in account's own listings
        #[arg(short, long)]
        mine: bool,
    },

    /// Print the logged-in account's favorited listings
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // No subcommand means TUI mode, which needs file logging.
    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Login { email }) => cmd_login(&config, &email).await?,
        Some(Commands::Logout) => cmd_logout(&config).await?,
        Some(Commands::Listings { search, page, mine }) => {
            cmd_listings(&config, search, page, mine).await?;
        }
        Some(Commands::Favorites) => cmd_favorites(&config).await?,
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let Some(session) = Session::load(&config.state_dir())? else {
        eprintln!("Not logged in. Run `plaza login <email>` first.");
        std::process::exit(1);
    };

    ui::install_panic_hook();
    let mut app = App::new(config, session);
    let result = app.run().await;

    // Point at the session log on exit if anything was written
    if let Some(log_path) = log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    result
}

fn api_client(config: &Config) -> ApiClient {
    ApiClient::new(&config.api.base_url)
        .with_timeout(Duration::from_secs(config.api.request_timeout_secs))
}

async fn cmd_login(config: &Config, email: &str) -> Result<()> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    let client = api_client(config);
    let auth = client.login(email, password).await?;

    let session = Session::new(auth.user, auth.tokens);
    session.save(&config.state_dir())?;

    println!("Logged in as {} ({})", session.user.full_name, session.user.email);
    Ok(())
}

async fn cmd_logout(config: &Config) -> Result<()> {
    let state_dir = config.state_dir();

    if let Some(session) = Session::load(&state_dir)? {
        let client = api_client(config).with_access_token(session.access_token());
        // Best effort; the local session is cleared either way.
        if let Err(err) = client.logout().await {
            tracing::warn!(%err, "server-side logout failed");
        }
    }

    Session::clear(&state_dir)?;
    println!("Logged out");
    Ok(())
}

async fn cmd_listings(config: &Config, search: Option<String>, page: u32, mine: bool) -> Result<()> {
    if mine {
        let client = authed_client(config)?;
        let listings = client.my_listings().await?;
        print_listing_lines("My listings", &listings);
        return Ok(());
    }

    let client = api_client(config);
    let filter = ListingFilter {
        page: Some(page),
        page_size: Some(config.ui.listings_page_size),
        search,
        ..Default::default()
    };
    let results = client.listings(&filter).await?;

    if results.results.is_empty() {
        println!("No listings found");
        return Ok(());
    }

    println!("Listings (page {page}, {} total)", results.count);
    println!("{}", "─".repeat(60));
    for listing in &results.results {
        println!(
            "#{:<6} {:<40} €{:>10}  {}",
            listing.listing_id, listing.listing_title, listing.listing_price, listing.list_location
        );
    }

    Ok(())
}

async fn cmd_favorites(config: &Config) -> Result<()> {
    let client = authed_client(config)?;
    let favorites = client.favorites().await?;
    print_listing_lines("Favorites", &favorites);
    Ok(())
}

/// Client carrying the stored session token; errors when not logged in.
fn authed_client(config: &Config) -> Result<ApiClient> {
    let session = Session::load(&config.state_dir())?
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `plaza login <email>` first."))?;
    Ok(api_client(config).with_access_token(session.access_token()))
}

fn print_listing_lines(heading: &str, listings: &[plaza::types::Listing]) {
    if listings.is_empty() {
        println!("{heading}: none");
        return;
    }
    println!("{heading} ({})", listings.len());
    println!("{}", "─".repeat(60));
    for listing in listings {
        println!(
            "#{:<6} {:<40} €{:>10}  {}",
            listing.listing_id, listing.listing_title, listing.listing_price, listing.list_location
        );
    }
}
