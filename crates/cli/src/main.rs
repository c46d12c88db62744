//! KurdBook CLI - Drive the storefront stores from the terminal.
//!
//! State is kept in `KURDBOOK_STORAGE_DIR` (default `.kurdbook`), one file
//! per storage key, so consecutive invocations share a cart, wishlist and
//! session.
//!
//! # Usage
//!
//! ```bash
//! # Browse poetry in Kurmanji
//! kb-cli catalog list --category poetry --locale kmr
//!
//! # Fill the cart
//! kb-cli cart add book:1 --quantity 2
//! kb-cli wishlist add art:4
//! kb-cli wishlist move art:4
//! kb-cli cart list
//!
//! # Sign in with a demo account
//! kb-cli account login -e demo@kurdbook.com -p demo123
//! ```
//!
//! # Commands
//!
//! - `catalog` - Browse and search books, art and artisans
//! - `cart` - Manage the shopping cart
//! - `wishlist` - Manage saved products
//! - `favorites` - Heart and unheart products
//! - `reviews` - Read and write book reviews
//! - `account` - Sign in, register and edit the profile
//! - `admin` - Unlock the admin panel
//! - `language` - Show or change the UI language

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kurdbook_core::{BookId, Locale, ReviewId};
use kurdbook_storefront::models::CatalogRef;
use kurdbook_storefront::storage::FileStorage;
use kurdbook_storefront::{CatalogFlag, Storefront, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "kb-cli")]
#[command(author, version, about = "KurdBook storefront CLI")]
struct Cli {
    /// Display locale (ku, kmr, en, de); defaults to the saved language
    #[arg(short, long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Read and write book reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },
    /// Sign in, register and edit the profile
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Admin panel session
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show or change the UI language
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List books or art products
    List {
        /// Show art products instead of books
        #[arg(long)]
        art: bool,

        /// Category slug, e.g. poetry or textiles
        #[arg(short, long)]
        category: Option<String>,

        /// Text to search for in titles and creators
        #[arg(short, long)]
        search: Option<String>,

        /// Required flags (new, bestseller, featured, in-stock)
        #[arg(short, long = "flag")]
        flags: Vec<CatalogFlag>,
    },
    /// Show one entry, e.g. book:1 or art:2
    Show { item: CatalogRef },
    /// List categories
    Categories,
    /// List artisans and their products
    Artisans,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    List,
    /// Add a product
    Add {
        item: CatalogRef,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity (0 removes it)
    Set { item: CatalogRef, quantity: u32 },
    /// Remove a line
    Remove { item: CatalogRef },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    List,
    /// Save a product
    Add { item: CatalogRef },
    /// Remove a saved product
    Remove { item: CatalogRef },
    /// Move a saved product into the cart
    Move { item: CatalogRef },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Show favorites
    List,
    /// Heart or unheart a product
    Toggle { item: CatalogRef },
}

#[derive(Subcommand)]
enum ReviewsAction {
    /// Reviews of a book, newest first
    List { book: BookId },
    /// Write a review
    Add {
        book: BookId,
        /// Reviewer name; defaults to the signed-in user
        #[arg(short, long)]
        author: Option<String>,
        /// Star rating from 1 to 5
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        comment: String,
    },
    /// Delete a review (admin only)
    Remove { id: ReviewId },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the signed-in user
    Show,
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update profile fields
    Update {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Preferred language
        #[arg(long)]
        language: Option<Locale>,
        #[arg(long)]
        newsletter: Option<bool>,
    },
    /// Sign out
    Logout,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show whether the admin panel is unlocked
    Status,
    /// Unlock the admin panel
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Lock the admin panel
    Logout,
}

#[derive(Subcommand)]
enum LanguageAction {
    /// Show the current language
    Show,
    /// Change the language
    Set { locale: Locale },
    /// List supported languages
    List,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kurdbook_storefront=info,kb_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::open(&config.storage_dir)?;
    let mut store = Storefront::open(config, Arc::new(storage))?;
    let locale = cli.locale.unwrap_or_else(|| store.locale());

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                art,
                category,
                search,
                flags,
            } => commands::catalog::list(&store, locale, art, category, search, flags),
            CatalogAction::Show { item } => commands::catalog::show(&store, locale, item)?,
            CatalogAction::Categories => commands::catalog::categories(&store, locale),
            CatalogAction::Artisans => commands::catalog::artisans(&store, locale),
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&store, locale)?,
            CartAction::Add { item, quantity } => {
                commands::cart::add(&mut store, item, quantity)?;
            }
            CartAction::Set { item, quantity } => {
                commands::cart::set_quantity(&mut store, item, quantity)?;
            }
            CartAction::Remove { item } => commands::cart::remove(&mut store, item)?,
            CartAction::Clear => commands::cart::clear(&mut store)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::wishlist::list(&store, locale),
            WishlistAction::Add { item } => commands::wishlist::add(&mut store, item)?,
            WishlistAction::Remove { item } => commands::wishlist::remove(&mut store, item)?,
            WishlistAction::Move { item } => commands::wishlist::move_to_cart(&mut store, item)?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&store, locale),
            FavoritesAction::Toggle { item } => commands::favorites::toggle(&mut store, item)?,
        },
        Commands::Reviews { action } => match action {
            ReviewsAction::List { book } => commands::reviews::list(&store, locale, book)?,
            ReviewsAction::Add {
                book,
                author,
                rating,
                title,
                comment,
            } => commands::reviews::add(&mut store, book, author, rating, title, comment)?,
            ReviewsAction::Remove { id } => commands::reviews::remove(&mut store, id)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Show => commands::account::show(&store),
            AccountAction::Login { email, password } => {
                commands::account::login(&mut store, &email, &password).await?;
            }
            AccountAction::Register {
                email,
                name,
                password,
                phone,
            } => commands::account::register(&mut store, email, name, password, phone).await?,
            AccountAction::Update {
                name,
                phone,
                language,
                newsletter,
            } => {
                commands::account::update(&mut store, name, phone, language, newsletter).await?;
            }
            AccountAction::Logout => commands::account::logout(&mut store)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Status => commands::admin::status(&store),
            AdminAction::Login { username, password } => {
                commands::admin::login(&mut store, &username, &password)?;
            }
            AdminAction::Logout => commands::admin::logout(&mut store)?,
        },
        Commands::Language { action } => match action {
            LanguageAction::Show => commands::language::show(&store),
            LanguageAction::Set { locale } => commands::language::set(&mut store, locale)?,
            LanguageAction::List => commands::language::list(),
        },
    }
    Ok(())
}
