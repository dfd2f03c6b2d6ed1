use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use savings::cli::{
    handle_audit_command, handle_balance_command, handle_card_command, handle_dist_command,
    handle_entry_command, handle_expense_command, handle_export_command, handle_report_command,
};
use savings::config::{paths::TrackerPaths, settings::Settings};
use savings::services::ProfileService;
use savings::storage::{file_io, list_users, Storage};

#[derive(Parser)]
#[command(
    name = "savings",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal finance tracker",
    long_about = "savings-cli keeps a month-by-month savings ledger, reconciles where \
                  the saved money sits, tracks credit-card bills and categorizes \
                  daily expenses, all from the command line."
)]
struct Cli {
    /// User whose records to work with
    #[arg(short, long, global = true, env = "SAVINGS_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,

    /// Monthly salary/expense entries
    #[command(subcommand)]
    Entry(savings::cli::EntryCommands),

    /// Initial balance the ledger starts from
    #[command(subcommand)]
    Balance(savings::cli::BalanceCommands),

    /// Where the saved money sits
    #[command(subcommand, alias = "distribution")]
    Dist(savings::cli::DistCommands),

    /// Credit-card charges and bills
    #[command(subcommand)]
    Card(savings::cli::CardCommands),

    /// Categorized daily expenses
    #[command(subcommand)]
    Expense(savings::cli::ExpenseCommands),

    /// Dashboard and trends
    #[command(subcommand)]
    Report(savings::cli::ReportCommands),

    /// Add categories and cards found in the history to the profile lists
    Repair,

    /// Export data
    #[command(subcommand)]
    Export(savings::cli::ExportCommands),

    /// Show recent changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Include every user's changes
        #[arg(long)]
        all_users: bool,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("savings=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| settings.default_user.clone());

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("savings-cli - Terminal personal finance tracker");
            println!();
            println!("Run 'savings --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing savings-cli at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default expense categories:");
            for category in &settings.default_categories {
                println!("  - {}", category);
            }
            println!();
            println!("Run 'savings entry add --month \"Jan 2025\" --salary 50000' to begin.");
            return Ok(());
        }
        Commands::Config => {
            println!("savings-cli Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.users_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!(
                "Initialized:     {}",
                if paths.is_initialized() { "yes" } else { "no (run 'savings init')" }
            );
            let store = paths.user_store_file(&user);
            println!(
                "Store file:      {} ({})",
                store.display(),
                file_io::inspect(&store).label()
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default user:    {}", settings.default_user);
            println!("  Date format:     {}", settings.date_format);
            println!("  Current user:    {}", user);
            let users = list_users(&paths)?;
            if !users.is_empty() {
                println!("  Users:           {}", users.join(", "));
            }
            return Ok(());
        }
        _ => {}
    }

    let storage = Storage::open_with_settings(paths, &user, &settings)?;

    match command {
        Commands::Entry(cmd) => handle_entry_command(&storage, &settings, cmd)?,
        Commands::Balance(cmd) => handle_balance_command(&storage, &settings, cmd)?,
        Commands::Dist(cmd) => handle_dist_command(&storage, &settings, cmd)?,
        Commands::Card(cmd) => handle_card_command(&storage, &settings, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Audit { limit, all_users } => handle_audit_command(&storage, limit, all_users)?,
        Commands::Repair => {
            let report = ProfileService::new(&storage).repair()?;
            if report.is_empty() {
                println!("Profile lists are up to date.");
            } else {
                for category in &report.added_categories {
                    println!("Added category: {}", category);
                }
                for card in &report.added_cards {
                    println!("Added card: {}", card);
                }
            }
        }
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
