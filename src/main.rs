use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use allowance_tracker::cli::{
    handle_backup_command, handle_expense_command, handle_export_command, handle_history,
    handle_report, handle_reset, handle_set_allowance, handle_set_goal, handle_status, open_store,
    parse_date, BackupCommands, ExpenseCommands, ExportCommands,
};
use allowance_tracker::config::{Settings, TrackerPaths};
use allowance_tracker::error::TrackerResult;
use allowance_tracker::models::LedgerRecord;
use allowance_tracker::services::ExpenseFilter;
use allowance_tracker::storage::{JsonFileStorage, LedgerPersistence};

#[derive(Parser)]
#[command(
    name = "allowance",
    version,
    about = "Track a monthly allowance, a savings goal and day-to-day spending",
    long_about = "Keeps a monthly allowance, a savings goal and a list of expenses, \
                  and shows how much can be spent per day for the rest of the month."
)]
struct Cli {
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "ALLOWANCE_TRACKER_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balance, daily budget, health and savings progress
    #[command(alias = "dashboard")]
    Status {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the monthly allowance
    Allowance {
        /// Amount (e.g. 1000 or 750.50)
        amount: String,
    },

    /// Set the savings goal
    Goal {
        /// Amount (e.g. 500)
        amount: String,
    },

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Spending by category
    Report {
        /// all, today or week
        #[arg(short, long, default_value = "all")]
        filter: ExpenseFilter,
    },

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Clear allowance, goal and all expenses
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    allowance_tracker::logging::init();

    let cli = Cli::parse();
    run(cli).map_err(|e| {
        if e.is_not_found() {
            eprintln!("Hint: `allowance expense list` and `allowance backup list` show what exists.");
        } else if e.is_validation() {
            eprintln!("Nothing was changed.");
        }
        e.into()
    })
}

fn run(cli: Cli) -> TrackerResult<()> {
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_default(&paths);
    let today: NaiveDate = match cli.today.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    match cli.command {
        Some(Commands::Status { json }) => {
            let store = open_store(&paths, &settings)?;
            handle_status(&store, &settings, today, json)?;
        }
        Some(Commands::Allowance { amount }) => {
            let mut store = open_store(&paths, &settings)?;
            handle_set_allowance(&mut store, &settings, &amount)?;
        }
        Some(Commands::Goal { amount }) => {
            let mut store = open_store(&paths, &settings)?;
            handle_set_goal(&mut store, &settings, &amount)?;
        }
        Some(Commands::Expense(cmd)) => {
            let mut store = open_store(&paths, &settings)?;
            handle_expense_command(&mut store, &settings, today, cmd)?;
        }
        Some(Commands::Report { filter }) => {
            let store = open_store(&paths, &settings)?;
            handle_report(&store, &settings, today, filter)?;
        }
        Some(Commands::History { limit }) => {
            handle_history(&paths, limit)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let store = open_store(&paths, &settings)?;
            handle_export_command(&store, today, cmd)?;
        }
        Some(Commands::Reset { force }) => {
            let mut store = open_store(&paths, &settings)?;
            handle_reset(&mut store, &settings, force)?;
        }
        Some(Commands::Init) => {
            println!("Initializing allowance tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if let Err(e) = Settings::load(&paths) {
                println!("Replacing unreadable settings with defaults ({})", e);
            }
            settings.save(&paths)?;

            let storage = JsonFileStorage::at_paths(&paths);
            if !storage.exists() {
                storage.save(&LedgerRecord::default())?;
            }

            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  allowance allowance 1000");
            println!("  allowance goal 300");
            println!("  allowance expense add 12.50 --category food");
        }
        Some(Commands::Config) => {
            println!("Allowance Tracker Configuration");
            println!("===============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Ledger file:      {}", paths.ledger_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            if let Err(e) = Settings::load(&paths) {
                println!();
                println!("Settings file is unreadable, showing defaults: {}", e);
                println!("Run `allowance init` to rewrite it.");
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Strict categories: {}", settings.strict_categories);
            println!(
                "  Backup retention:  {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }
        None => {
            println!("Allowance tracker - monthly allowance and spending health");
            println!();
            println!("Run 'allowance --help' for usage information.");
            println!("Run 'allowance status' to see the dashboard.");
        }
    }

    Ok(())
}
