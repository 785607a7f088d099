use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use crate::application::{
    AppError, DEFAULT_CURRENCY, DEFAULT_DATABASE, DEFAULT_STORE_KEY, LedgerConfig, LedgerService,
    LedgerView, NewTransaction, parse_amount, parse_date, parse_transaction_type,
};
use crate::domain::{Cents, Transaction, TransactionType, ViewFilter, format_cents};

/// Kharcha - Income and Expense Tracker
#[derive(Parser)]
#[command(name = "kharcha")]
#[command(about = "A local-first income and expense tracker")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, global = true, env = "KHARCHA_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Storage slot the ledger is kept under
    #[arg(long, global = true, env = "KHARCHA_KEY", default_value = DEFAULT_STORE_KEY)]
    pub key: String,

    /// Currency symbol shown in front of amounts
    #[arg(long, global = true, env = "KHARCHA_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record an income or expense
    Add {
        /// Amount (e.g., "250.00" or "250")
        amount: String,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Category (e.g., "Food", "Salary")
        #[arg(short, long)]
        category: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only show this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Case-insensitive search over notes and categories
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show totals and the per-category expense breakdown
    Summary {
        /// Only include this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Case-insensitive search over notes and categories
        #[arg(short, long)]
        search: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Delete a transaction by ID
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Delete every transaction
    Clear {
        /// Confirm that all transactions should be deleted
        #[arg(long)]
        yes: bool,
    },

    /// Export all transactions (filters do not apply)
    Export {
        /// Output file, or "-" for stdout (default: transactions.csv / transactions.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    pub fn config(&self) -> LedgerConfig {
        LedgerConfig::default()
            .with_database(&self.database)
            .with_store_key(&self.key)
            .with_currency(&self.currency)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.config();
        debug!(
            "event=cli_start database={} key={}",
            config.database, config.store_key
        );

        match self.command {
            Commands::Init => {
                LedgerService::open(&config).await?;
                println!("Database initialized: {}", config.database);
            }

            Commands::Add {
                amount,
                kind,
                category,
                date,
                note,
            } => {
                let mut service = LedgerService::open(&config).await?;

                // Validate everything before touching the ledger
                let amount_cents = parse_amount(&amount)?;
                let kind = parse_transaction_type(&kind)?;
                let mut input = NewTransaction::new(kind, amount_cents, category);
                if let Some(date_str) = date {
                    input = input.on(parse_date(&date_str)?);
                }
                if let Some(note) = note {
                    input = input.with_note(note);
                }

                let transaction = service.record(input).await?;
                println!(
                    "Recorded {}: {} {} on {} ({})",
                    transaction.kind,
                    format_money(&config.currency, transaction.amount_cents),
                    transaction.category,
                    transaction.date_string(),
                    transaction.id
                );
            }

            Commands::List { month, search } => {
                let service = LedgerService::open(&config).await?;
                let view = service.view(&build_filter(month, search));
                print_list(&view, &config.currency);
            }

            Commands::Summary {
                month,
                search,
                format,
            } => {
                let service = LedgerService::open(&config).await?;
                let view = service.view(&build_filter(month, search));
                run_summary_command(&view, &format, &config.currency)?;
            }

            Commands::Delete { id } => {
                let mut service = LedgerService::open(&config).await?;
                if service.remove(&id).await? {
                    println!("Deleted transaction: {}", id);
                } else {
                    println!("No transaction with ID: {}", id);
                }
            }

            Commands::Clear { yes } => {
                let mut service = LedgerService::open(&config).await?;
                if !yes {
                    anyhow::bail!(
                        "Refusing to delete {} transaction(s) without --yes",
                        service.ledger().len()
                    );
                }
                let dropped = service.clear().await?;
                println!("Cleared {} transaction(s)", dropped);
            }

            Commands::Export { output, format } => {
                let service = LedgerService::open(&config).await?;
                run_export_command(&service, output.as_deref(), &format)?;
            }
        }

        Ok(())
    }
}

fn build_filter(month: Option<String>, search: Option<String>) -> ViewFilter {
    ViewFilter { month, search }
}

fn print_list(view: &LedgerView, currency: &str) {
    if view.transactions.is_empty() {
        println!("No transactions yet.");
    } else {
        println!(
            "{:<12} {:<16} {:>14} {:<30} ID",
            "DATE", "CATEGORY", "AMOUNT", "NOTE"
        );
        println!("{}", "-".repeat(110));
        for transaction in &view.transactions {
            println!(
                "{:<12} {:<16} {:>14} {:<30} {}",
                transaction.date_string(),
                truncate(&transaction.category, 16),
                format_signed(currency, transaction),
                truncate(transaction.note.as_deref().unwrap_or(""), 30),
                transaction.id
            );
        }
    }

    println!();
    print_totals(view, currency);
}

fn print_totals(view: &LedgerView, currency: &str) {
    println!("Income:   {:>15}", format_money(currency, view.totals.income));
    println!("Expense:  {:>15}", format_money(currency, view.totals.expense));
    println!("{}", "-".repeat(25));
    println!("Balance:  {:>15}", format_money(currency, view.totals.balance));
}

fn run_summary_command(view: &LedgerView, format: &str, currency: &str) -> Result<()> {
    match format {
        "json" => {
            let summary = serde_json::json!({
                "totals": view.totals,
                "categories": view.breakdown.categories,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "table" => {
            print_totals(view, currency);

            if !view.breakdown.is_empty() {
                println!();
                println!("{:<20} {:>14} {:>8}", "CATEGORY", "EXPENSE", "SHARE");
                println!("{}", "-".repeat(44));
                for entry in view.breakdown.iter() {
                    println!(
                        "{:<20} {:>14} {:>7.1}%",
                        truncate(&entry.category, 20),
                        format_money(currency, entry.expense),
                        view.breakdown.percentage(&entry.category)
                    );
                }
            }
        }
        _ => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format),
    }
    Ok(())
}

fn run_export_command(service: &LedgerService, output: Option<&str>, format: &str) -> Result<()> {
    use crate::io::{CSV_FILE_NAME, write_csv, write_json};
    use std::fs::File;
    use std::io::{Write, stdout};

    let default_output = match format {
        "csv" => CSV_FILE_NAME,
        "json" => "transactions.json",
        _ => anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format),
    };

    // Nothing is written, not even an empty file, when there is nothing to export
    if service.ledger().is_empty() {
        println!("No transactions to export.");
        return Ok(());
    }

    let path = output.unwrap_or(default_output);
    let writer: Box<dyn Write> = if path == "-" {
        Box::new(stdout())
    } else {
        let file =
            File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
        Box::new(file)
    };

    let result = match format {
        "json" => write_json(service.ledger(), writer).map(|snapshot| snapshot.transactions.len()),
        _ => write_csv(service.ledger(), writer),
    };

    match result {
        Ok(count) => {
            if path != "-" {
                eprintln!("Exported {} transactions to {}", count, path);
            }
            Ok(())
        }
        Err(AppError::NothingToExport) => {
            println!("No transactions to export.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Currency-prefixed amount, e.g. "₹250.00" or "-₹12.00".
fn format_money(currency: &str, cents: Cents) -> String {
    let symbol = currency.trim();
    if cents < 0 {
        format!("-{}{}", symbol, format_cents(-cents))
    } else {
        format!("{}{}", symbol, format_cents(cents))
    }
}

/// Amount with a direction marker: "+ ₹1000.00" for income, "- ₹250.00" for expense.
fn format_signed(currency: &str, transaction: &Transaction) -> String {
    let marker = match transaction.kind {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    format!(
        "{} {}{}",
        marker,
        currency.trim(),
        format_cents(transaction.amount_cents)
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
