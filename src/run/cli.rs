use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use super::{flag_value, has_switch, positionals, read_password, split_command};
use crate::config::shellexpand;
use crate::export;
use crate::models::{Entry, UserRecord, UNSPECIFIED_CATEGORY, UNTITLED};
use crate::parse::{parse_amount, parse_date, today};
use crate::render::{bar_chart, entries_table, format_amount};
use crate::store::{self, Ledger, Session};

/// Options may come before or after the command; the command is the first
/// argument that is neither an option nor an option's value.
pub(crate) fn as_cli(args: &[String], ledger: &Ledger) -> Result<()> {
    let args = args.get(1..).unwrap_or_default();
    if has_switch(args, "--help") {
        print_usage();
        return Ok(());
    }
    if has_switch(args, "--version") {
        print_version();
        return Ok(());
    }
    let Some((command, rest)) = split_command(args) else {
        print_usage();
        return Ok(());
    };

    match command {
        "register" => cli_register(&rest, ledger),
        "add" | "a" => cli_add(&rest, ledger),
        "list" | "ls" => cli_list(&rest, ledger),
        "total" | "t" => cli_total(&rest, ledger),
        "chart" => cli_chart(&rest, ledger),
        "export" => cli_export(&rest, ledger),
        "clear" => cli_clear(&rest, ledger),
        "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "-V" | "version" => {
            print_version();
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_version() {
    println!("pocketledger {}", env!("CARGO_PKG_VERSION"));
}

pub(crate) fn print_usage() {
    println!("pocketledger — local-only personal ledger");
    println!();
    println!("Usage: pocketledger [options] <command> [options]");
    println!();
    println!("Commands:");
    println!("  register <username>           Create a user");
    println!("  add <amount>                  Append an entry");
    println!("    --category <text>           Category (default: {UNSPECIFIED_CATEGORY})");
    println!("    --date <YYYY-MM-DD>         Date (default: today)");
    println!("    --title <text>              Title (default: {UNTITLED})");
    println!("  list                          Show all entries");
    println!("  total                         Show the sum of all entries");
    println!("  chart                         Bar chart of entries and categories");
    println!("  export [path|-]               Export entries to CSV");
    println!("  clear --yes                   Remove all entries");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --user <username>             User to act as (all commands but register)");
    println!("  --password <password>         Password (or POCKETLEDGER_PASSWORD, or stdin)");
    println!("  --data-dir <path>             Data directory (or POCKETLEDGER_DATA_DIR)");
}

fn login(args: &[String], ledger: &Ledger) -> Result<Session> {
    let username = flag_value(args, "--user")
        .ok_or_else(|| anyhow::anyhow!("Missing --user <username>"))?;
    let password = read_password(args)?;
    let session = store::authenticate(ledger, username, &password)?;
    tracing::debug!(username, "logged in");
    Ok(session)
}

/// Load the session's record, printing any recovery warnings.
fn load_record(ledger: &Ledger, session: &Session) -> Result<UserRecord> {
    let loaded = ledger
        .load(session.username())
        .with_context(|| format!("Failed to load data for {}", session.username()))?;
    for warning in &loaded.warnings {
        eprintln!("Warning: {warning}");
    }
    Ok(loaded.record)
}

fn cli_register(args: &[String], ledger: &Ledger) -> Result<()> {
    let username = positionals(args)
        .first()
        .copied()
        .or_else(|| flag_value(args, "--user"))
        .ok_or_else(|| anyhow::anyhow!("Usage: pocketledger register <username>"))?;
    let password = read_password(args)?;
    let had_record = ledger.has_record(username)?;

    store::register(ledger, username, &password)?;
    if had_record {
        println!("Existing data for {username} had no password and was reset.");
    }
    println!("Registered {username}. Use --user {username} to log in.");
    Ok(())
}

fn cli_add(args: &[String], ledger: &Ledger) -> Result<()> {
    let Some(raw_amount) = positionals(args).first().copied() else {
        anyhow::bail!(
            "Usage: pocketledger add <amount> --user <name> [--category c] [--date d] [--title t]"
        );
    };
    let amount = parse_amount(raw_amount)?;
    let date = match flag_value(args, "--date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let session = login(args, ledger)?;
    let entry = Entry::new(
        amount,
        flag_value(args, "--category").map(str::to_string),
        Some(date),
        flag_value(args, "--title").map(str::to_string),
    );
    let summary = format!(
        "Added {} ({}) on {}",
        format_amount(entry.amount),
        entry.category,
        entry.date
    );

    let record = load_record(ledger, &session)?.append_entry(entry);
    ledger
        .save(&record)
        .context("Entry was not saved")?;

    println!("{summary}");
    match record.total() {
        Ok(total) => println!("{} entries, total {}", record.entries.len(), format_amount(total)),
        Err(e) => eprintln!("Warning: {e}"),
    }
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let session = login(args, ledger)?;
    let record = load_record(ledger, &session)?;
    if record.entries.is_empty() {
        println!("No entries yet");
        return Ok(());
    }
    for line in entries_table(&record.entries) {
        println!("{line}");
    }
    Ok(())
}

fn cli_total(args: &[String], ledger: &Ledger) -> Result<()> {
    let session = login(args, ledger)?;
    let record = load_record(ledger, &session)?;
    println!("{} — {} entries", session.username(), record.entries.len());
    println!("{}", "─".repeat(40));
    let total = record.total()?;
    println!("  Total:  {}", format_amount(total));
    Ok(())
}

fn cli_chart(args: &[String], ledger: &Ledger) -> Result<()> {
    let session = login(args, ledger)?;
    let record = load_record(ledger, &session)?;
    if record.entries.is_empty() {
        println!("No entries yet");
        return Ok(());
    }

    let per_entry: Vec<(String, rust_decimal::Decimal)> = record
        .entries
        .iter()
        .zip(record.amounts())
        .enumerate()
        .map(|(i, (e, amount))| {
            let label = if e.has_known_date() {
                e.date.clone()
            } else {
                format!("#{}", i + 1)
            };
            (label, amount)
        })
        .collect();

    println!("Entries:");
    for line in bar_chart(&per_entry) {
        println!("  {line}");
    }
    println!();
    println!("By category:");
    for line in bar_chart(&record.totals_by_category()?) {
        println!("  {line}");
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let session = login(args, ledger)?;
    let record = load_record(ledger, &session)?;

    match positionals(args).first().copied() {
        Some("-") => {
            let bytes = export::entries_to_csv(&record.entries)?;
            std::io::stdout()
                .write_all(&bytes)
                .context("Failed to write CSV to stdout")?;
        }
        target => {
            let path = target.map(shellexpand).map(PathBuf::from).unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
                PathBuf::from(format!("{home}/pocketledger-{}.csv", session.username()))
            });
            let count = export::write_csv(&path, &record.entries)?;
            if count == 0 {
                println!("No entries; wrote header only to {}", path.display());
            } else {
                println!("Exported {count} entries to {}", path.display());
            }
        }
    }
    Ok(())
}

fn cli_clear(args: &[String], ledger: &Ledger) -> Result<()> {
    let session = login(args, ledger)?;
    let record = load_record(ledger, &session)?;
    let count = record.entries.len();

    if !has_switch(args, "--yes") {
        anyhow::bail!("This removes all {count} entries. Re-run with --yes to confirm.");
    }

    ledger
        .save(&record.clear())
        .context("Entries were not cleared")?;
    println!("Removed {count} entries");
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
