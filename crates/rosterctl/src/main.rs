//! Roster command-line driver

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rostercache::CacheStats;
use rosterdb::{FieldUpdate, Role, RoleGroups, User};
use serde::Serialize;
use tracing::info;

use crate::commands::parse_update_arg;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Maximum number of users to list
    #[arg(short, long, global = true, default_value_t = rostercache::DEFAULT_LIST_LIMIT)]
    limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a couple of users, then look up, list, group and time them
    Demo,

    /// Import `name, email[, role]` records from a text file
    Import {
        /// File with one record per line
        file: PathBuf,

        /// Only list and group users with this role
        #[arg(short, long)]
        role: Option<Role>,

        /// Update applied after the import, as ID:FIELD=VALUE
        #[arg(short, long = "update", value_parser = parse_update_arg)]
        updates: Vec<(u64, FieldUpdate)>,
    },

    /// Print mean, min, max and count of the given numbers
    Stats {
        /// Numbers to summarize
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting rosterctl v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Demo => {
            let report = commands::demo(args.limit)?;
            if args.json {
                return print_json(&report);
            }

            if let Some(user) = &report.found {
                println!("Found user: {}", user);
            }
            println!("{} users in total", report.users.len());
            print_groups(&report.groups);
            print_cache(&report.cache);
        }
        Command::Import {
            file,
            role,
            updates,
        } => {
            let report = commands::import(&file, role.as_ref(), &updates, args.limit)?;
            if args.json {
                return print_json(&report);
            }

            println!(
                "Imported {} users, applied {} updates",
                report.imported, report.updated
            );
            print_users(&report.users);
            print_groups(&report.groups);
            print_cache(&report.cache);
        }
        Command::Stats { numbers } => {
            let summary = commands::stats(&numbers)?;
            if args.json {
                return print_json(&summary);
            }

            println!("mean:  {}", summary.mean);
            println!("min:   {}", summary.min);
            println!("max:   {}", summary.max);
            println!("count: {}", summary.count);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_users(users: &[User]) {
    for user in users {
        let admin = if user.is_admin() { " *" } else { "" };
        println!("  {:>4}  {}  [{}]{}", user.id, user, user.role, admin);
    }
}

fn print_groups(groups: &RoleGroups) {
    for (role, names) in groups.iter() {
        println!("{}: {}", role, names.join(", "));
    }
}

fn print_cache(stats: &CacheStats) {
    println!(
        "cache: {} hits, {} misses ({:.0}% hit rate), {} inserts, {} removals",
        stats.hits,
        stats.misses,
        stats.hit_ratio() * 100.0,
        stats.inserts,
        stats.removals
    );
}
