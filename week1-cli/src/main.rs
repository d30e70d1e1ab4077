//! Week 1 Lab CLI Application
//!
//! This is the command-line front end for the week1-lab library.
//! It adds:
//! - The calculator prompt (single shot or looping until `q`)
//! - The ownership and observer lifecycle demos
//! - A concurrent registry stress run

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use week1_lab::Calculator;

mod config;
mod prompt;
mod stress;

/// Week 1 Lab - calculator and observer exercises
#[derive(Parser, Debug)]
#[command(name = "week1-cli")]
#[command(about = "Flat expression calculator and weak-reference observer demos", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate arithmetic expressions left to right
    Calc {
        /// Expression to evaluate (default: read from stdin)
        #[arg(short, long, value_name = "EXPR", allow_hyphen_values = true, conflicts_with = "repeat")]
        expr: Option<String>,

        /// Keep prompting until `q` or `Q` is entered
        #[arg(short, long)]
        repeat: bool,

        /// Print one JSON object per evaluation
        #[arg(long)]
        json: bool,
    },

    /// Run the ownership and observer lifecycle demos
    Demo,

    /// Hammer one registry from many threads
    Stress {
        /// Worker threads (default: from config, else 8)
        #[arg(long, value_name = "COUNT", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        threads: Option<usize>,

        /// Register/notify rounds (default: from config, else 1000)
        #[arg(long, value_name = "COUNT")]
        rounds: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Week 1 Lab CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using lab library v{}", week1_lab::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    match args.command {
        Some(Command::Calc { expr, repeat, json }) => {
            let calculator = Calculator::with_config(app_config.calculator);
            let session = prompt::CalcSession::new(calculator, json);
            let stdout = io::stdout();
            let mut out = stdout.lock();

            match expr {
                Some(expression) => session.evaluate_line(&expression, &mut out)?,
                None => {
                    session.run(io::stdin().lock(), &mut out, repeat)?;
                }
            }
        }
        Some(Command::Demo) => demo_mode(),
        Some(Command::Stress { threads, rounds }) => {
            let threads = threads.unwrap_or(app_config.stress.threads);
            let rounds = rounds.unwrap_or(app_config.stress.rounds);
            let summary = stress::run_stress(threads, rounds)?;

            println!("Stress run finished");
            println!("  Threads:    {}", summary.threads);
            println!("  Rounds:     {}", summary.rounds);
            println!("  Delivered:  {}", summary.delivered);
            println!("  Pruned:     {}", summary.pruned);
            println!("  Survivors:  {}", summary.survivors);
            println!("  Remaining:  {}", summary.remaining);
        }
        None => {
            // No subcommand - show help
            println!("Week 1 Lab - No command specified");
            println!("\nQuick Start:");
            println!("  week1-cli calc --expr \"3.5 * 4\"");
            println!("  week1-cli calc --repeat");
            println!("  week1-cli demo");
            println!("  week1-cli stress --threads 8 --rounds 1000");
            println!("\nUse --help for more options");
        }
    }

    Ok(())
}

/// Run both demos and print what they observed
fn demo_mode() {
    use week1_lab::demo;

    println!("Lifecycle demo");
    let lifecycle = demo::lifecycle_demo();
    println!(
        "  first notify:      delivered {}, pruned {}",
        lifecycle.first.delivered, lifecycle.first.pruned
    );
    println!(
        "  after drop notify: delivered {}, pruned {}",
        lifecycle.after_drop.delivered, lifecycle.after_drop.pruned
    );

    println!("\nOwnership demo");
    let ownership = demo::ownership_demo();
    println!("  shared strong count:    {}", ownership.shared_strong_count);
    println!("  upgrade while alive:    {}", ownership.upgraded_while_alive);
    println!("  upgrade after release:  {}", ownership.upgraded_after_release);
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_rejects_zero_threads() {
        let result = Args::try_parse_from(["week1-cli", "stress", "--threads", "0"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["week1-cli", "stress", "--threads", "2"]).unwrap();
        assert!(matches!(args.command, Some(Command::Stress { threads: Some(2), .. })));
    }

    #[test]
    fn test_expr_conflicts_with_repeat() {
        let result = Args::try_parse_from(["week1-cli", "calc", "--expr", "1 + 1", "--repeat"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["week1-cli", "calc", "--expr", "-5 + 3"]).unwrap();
        assert!(matches!(args.command, Some(Command::Calc { expr: Some(_), repeat: false, .. })));
    }
}
