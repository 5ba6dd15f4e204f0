use anyhow::Context;
use clap::Parser;
use bom_observations::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<commands::ProcessingStats> = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // Without a signal handler, never resolve and let the command finish
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result.context("Command failed")
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(anyhow::anyhow!("Processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(stats) if stats.bulletins_failed > 0 => {
            eprintln!("{} bulletin(s) could not be processed", stats.bulletins_failed);
            process::exit(2);
        }
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BoM Observations - Bureau of Meteorology Bulletin Converter");
    println!("===========================================================");
    println!();
    println!("Convert Bureau of Meteorology XML observation bulletins into");
    println!("normalized station and observation records for database loading.");
    println!();
    println!("USAGE:");
    println!("    bom-observations <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse one bulletin and write its JSON export");
    println!("    summary     Show a summary of one bulletin");
    println!("    batch       Parse every bulletin in a directory");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -c, --config     Configuration file path");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a bulletin to JSON:");
    println!("    bom-observations parse IDV60920.xml --output IDV60920.json");
    println!();
    println!("    # Show the temperature overview:");
    println!("    bom-observations summary IDV60920.xml --limit 10");
    println!();
    println!("    # Parse a directory of bulletins with 4 workers:");
    println!("    bom-observations batch ./bulletins --workers 4 --output ./exports");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bom-observations <COMMAND> --help");
}
