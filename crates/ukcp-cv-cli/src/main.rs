//! UKCP CV CLI: the `ukcp-cvs` command.

mod cli;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;
use ukcp_cv_ingest::{Catalog, RunContext, RunSummary};

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let mut ctx = RunContext::new(cli.source, cli.archive_dir);
    if let Some(path) = cli.uid_map {
        ctx = ctx.with_uid_map(path);
    }

    let summary = ukcp_cv_ingest::run(&ctx, &Catalog::ukcp18()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if cli.json {
        let rendered = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
            eprintln!("error: failed to render summary: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
    } else {
        print_summary(&summary);
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ukcp_cv_ingest=debug,ukcp_cv_store=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &RunSummary) {
    println!("ukcp-cvs archived {}", summary.authority);
    println!();
    println!("  scopes: {}", summary.scopes);
    println!("  collections: {}", summary.collections);
    println!("  terms: {}", summary.terms);
    println!(
        "  uids: {} reused, {} recorded",
        summary.uids.reused, summary.uids.recorded
    );
    println!("  archive: {}", summary.archive_path);
}
