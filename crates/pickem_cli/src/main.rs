//! Pickem CLI
//!
//! On-demand leaderboard recompute over a contest-input JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pickem_cli")]
#[command(about = "Recompute a prediction-contest leaderboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scoring pass and write the snapshot
    Recompute {
        /// Contest input JSON (config, matches, predictions, chips, ...)
        #[arg(long)]
        r#in: PathBuf,

        /// Output snapshot JSON path
        #[arg(long)]
        out: PathBuf,

        /// Previous snapshot JSON for rank-delta computation
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Pretty-print the output JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Recompute {
            r#in,
            out,
            previous,
            pretty,
        } => {
            println!("Recomputing leaderboard...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            if let Some(previous) = &previous {
                println!("   Previous snapshot: {}", previous.display());
            }

            let summary = pickem_cli::run_recompute(&r#in, &out, previous.as_deref(), pretty)?;

            println!("Done: {} participants ranked", summary.participants);
            if let Some((name, total)) = summary.leader {
                println!("   Leader: {name} with {total} points");
            }
        }
    }

    Ok(())
}
