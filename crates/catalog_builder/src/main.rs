//! Catalog Builder CLI
//!
//! Generate the built-in catalog as JSON, validate edited catalog files,
//! and seed save directories for fresh profiles.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "catalog_builder")]
#[command(about = "Build and validate Cardbound catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Write the built-in catalog to a JSON file
    Generate {
        /// Output catalog file path
        #[arg(long, default_value = "catalog.json")]
        out: PathBuf,
    },

    /// Validate a catalog JSON file
    Validate {
        /// Catalog file to check
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Seed a save directory with a fresh default game state
    Seed {
        /// Save directory to create
        #[arg(long, default_value = "saves")]
        dir: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { out } => {
            let file = catalog_builder::generate(&out)?;
            println!(
                "Wrote {} cards, {} moves, {} tasks to {}",
                file.card_count,
                file.move_count,
                file.task_count,
                out.display()
            );
        }
        Commands::Validate { r#in } => {
            let summary = catalog_builder::validate(&r#in)?;
            if summary.is_valid() {
                println!("{} is valid", r#in.display());
            } else {
                eprintln!("{} has {} problem(s):", r#in.display(), summary.errors.len());
                for error in &summary.errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(1);
            }
        }
        Commands::Seed { dir } => {
            catalog_builder::seed_saves(&dir)?;
            println!("Seeded save directory {}", dir.display());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("catalog_builder was built without the 'cli' feature");
}
