//! # villa
//!
//! GST tax invoices for VMP Villa Home Stay from the command line.
//!
//! ```text
//! villa number                          VMP-17102026-0042
//! villa tax 10000 12                    CGST/SGST split
//! villa words 1250.50                   amount in words
//! villa render stay.json --upload       PDF on disk + archive
//! villa print stay.json                 system viewer, print dialog
//! villa list                            saved invoices
//! villa config                          effective villa.toml
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use villa_cli::commands;
use villa_cli::commands::render::RenderArgs;
use villa_cli::config::AppConfig;

#[derive(Parser)]
#[command(name = "villa")]
#[command(about = "GST tax invoices for VMP Villa Home Stay", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: platform config dir, villa-invoice/villa.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an invoice number
    Number {
        /// Prefix (default: from config)
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Compute GST on a tax-exclusive amount
    Tax {
        /// Amount in rupees, e.g. 5000 or 1,250.50
        base: String,

        /// GST rate in percent, e.g. 12 or 2.5
        rate: String,

        /// Customer is in another state (IGST)
        #[arg(long)]
        interstate: bool,
    },

    /// Spell an amount in Indian English words
    Words {
        /// Amount in rupees
        amount: String,
    },

    /// Render an invoice PDF from a JSON input file
    Render {
        /// Invoice input (JSON)
        input: PathBuf,

        /// Output directory (default: export.download_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Save the PDF to the invoice archive as well
        #[arg(long)]
        upload: bool,

        /// Do not write a file; with --upload only upload, otherwise write the PDF to stdout
        #[arg(long)]
        bytes_only: bool,

        /// Use a captured PNG or JPEG image of the invoice view instead of the built-in layout
        #[arg(long)]
        capture: Option<PathBuf>,
    },

    /// Open an invoice in the system viewer with the print dialog
    ///
    /// Prints the captured invoice view given with --capture. Without it the
    /// built-in programmatic layout is printed instead.
    Print {
        /// Invoice input (JSON)
        input: PathBuf,

        /// Captured PNG or JPEG image of the invoice view; the built-in layout is used when omitted
        #[arg(long)]
        capture: Option<PathBuf>,
    },

    /// List saved invoices, newest first
    List {
        /// Print the raw list response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    villa_cli::init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.clone())?;
    info!(backend = %config.storage.backend, prefix = %config.invoice.prefix, "Configuration loaded");

    match cli.command {
        Commands::Number { prefix } => {
            let prefix = prefix.unwrap_or_else(|| config.invoice.prefix.clone());
            println!("{}", commands::calc::number(&prefix));
        }
        Commands::Tax { base, rate, interstate } => {
            println!("{}", commands::calc::tax(&base, &rate, interstate)?);
        }
        Commands::Words { amount } => {
            println!("{}", commands::calc::words(&amount)?);
        }
        Commands::Render {
            input,
            out,
            upload,
            bytes_only,
            capture,
        } => {
            let args = RenderArgs {
                input,
                out,
                upload,
                bytes_only,
                capture,
            };
            commands::render::run(&config, &args).await?;
        }
        Commands::Print { input, capture } => {
            commands::render::print_invoice(&config, &input, capture.as_deref()).await?;
        }
        Commands::List { json } => {
            commands::list::run(&config, json).await?;
        }
        Commands::Config { save } => {
            commands::config::run(&config, cli.config, save)?;
        }
    }

    Ok(())
}
