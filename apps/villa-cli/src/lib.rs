//! # villa-cli: Invoice Command Line
//!
//! Library half of the `villa` binary; `main.rs` only parses arguments and
//! dispatches here.
//!
//! ## Module Organization
//! ```text
//! villa_cli/
//! ├── lib.rs          ◄─── Logging setup
//! ├── config.rs       ◄─── villa.toml + VILLA_* environment
//! ├── input.rs        ◄─── JSON invoice input → InvoiceSession
//! └── commands/
//!     ├── calc.rs     ◄─── number, tax, words
//!     ├── render.rs   ◄─── render, print
//!     ├── list.rs     ◄─── saved invoices
//!     └── config.rs   ◄─── show / save configuration
//! ```

pub mod commands;
pub mod config;
pub mod input;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=villa_store=trace` - Trace one crate only
/// - `verbose` - Debug for everything, ignoring `RUST_LOG`
/// - Default: INFO level
///
/// Logs go to stderr so `render --bytes-only` can stream the PDF on stdout.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
