//! Command-line parsing for the sales forecast viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the series and session code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::PeriodUnit;
use crate::series::DEFAULT_WINDOW;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Sales forecast viewer with trend and confidence band")]
pub struct Cli {
    /// Log filter (e.g. `info`, `sales_forecast=debug`). Falls back to RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request a fresh forecast from the prediction service.
    Predict(ShowArgs),
    /// Show the last saved forecast.
    Saved(ShowArgs),
    /// Estimate how long current stock lasts against forecast demand.
    Stock(StockArgs),
}

/// Display options shared by `predict` and `saved`.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Product identifier.
    pub subject: String,

    /// Period granularity to display.
    #[arg(long, value_enum, default_value_t = PeriodUnit::Day)]
    pub view: PeriodUnit,

    /// Trailing window for the trend and band.
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Save the canonical forecast after showing it.
    #[arg(long)]
    pub save: bool,

    /// Export the displayed series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for the inventory view.
#[derive(Debug, Args, Clone)]
pub struct StockArgs {
    /// Product identifier.
    pub subject: String,

    /// Units currently in stock.
    #[arg(long)]
    pub stock: f64,

    /// Stock level that triggers a reorder.
    #[arg(long, default_value_t = 0.0)]
    pub reorder_threshold: f64,

    /// Use the saved forecast instead of requesting a new one.
    #[arg(long)]
    pub saved: bool,
}
