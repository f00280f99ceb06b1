//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - builds the session from environment config
//! - requests or reloads a forecast
//! - prints reports/plots
//! - writes optional saves and exports

use tracing::info;

use crate::cli::{Cli, Command, ShowArgs, StockArgs};
use crate::config::{ServiceConfig, StoreTarget};
use crate::data::{ForecastStore, HttpForecastStore, HttpPredictionClient};
use crate::error::AppError;
use crate::io::{FileForecastStore, write_series_csv};
use crate::report::format::{format_analysis, format_header, format_stock, format_summary, format_table};
use crate::report::{StockPosition, coverage, monthly_demand};

pub mod pipeline;
pub mod session;

use pipeline::DisplayOutput;
use session::{FetchOutcome, FetchSource, ForecastSession};

/// Entry point for the `forecast` binary.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let config = ServiceConfig::from_env()?;
    match cli.command {
        Command::Predict(args) => handle_show(&config, args, FetchSource::Live),
        Command::Saved(args) => handle_show(&config, args, FetchSource::Saved),
        Command::Stock(args) => handle_stock(&config, args),
    }
}

/// Wire HTTP/file collaborators from config into a session.
pub fn build_session(config: &ServiceConfig, window: usize) -> Result<ForecastSession, AppError> {
    let service = HttpPredictionClient::from_config(config)?;
    let store: Box<dyn ForecastStore> = match &config.store {
        StoreTarget::Http(url) => Box::new(HttpForecastStore::new(config, url.clone())?),
        StoreTarget::Dir(dir) => Box::new(FileForecastStore::new(dir.clone())),
    };
    Ok(ForecastSession::new(service, store).with_window(window))
}

fn fetch(session: &ForecastSession, subject: &str, source: FetchSource) -> FetchOutcome {
    let outcome = session.fetch(subject, source);
    info!(subject, ?source, ?outcome, "fetch settled");
    outcome
}

fn handle_show(config: &ServiceConfig, args: ShowArgs, source: FetchSource) -> Result<(), AppError> {
    let session = build_session(config, args.window)?.with_view(args.view);

    if fetch(&session, &args.subject, source) == FetchOutcome::NothingSaved {
        println!("No saved forecast for '{}'.", args.subject);
        return Ok(());
    }

    let output = DisplayOutput::from_snapshot(session.snapshot(), session.window());
    println!("{}", render_report(&args, &output, session.window()));

    if let (Some(path), Some(displayed)) = (&args.export, &output.displayed) {
        write_series_csv(path, displayed)?;
        println!("Exported {} rows to {}", displayed.len(), path.display());
    }

    if args.save {
        session.save_current(&args.subject)?;
        println!("Saved forecast for '{}'.", args.subject);
    }

    Ok(())
}

/// Everything `predict`/`saved` print for one settled session.
pub fn render_report(args: &ShowArgs, output: &DisplayOutput, window: usize) -> String {
    let mut out = format_header(&args.subject, &output.snapshot, window);

    if let Some(summary) = &output.summary {
        out.push('\n');
        out.push_str(&format_summary(summary));
    }

    if let Some(displayed) = &output.displayed {
        out.push('\n');
        out.push_str(&format_table(displayed));
        if !args.no_plot {
            out.push('\n');
            out.push_str(&crate::plot::render_forecast_plot(displayed, args.width, args.height));
        }
    }

    let analysis = output
        .snapshot
        .canonical
        .as_ref()
        .and_then(|c| c.analysis.as_deref())
        .map(format_analysis)
        .unwrap_or_default();
    if !analysis.is_empty() {
        out.push('\n');
        out.push_str(&analysis);
    }

    out
}

fn handle_stock(config: &ServiceConfig, args: StockArgs) -> Result<(), AppError> {
    if !(args.stock.is_finite() && args.stock >= 0.0) {
        return Err(AppError::Config(format!("invalid --stock {}", args.stock)));
    }
    if !(args.reorder_threshold.is_finite() && args.reorder_threshold >= 0.0) {
        return Err(AppError::Config(format!(
            "invalid --reorder-threshold {}",
            args.reorder_threshold
        )));
    }

    let session = build_session(config, crate::series::DEFAULT_WINDOW)?;
    let source = if args.saved { FetchSource::Saved } else { FetchSource::Live };
    if fetch(&session, &args.subject, source) == FetchOutcome::NothingSaved {
        println!("No saved forecast for '{}'.", args.subject);
        return Ok(());
    }

    let snapshot = session.snapshot();
    let Some(canonical) = &snapshot.canonical else {
        return Ok(());
    };

    let position = StockPosition {
        stock_quantity: args.stock,
        reorder_threshold: args.reorder_threshold,
    };
    let cover = coverage(&monthly_demand(canonical), position);

    print!("{}", format_header(&args.subject, &snapshot, session.window()));
    println!();
    print!("{}", format_stock(&position, &cover));
    Ok(())
}
