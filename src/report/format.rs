//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the series and session code stays clean and testable
//! - output changes are localized

use crate::domain::{AugmentedSeries, SessionSnapshot, SessionStatus};
use crate::report::stock::{StockCoverage, StockPosition};
use crate::report::summary::ForecastSummary;

/// Header: subject, status, data source, advisory and save error.
pub fn format_header(subject: &str, snapshot: &SessionSnapshot, window: usize) -> String {
    let mut out = String::new();

    out.push_str("=== forecast - Sales Forecast ===\n");
    out.push_str(&format!("Subject: {subject}\n"));
    out.push_str(&format!("Status: {}\n", status_label(snapshot.status)));
    out.push_str(&format!(
        "View: {} | trend window={window}\n",
        snapshot.view.label()
    ));

    if let Some(canonical) = &snapshot.canonical {
        let source = if canonical.degraded { "fallback (degraded)" } else { "live" };
        out.push_str(&format!("Data: {source} | {} days from {}", canonical.len(), canonical.start_date));
        if let Some(end) = canonical.end_date {
            out.push_str(&format!(" to {end}"));
        }
        out.push('\n');
    }

    if let Some(advisory) = &snapshot.advisory {
        out.push_str(&format!("Advisory: {advisory}\n"));
    }
    if let Some(err) = &snapshot.save_error {
        out.push_str(&format!("Save error: {err}\n"));
    }

    out
}

pub fn format_summary(summary: &ForecastSummary) -> String {
    let mut out = String::new();
    out.push_str("Summary:\n");
    out.push_str(&format!("- total demand   : {:.2}\n", summary.total));
    out.push_str(&format!("- monthly average: {:.2}\n", summary.average_monthly));
    out.push_str(&format!("- next 30 days   : {:.2}\n", summary.next_30_days));
    match summary.peak {
        Some((date, value)) => out.push_str(&format!("- peak           : {value:.2} on {date}\n")),
        None => out.push_str("- peak           : n/a\n"),
    }
    out
}

/// One row per displayed period.
pub fn format_table(augmented: &AugmentedSeries) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:>12} {:>12} {:>12} {:>12}\n",
            "date", "value", "trend", "lower", "upper"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:-<16} {:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "", "").trim_end());
    out.push('\n');

    for row in augmented.rows() {
        out.push_str(
            format!(
                "{:<16} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                truncate(&row.label, 16),
                row.value,
                row.trend,
                row.lower,
                row.upper,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

pub fn format_stock(position: &StockPosition, coverage: &StockCoverage) -> String {
    let mut out = String::new();
    out.push_str("Inventory:\n");
    out.push_str(&format!("- current stock     : {:.0}\n", position.stock_quantity));
    out.push_str(&format!("- reorder threshold : {:.0}\n", position.reorder_threshold));
    out.push_str(&format!("- forecast demand   : {:.0}\n", coverage.total_demand));
    out.push_str(&format!(
        "- months until reorder: {}\n",
        coverage.months_until_reorder
    ));
    out.push_str(&format!("- additional stock needed: {:.0}\n", coverage.stock_needed));
    out
}

/// Analysis text with markup stripped and whitespace collapsed.
pub fn format_analysis(analysis: &str) -> String {
    let mut text = String::with_capacity(analysis.len());
    let mut in_tag = false;
    for ch in analysis.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }
    format!("Analysis:\n{}\n", words.join(" "))
}

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Idle => "idle",
        SessionStatus::Requesting => "requesting",
        SessionStatus::Succeeded => "succeeded",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ForecastSeries;
    use crate::series::augment;

    #[test]
    fn header_shows_degraded_source_and_advisory() {
        let mut series = ForecastSeries::daily(vec![1.0; 3], NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        series.degraded = true;
        let snapshot = SessionSnapshot {
            status: SessionStatus::Succeeded,
            canonical: Some(series),
            advisory: Some("Prediction failed: boom. Using fallback data.".into()),
            ..SessionSnapshot::default()
        };

        let out = format_header("p-1", &snapshot, 7);
        assert!(out.contains("Status: succeeded"));
        assert!(out.contains("Data: fallback (degraded) | 3 days from 2026-10-17"));
        assert!(out.contains("Advisory: Prediction failed: boom."));
        assert!(!out.contains("Save error"));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let series = ForecastSeries::daily(vec![1.0, 3.0], NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        let out = format_table(&augment(&series, 7));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("date"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].starts_with("2019-01-01"));
        assert!(lines[3].contains("2.00"));
    }

    #[test]
    fn analysis_markup_is_stripped() {
        let out = format_analysis("<h2>Outlook</h2>\n<p>Demand  rises.</p>");
        assert_eq!(out, "Analysis:\nOutlook Demand rises.\n");
        assert_eq!(format_analysis("<div></div>"), "");
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
