//! Export a displayed series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::AugmentedSeries;
use crate::error::AppError;

/// Write one row per period: label, value, trend and band.
pub fn write_series_csv(path: &Path, augmented: &AugmentedSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::Output(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_series(&mut out, augmented)
        .and_then(|()| out.flush())
        .map_err(|e| AppError::Output(format!("Failed to write export CSV: {e}")))
}

fn write_series(out: &mut impl Write, augmented: &AugmentedSeries) -> std::io::Result<()> {
    writeln!(out, "date,period,value,trend,lower,upper,degraded")?;
    let period = augmented.series.period_unit.label();
    for row in augmented.rows() {
        writeln!(
            out,
            "{},{},{:.4},{:.4},{:.4},{:.4},{}",
            csv_field(&row.label),
            period,
            row.value,
            row.trend,
            row.lower,
            row.upper,
            augmented.series.degraded,
        )?;
    }
    Ok(())
}

/// Service-supplied labels may contain commas (e.g. "Jan 2, 2019").
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ForecastSeries;
    use crate::series::augment;

    #[test]
    fn writes_header_and_rows() {
        let series = ForecastSeries::daily(vec![2.0, 4.0], NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        let augmented = augment(&series, 2);

        let mut buf = Vec::new();
        write_series(&mut buf, &augmented).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = concat!(
            "date,period,value,trend,lower,upper,degraded\n",
            "2019-01-01,daily,2.0000,2.0000,2.0000,2.0000,false\n",
            "2019-01-02,daily,4.0000,3.0000,1.0400,4.9600,false\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn quotes_labels_with_commas() {
        assert_eq!(csv_field("Jan 2, 2019"), "\"Jan 2, 2019\"");
        assert_eq!(csv_field("2019-01-02"), "2019-01-02");
    }
}
