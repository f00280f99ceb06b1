//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output
//!
//! Plot elements:
//! - forecast values: `o`
//! - trend: `-` line
//! - confidence band edges: `.` lines

use crate::domain::AugmentedSeries;

/// Render a displayed series with its trend and band.
pub fn render_forecast_plot(augmented: &AugmentedSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let n = augmented.len();

    let mut out = String::new();
    let labels = augmented.series.date_labels();
    let (first, last) = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => (first.as_str(), last.as_str()),
        _ => {
            out.push_str("Plot: no data\n");
            return out;
        }
    };

    let (y_min, y_max) = y_range(augmented).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so the values overlay them.
    draw_series(&mut grid, &augmented.trend, y_min, y_max, '-');
    draw_series(&mut grid, &augmented.upper_bound, y_min, y_max, '.');
    draw_series(&mut grid, &augmented.lower_bound, y_min, y_max, '.');

    for (i, &v) in augmented.series.values.iter().enumerate() {
        let x = map_x(i, n, width);
        let y = map_y(v, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    out.push_str(&format!(
        "Plot: {} | {first} .. {last} | y=[{y_min:.2}, {y_max:.2}]\n",
        augmented.series.period_unit.label()
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn y_range(augmented: &AugmentedSeries) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &y in augmented
        .series
        .values
        .iter()
        .chain(&augmented.upper_bound)
        .chain(&augmented.lower_bound)
    {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat series: centre it.
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(index: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = index as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(grid: &mut [Vec<char>], ys: &[f64], y_min: f64, y_max: f64, ch: char) {
    let height = grid.len();
    let Some(width) = grid.first().map(Vec::len) else {
        return;
    };

    let mut prev = None;
    for (i, &y) in ys.iter().enumerate() {
        let x = map_x(i, ys.len(), width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, ch),
            None if grid[yy][x] == ' ' => grid[yy][x] = ch,
            None => {}
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Never overwrites a drawn cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
