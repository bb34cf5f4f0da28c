// Rating histogram rendered as a standalone SVG file: 20 bins of width 0.5
// spanning the 0-10 rating scale.

use crate::error::Result;
use crate::movie::{MAX_RATING, MIN_RATING};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const BIN_COUNT: usize = 20;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Count ratings per bin. A rating equal to the upper bound lands in the
/// last bin; ratings outside the scale are ignored.
pub fn bin_counts(ratings: &[f64]) -> [usize; BIN_COUNT] {
    let mut counts = [0usize; BIN_COUNT];
    let width = (MAX_RATING - MIN_RATING) / BIN_COUNT as f64;
    for &rating in ratings {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            continue;
        }
        let idx = (((rating - MIN_RATING) / width) as usize).min(BIN_COUNT - 1);
        counts[idx] += 1;
    }
    counts
}

pub fn render_svg(counts: &[usize; BIN_COUNT]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
    let bar_w = plot_w / BIN_COUNT as f64;
    let base_y = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" font-size="18">Movie Ratings Histogram</text>"#,
        WIDTH / 2.0
    );

    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let h = plot_h * count as f64 / max_count as f64;
        let x = MARGIN_LEFT + bar_w * i as f64;
        let _ = writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{:.1}" width="{bar_w:.1}" height="{h:.1}" fill="steelblue" stroke="black"/>"#,
            base_y - h
        );
    }

    // axes
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{base_y}" x2="{}" y2="{base_y}" stroke="black"/>"#,
        MARGIN_LEFT + plot_w
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{base_y}" stroke="black"/>"#
    );

    for tick in 0..=10 {
        let x = MARGIN_LEFT + plot_w * tick as f64 / 10.0;
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="12">{tick}</text>"#,
            base_y + 18.0
        );
    }
    for tick in (0..=max_count).step_by(tick_step(max_count)) {
        let y = base_y - plot_h * tick as f64 / max_count as f64;
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12">{tick}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0
        );
    }

    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">Rating</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 15.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="18" y="{:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 18 {:.1})">Number of Movies</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );
    svg.push_str("</svg>\n");
    svg
}

/// Keeps the y axis to roughly ten labels however tall the bars get.
fn tick_step(max_count: usize) -> usize {
    max_count.div_ceil(10).max(1)
}

/// Histograms are always SVG; any other extension is replaced.
pub fn svg_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => path.to_path_buf(),
        _ => path.with_extension("svg"),
    }
}

/// Render the histogram for `ratings` and write it. Returns the path
/// actually written.
pub fn write_histogram(ratings: &[f64], path: &Path) -> Result<PathBuf> {
    let target = svg_path(path);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&target, render_svg(&bin_counts(ratings)))?;
    debug!(path = %target.display(), ratings = ratings.len(), "histogram written");
    Ok(target)
}
