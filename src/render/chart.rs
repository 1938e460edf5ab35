//! Horizontal bar chart of the top languages.
//!
//! One row per language: name on the left, a bar scaled against the largest
//! entry, and the share of total bytes as a percentage label after the bar.
//! An account with no reported code gets a single full-width "No code" bar
//! instead of an empty image.

use super::raster::Canvas;
use super::{BACKGROUND, INK, MUTED, PALETTE, RenderError, Rgb, write_svg};
use crate::github::LanguageTotal;
use maud::{Markup, html};
use std::path::Path;

const WIDTH: u32 = 800;
const MARGIN: u32 = 24;
const HEADER_H: u32 = 56;
const ROW_H: u32 = 36;
const BAR_H: u32 = 18;
/// Column reserved for language names.
const LABEL_W: u32 = 180;
/// Column reserved for the trailing percentage label.
const PCT_W: u32 = 70;
const TEXT_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 2;

/// One laid-out chart row.
#[derive(Debug, Clone)]
pub struct BarRow {
    pub label: String,
    pub bytes: u64,
    /// Share of the total, 0.0..=1.0. Drives the percentage label.
    pub share: f64,
    /// Length relative to the largest row, 0.0..=1.0. Drives the bar width.
    pub relative: f64,
    pub color: Rgb,
}

/// Compute chart rows from ranked totals. Empty input degrades to a single
/// placeholder row so the chart never renders blank.
pub fn layout(ranked: &[LanguageTotal]) -> Vec<BarRow> {
    if ranked.is_empty() {
        return vec![BarRow {
            label: "No code".into(),
            bytes: 0,
            share: 1.0,
            relative: 1.0,
            color: MUTED,
        }];
    }

    let total: u64 = ranked.iter().map(|t| t.bytes).sum();
    let max = ranked.iter().map(|t| t.bytes).max().unwrap_or(1).max(1);

    ranked
        .iter()
        .enumerate()
        .map(|(i, t)| BarRow {
            label: t.name.clone(),
            bytes: t.bytes,
            share: if total == 0 { 0.0 } else { t.bytes as f64 / total as f64 },
            relative: t.bytes as f64 / max as f64,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

/// Render the chart to both output files.
pub fn render(
    ranked: &[LanguageTotal],
    login: &str,
    png_path: &Path,
    svg_path: &Path,
) -> Result<(), RenderError> {
    let rows = layout(ranked);
    let title = format!("{} - Top {} languages", login, rows.len());

    render_png(&rows, &title, png_path)?;
    write_svg(svg_path, &svg_markup(&rows, &title))?;
    Ok(())
}

fn chart_height(rows: &[BarRow]) -> u32 {
    HEADER_H + rows.len() as u32 * ROW_H + MARGIN
}

/// Pixel width available for the longest bar.
fn bar_span() -> u32 {
    WIDTH - MARGIN * 2 - LABEL_W - PCT_W
}

fn pct_label(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn render_png(rows: &[BarRow], title: &str, path: &Path) -> Result<(), RenderError> {
    let mut canvas = Canvas::new(WIDTH, chart_height(rows), BACKGROUND);
    canvas.draw_text(MARGIN, MARGIN, title, TITLE_SCALE, INK);

    for (i, row) in rows.iter().enumerate() {
        let row_top = HEADER_H + i as u32 * ROW_H;
        let bar_y = row_top + (ROW_H - BAR_H) / 2;
        let text_y = row_top + (ROW_H - Canvas::text_height(TEXT_SCALE)) / 2;
        let bar_w = (bar_span() as f64 * row.relative).round() as u32;

        canvas.draw_text(MARGIN, text_y, &row.label, TEXT_SCALE, INK);
        canvas.fill_rect(MARGIN + LABEL_W, bar_y, bar_w.max(1), BAR_H, row.color);
        canvas.draw_text(
            MARGIN + LABEL_W + bar_w + 8,
            text_y,
            &pct_label(row.share),
            TEXT_SCALE,
            MUTED,
        );
    }

    canvas.save_png(path)
}

fn svg_markup(rows: &[BarRow], title: &str) -> Markup {
    let height = chart_height(rows);
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(WIDTH) height=(height)
            viewBox=(format!("0 0 {WIDTH} {height}"))
            font-family="Segoe UI, Helvetica, Arial, sans-serif" {
            rect width=(WIDTH) height=(height) fill=(BACKGROUND.hex()) {}
            text x=(MARGIN) y=(MARGIN + 16) font-size="18" font-weight="600" fill=(INK.hex()) {
                (title)
            }
            @for (i, row) in rows.iter().enumerate() {
                @let row_top = HEADER_H + i as u32 * ROW_H;
                @let bar_y = row_top + (ROW_H - BAR_H) / 2;
                @let text_y = row_top + ROW_H / 2 + 5;
                @let bar_w = ((bar_span() as f64 * row.relative).round() as u32).max(1);
                text x=(MARGIN) y=(text_y) font-size="14" fill=(INK.hex()) {
                    (row.label)
                }
                rect x=(MARGIN + LABEL_W) y=(bar_y) width=(bar_w) height=(BAR_H)
                    rx="3" fill=(row.color.hex()) {}
                text x=(MARGIN + LABEL_W + bar_w + 8) y=(text_y)
                    font-size="13" fill=(MUTED.hex()) {
                    (pct_label(row.share))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn totals(entries: &[(&str, u64)]) -> Vec<LanguageTotal> {
        entries
            .iter()
            .map(|(n, b)| LanguageTotal { name: n.to_string(), bytes: *b })
            .collect()
    }

    #[test]
    fn empty_totals_degrade_to_placeholder_row() {
        let rows = layout(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "No code");
        assert_eq!(rows[0].relative, 1.0);
    }

    #[test]
    fn shares_sum_to_one() {
        let rows = layout(&totals(&[("Rust", 750), ("Python", 250)]));
        let sum: f64 = rows.iter().map(|r| r.share).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((rows[0].share - 0.75).abs() < 1e-9);
    }

    #[test]
    fn largest_row_spans_full_bar() {
        let rows = layout(&totals(&[("Rust", 500), ("Go", 125)]));
        assert_eq!(rows[0].relative, 1.0);
        assert!((rows[1].relative - 0.25).abs() < 1e-9);
    }

    #[test]
    fn colors_cycle_past_palette_end() {
        let entries: Vec<(String, u64)> =
            (0..12).map(|i| (format!("L{i}"), 100 - i as u64)).collect();
        let refs: Vec<LanguageTotal> = entries
            .iter()
            .map(|(n, b)| LanguageTotal { name: n.clone(), bytes: *b })
            .collect();
        let rows = layout(&refs);
        assert_eq!(rows[10].color, rows[0].color);
    }

    #[test]
    fn pct_label_one_decimal() {
        assert_eq!(pct_label(0.75), "75.0%");
        assert_eq!(pct_label(0.333), "33.3%");
    }

    #[test]
    fn svg_contains_rows_and_title() {
        let markup = svg_markup(&layout(&totals(&[("Rust", 10)])), "octocat - Top 1 languages");
        let svg = markup.into_string();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("octocat - Top 1 languages"));
        assert!(svg.contains("Rust"));
        assert!(svg.contains("100.0%"));
    }

    #[test]
    fn render_writes_both_files() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("langs.png");
        let svg = dir.path().join("langs.svg");
        render(&totals(&[("Rust", 10), ("C", 5)]), "octocat", &png, &svg).unwrap();
        assert!(png.exists());
        assert!(svg.exists());
    }
}
