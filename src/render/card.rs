//! Profile summary card.
//!
//! A fixed-size banner with the display name, login, bio, and the headline
//! numbers: repository count, followers, join date, and (when line counting
//! ran) total lines of code in the compact `16,3k` notation.

use super::raster::Canvas;
use super::{BACKGROUND, INK, MUTED, RenderError, write_svg};
use crate::numfmt;
use crate::snapshot::StatsSnapshot;
use maud::{Markup, html};
use std::path::Path;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 200;
const MARGIN: u32 = 28;
const NAME_SCALE: u32 = 3;
const BODY_SCALE: u32 = 2;
/// Left accent stripe, same blue as the chart's first bar.
const ACCENT_W: u32 = 6;

/// The card's text content, one entry per rendered line.
#[derive(Debug, Clone)]
pub struct CardLines {
    pub name: String,
    pub handle: String,
    pub bio: Option<String>,
    pub stats: String,
}

/// Assemble the card text from a snapshot.
///
/// The bio is clamped to one line; overflow is cut at a character boundary
/// with an ellipsis rather than wrapping, since the card has a fixed height.
pub fn compose(snapshot: &StatsSnapshot) -> CardLines {
    let name = snapshot
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| snapshot.login.clone());

    let bio = snapshot
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(|b| clamp(b, 60));

    let mut stats = format!(
        "Repos: {}   Followers: {}   Joined: {}",
        snapshot.repo_count,
        numfmt::abbreviate(snapshot.follower_count),
        snapshot.joined,
    );
    if let Some(lines) = snapshot.total_lines {
        stats.push_str(&format!("   Lines: {}", numfmt::abbreviate(lines)));
    }

    CardLines {
        name,
        handle: format!("@{}", snapshot.login),
        bio,
        stats,
    }
}

fn clamp(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Render the card to both output files.
pub fn render(snapshot: &StatsSnapshot, png_path: &Path, svg_path: &Path) -> Result<(), RenderError> {
    let lines = compose(snapshot);
    render_png(&lines, png_path)?;
    write_svg(svg_path, &svg_markup(&lines))?;
    Ok(())
}

fn render_png(lines: &CardLines, path: &Path) -> Result<(), RenderError> {
    let mut canvas = Canvas::new(WIDTH, HEIGHT, BACKGROUND);
    canvas.fill_rect(0, 0, ACCENT_W, HEIGHT, super::PALETTE[0]);

    let x = MARGIN + ACCENT_W;
    canvas.draw_text(x, MARGIN, &lines.name, NAME_SCALE, INK);

    let handle_x = x + Canvas::text_width(&lines.name, NAME_SCALE) + 16;
    let handle_y = MARGIN + Canvas::text_height(NAME_SCALE) - Canvas::text_height(BODY_SCALE);
    canvas.draw_text(handle_x, handle_y, &lines.handle, BODY_SCALE, MUTED);

    let mut y = MARGIN + Canvas::text_height(NAME_SCALE) + 22;
    if let Some(bio) = &lines.bio {
        canvas.draw_text(x, y, bio, BODY_SCALE, INK);
        y += Canvas::text_height(BODY_SCALE) + 20;
    }
    canvas.draw_text(x, y, &lines.stats, BODY_SCALE, MUTED);

    canvas.save_png(path)
}

fn svg_markup(lines: &CardLines) -> Markup {
    let x = MARGIN + ACCENT_W;
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(WIDTH) height=(HEIGHT)
            viewBox=(format!("0 0 {WIDTH} {HEIGHT}"))
            font-family="Segoe UI, Helvetica, Arial, sans-serif" {
            rect width=(WIDTH) height=(HEIGHT) fill=(BACKGROUND.hex()) {}
            rect width=(ACCENT_W) height=(HEIGHT) fill=(super::PALETTE[0].hex()) {}
            text x=(x) y=(MARGIN + 22) font-size="24" font-weight="700" fill=(INK.hex()) {
                (lines.name) " "
                tspan font-size="16" font-weight="400" fill=(MUTED.hex()) { (lines.handle) }
            }
            @if let Some(bio) = &lines.bio {
                text x=(x) y=(MARGIN + 58) font-size="15" fill=(INK.hex()) { (bio) }
            }
            text x=(x) y=(HEIGHT - MARGIN) font-size="15" fill=(MUTED.hex()) {
                (lines.stats)
            }
        }
    }
}
