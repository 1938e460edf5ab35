//! Statistics image rendering.
//!
//! Stage 2 of the pipeline. Consumes the fetch snapshot and produces four
//! deterministic files in the asset directory:
//!
//! ```text
//! assets/stats/github_stats_langs.png   language bar chart (raster)
//! assets/stats/github_stats_langs.svg   language bar chart (vector)
//! assets/stats/github_stats_card.png    profile summary card (raster)
//! assets/stats/github_stats_card.svg    profile summary card (vector)
//! ```
//!
//! Both variants of each image share one layout computation; [`chart`] and
//! [`card`] each emit it twice — as maud-built SVG markup (SVG is XML, so
//! the same compile-time-checked templating used for any markup applies) and
//! as pixels on the [`raster::Canvas`] with the embedded bitmap font. No
//! system font stack, no native graphics library; the binary stays
//! self-contained.

pub mod card;
pub mod chart;
mod font;
mod raster;

use crate::config::Config;
use crate::github;
use crate::snapshot::StatsSnapshot;
use maud::Markup;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Solid RGB color. Alpha is always opaque in these images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS hex form for the SVG emitters.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub(crate) const BACKGROUND: Rgb = Rgb(255, 255, 255);
pub(crate) const INK: Rgb = Rgb(36, 41, 47);
pub(crate) const MUTED: Rgb = Rgb(110, 119, 129);

/// Bar colors, cycled in rank order.
pub(crate) const PALETTE: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
];

/// Render all four images for a snapshot. Returns the written paths in a
/// fixed order: chart PNG, chart SVG, card PNG, card SVG.
pub fn render_all(config: &Config, snapshot: &StatsSnapshot) -> Result<Vec<PathBuf>, RenderError> {
    let ranked = github::top_languages(snapshot.languages.clone(), config.top_n);

    let chart_png = config.image_path("langs", "png");
    let chart_svg = config.image_path("langs", "svg");
    chart::render(&ranked, &snapshot.login, &chart_png, &chart_svg)?;

    let card_png = config.image_path("card", "png");
    let card_svg = config.image_path("card", "svg");
    card::render(snapshot, &card_png, &card_svg)?;

    Ok(vec![chart_png, chart_svg, card_png, card_svg])
}

/// Write maud-built SVG markup to disk, creating parent directories.
pub(crate) fn write_svg(path: &Path, markup: &Markup) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, markup.0.as_str())?;
    Ok(())
}
