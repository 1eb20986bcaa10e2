//! Figure composition: four chart panels in a 2×2 grid under a title band, with author
//! boxes and a wrapped abstract underneath, rendered to **PNG** or **SVG**.
//!
//! - Shared white-grid theme, Office palette for bars/lines
//! - Locale-aware tick labels (`30,000` vs `30.000`)
//! - External legends to the right of every panel, long labels wrapped

pub mod charts;
pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{DEFAULT_FONT_SIZES, Figure, FigureLayout, FontSizes, LegendGlyph, PanelSpec};

use crate::error::{AnalysisError, Result};
use log::{debug, info, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use charts::PanelText;
use text::{estimate_text_width_px, wrap_columns};
use util::{ACCENT, map_locale, rounded_rect_points};

/// Searched in order when no font file is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font currently registered for the "sans-serif" family. `ab_glyph` does not discover OS fonts.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// First readable entry of the system font list, if any.
pub fn system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register a TrueType font for all figure text.
///
/// An explicit `preferred` path must load and replaces any earlier font. Without one, an
/// already registered font is kept, otherwise the system list is searched.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> Result<PathBuf> {
    let mut registered = REGISTERED_FONT
        .lock()
        .map_err(|_| AnalysisError::FontUnavailable("font registry lock poisoned".into()))?;
    match (preferred, registered.as_ref()) {
        (None, Some(current)) => return Ok(current.clone()),
        (Some(wanted), Some(current)) if wanted == current.as_path() => return Ok(current.clone()),
        _ => {}
    }
    let candidates: Vec<PathBuf> = match preferred {
        Some(p) => vec![p.to_path_buf()],
        None => SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
    };
    for path in &candidates {
        let Ok(bytes) = fs::read(path) else {
            continue;
        };
        // Registered fonts must outlive the process-wide font table.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
            Ok(()) => {
                info!("Registered font {}", path.display());
                *registered = Some(path.clone());
                return Ok(path.clone());
            }
            Err(_) => warn!("{} is not a usable TrueType font", path.display()),
        }
    }
    Err(AnalysisError::FontUnavailable(match preferred {
        Some(p) => format!("cannot load {}", p.display()),
        None => "no TrueType font found in the usual system locations; set font_path".into(),
    }))
}

/// Render `figure` with its decorations to `out_path`.
///
/// The file is written only after every panel has been drawn. A `.svg` extension selects
/// the SVG backend, anything else the bitmap backend.
pub fn compose_figure<P: AsRef<Path>>(figure: &Figure, layout: &FigureLayout, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let export_err = |reason: String| AnalysisError::ExportFailed {
        path: out_path.to_path_buf(),
        reason,
    };
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(export_err(format!(
            "output directory {} does not exist",
            parent.display()
        )));
    }
    ensure_fonts_registered(layout.font_path.as_deref())?;

    let size = layout.canvas_px();
    info!("Composing {}x{} px figure into {}", size.0, size.1, out_path.display());

    if is_svg(out_path) {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw_figure(&root, figure, layout)?;
            root.present().map_err(|e| export_err(format!("{e:?}")))?;
        }
        fs::write(out_path, svg).map_err(|e| export_err(e.to_string()))?;
    } else {
        // The bitmap backend saves on drop, so draw into a sibling file and rename on success.
        let staging = staging_path(out_path);
        let drawn = {
            let root = BitMapBackend::new(&staging, size).into_drawing_area();
            draw_figure(&root, figure, layout).and_then(|()| {
                root.present().map_err(|e| export_err(format!("{e:?}")))
            })
        };
        if let Err(e) = drawn {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        fs::rename(&staging, out_path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            export_err(e.to_string())
        })?;
    }
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// `dir/.name.partial.ext`; keeps the extension so the encoder matches the final file.
fn staging_path(out_path: &Path) -> PathBuf {
    let name = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = match out_path.extension() {
        Some(ext) => format!(".{name}.partial.{}", ext.to_string_lossy()),
        None => format!(".{name}.partial"),
    };
    out_path.with_file_name(file)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    layout: &FigureLayout,
) -> Result<()> {
    root.fill(&WHITE).map_err(AnalysisError::render)?;

    let pad = layout.pad_px();
    let body = root.margin(pad, pad, pad, pad);
    let (_, fig_h) = layout.figure_px();
    let (fig_area, footer) = body.split_vertically(fig_h);

    let suptitle_px = layout.px(layout.fonts.suptitle);
    let band_h = (fig_h / 10).max(suptitle_px * 2);
    let (band, grid) = fig_area.split_vertically(band_h);
    draw_title_band(&band, &layout.title, suptitle_px)?;

    let (locale, dec_sep) = map_locale(&layout.locale);
    let text = PanelText {
        title_px: layout.px(layout.fonts.panel_title),
        desc_px: layout.px(layout.fonts.axis_desc),
        tick_px: layout.px(layout.fonts.tick),
        legend_px: layout.px(layout.fonts.legend),
        locale,
        dec_sep,
    };
    let cell_gap = text.title_px;
    for (cell, panel) in grid.split_evenly((2, 2)).iter().zip(figure.panels.iter()) {
        let cell = cell.margin(cell_gap, cell_gap, cell_gap, cell_gap);
        debug!("Drawing panel '{}'", panel.title());
        match panel {
            PanelSpec::VerticalBars { title, spec } => charts::draw_vertical_bars(&cell, title, spec, &text)?,
            PanelSpec::Pie { title, spec } => charts::draw_pie(&cell, title, spec, &text)?,
            PanelSpec::HorizontalBars { title, spec } => {
                charts::draw_horizontal_bars(&cell, title, spec, &text)?
            }
            PanelSpec::Lines { title, spec } => charts::draw_lines(&cell, title, spec, &text)?,
        }
    }

    draw_footer(&footer, layout)
}

fn draw_title_band<DB: DrawingBackend>(band: &DrawingArea<DB, Shift>, title: &str, font_px: u32) -> Result<()> {
    let (w, h) = band.dim_in_pixel();
    band.fill(&ACCENT).map_err(AnalysisError::render)?;
    let style = TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Center, VPos::Center));
    band.draw(&Text::new(title, (w as i32 / 2, h as i32 / 2), style))
        .map_err(AnalysisError::render)
}

/// Author boxes (stacked, right-aligned near 82% of the width), then the centered abstract.
fn draw_footer<DB: DrawingBackend>(footer: &DrawingArea<DB, Shift>, layout: &FigureLayout) -> Result<()> {
    let (w, _) = footer.dim_in_pixel();
    let w = w as i32;
    let gap = layout.px(12.0) as i32;

    let author_px = layout.px(layout.fonts.author);
    let box_h = layout.author_box_height_px() as i32;
    let inner_pad = author_px as i32 / 2;
    let author_style =
        TextStyle::from((FontFamily::SansSerif, author_px)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = gap / 2;
    for line in &layout.author_lines {
        let box_w = estimate_text_width_px(line, author_px) as i32 + inner_pad * 2;
        let x0 = ((w as f64 * 0.82) as i32).min(w - box_w).max(0);
        let x1 = (x0 + box_w).min(w - 1);
        let outline = rounded_rect_points(x0, y, x1, y + box_h - inner_pad / 2, inner_pad);
        footer
            .draw(&Polygon::new(outline.clone(), ACCENT.mix(0.5).filled()))
            .map_err(AnalysisError::render)?;
        let mut closed = outline;
        if let Some(first) = closed.first().copied() {
            closed.push(first);
        }
        footer
            .draw(&PathElement::new(closed, BLACK.stroke_width(1)))
            .map_err(AnalysisError::render)?;
        footer
            .draw(&Text::new(
                line.as_str(),
                (x0 + inner_pad, y + (box_h - inner_pad / 2) / 2),
                author_style.clone(),
            ))
            .map_err(AnalysisError::render)?;
        y += box_h;
    }

    let abstract_px = layout.px(layout.fonts.abstract_text);
    let line_h = layout.abstract_line_height_px() as i32;
    let style =
        TextStyle::from((FontFamily::SansSerif, abstract_px)).pos(Pos::new(HPos::Center, VPos::Center));
    y += gap;
    for line in wrap_columns(&layout.abstract_text, layout.abstract_wrap_columns) {
        footer
            .draw(&Text::new(line, (w / 2, y + line_h / 2), style.clone()))
            .map_err(AnalysisError::render)?;
        y += line_h;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_file_keeps_extension() {
        let p = staging_path(Path::new("/tmp/out/22082221.png"));
        assert_eq!(p, PathBuf::from("/tmp/out/.22082221.partial.png"));
        assert_eq!(staging_path(Path::new("fig")), PathBuf::from(".fig.partial"));
    }

    #[test]
    fn svg_extension_ignores_case() {
        assert!(is_svg(Path::new("out/FIG.SVG")));
        assert!(is_svg(Path::new("fig.Svg")));
        assert!(!is_svg(Path::new("fig.png")));
        assert!(!is_svg(Path::new("svg")));
    }

    #[test]
    fn explicit_font_must_load_even_after_registration() {
        if let Some(found) = system_font() {
            assert_eq!(ensure_fonts_registered(Some(&found)).unwrap(), found);
        }
        let err = ensure_fonts_registered(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, AnalysisError::FontUnavailable(_)), "{:?}", err);
    }
}
