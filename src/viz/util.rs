//! Utility functions for visualization: colors, axis ranges, locale-aware tick labels.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Saturated palette used for pie wedges.
const BRIGHT10: [RGBColor; 10] = [
    RGBColor(2, 62, 255),
    RGBColor(255, 124, 0),
    RGBColor(26, 201, 56),
    RGBColor(232, 0, 11),
    RGBColor(139, 43, 226),
    RGBColor(159, 72, 0),
    RGBColor(241, 76, 193),
    RGBColor(163, 163, 163),
    RGBColor(255, 196, 0),
    RGBColor(0, 215, 255),
];

/// Desaturated palette used for horizontal bars.
const MUTED10: [RGBColor; 10] = [
    RGBColor(72, 120, 208),
    RGBColor(238, 133, 74),
    RGBColor(106, 204, 100),
    RGBColor(214, 95, 95),
    RGBColor(149, 108, 180),
    RGBColor(140, 97, 60),
    RGBColor(220, 126, 192),
    RGBColor(121, 121, 121),
    RGBColor(213, 187, 103),
    RGBColor(130, 198, 226),
];

/// Title band / author box accent (`#7FC7D9`).
pub const ACCENT: RGBColor = RGBColor(127, 199, 217);
/// Grid and frame color of the white-grid theme.
pub const GRID_GRAY: RGBColor = RGBColor(204, 204, 204);

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

#[inline]
pub fn bright_color(idx: usize) -> RGBAColor {
    BRIGHT10[idx % BRIGHT10.len()].to_rgba()
}

#[inline]
pub fn muted_color(idx: usize) -> RGBAColor {
    MUTED10[idx % MUTED10.len()].to_rgba()
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Axis tick text: thousands separators for large magnitudes, 0–2 decimals otherwise.
pub fn format_tick(v: f64, locale: &Locale, dec_sep: char) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if dec_sep == '.' { s } else { s.replace('.', &dec_sep.to_string()) }
}

/// Value axis range that always includes zero, padded 5% away from it.
/// Empty input yields `0..1`.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    let mut any = false;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
        any = true;
    }
    if !any || (hi - lo).abs() < f64::EPSILON {
        return (lo.min(0.0), hi.max(lo) + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (if lo < 0.0 { lo - pad } else { lo }, if hi > 0.0 { hi + pad } else { hi })
}

/// Left label area width (px) wide enough for the formatted ticks over `lo..hi`.
pub fn left_label_area_px(lo: f64, hi: f64, ticks: usize, font_px: u32, fmt: &dyn Fn(f64) -> String) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 { 0.0 } else { i as f64 / ticks as f64 };
        let s = fmt(lo + (hi - lo) * t);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // Tick marks, axis description and breathing room.
    max_px.saturating_add(font_px * 3)
}

/// Polygon outline of a rounded rectangle (corner radius clamped to half the short side).
pub fn rounded_rect_points(x0: i32, y0: i32, x1: i32, y1: i32, radius: i32) -> Vec<(i32, i32)> {
    let r = radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0) as f64;
    let corners = [
        (x1 as f64 - r, y0 as f64 + r, 270.0), // top-right, sweeping 270..360
        (x1 as f64 - r, y1 as f64 - r, 0.0),   // bottom-right
        (x0 as f64 + r, y1 as f64 - r, 90.0),  // bottom-left
        (x0 as f64 + r, y0 as f64 + r, 180.0), // top-left
    ];
    let mut pts = Vec::with_capacity(4 * 10);
    for (cx, cy, start) in corners {
        for step in 0..=9 {
            let a = (start + step as f64 * 10.0).to_radians();
            pts.push(((cx + r * a.cos()).round() as i32, (cy + r * a.sin()).round() as i32));
        }
    }
    pts
}

/// Points approximating a pie wedge in pixel space (y grows downward).
/// Angles are degrees, counter-clockwise from 3 o'clock.
pub fn wedge_points(center: (i32, i32), radius: f64, start_deg: f64, end_deg: f64) -> Vec<(i32, i32)> {
    let steps = ((end_deg - start_deg).abs().ceil() as usize).max(1);
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push(center);
    for i in 0..=steps {
        let a = (start_deg + (end_deg - start_deg) * i as f64 / steps as f64).to_radians();
        pts.push((
            center.0 + (radius * a.cos()).round() as i32,
            center.1 - (radius * a.sin()).round() as i32,
        ));
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_use_locale_grouping() {
        let (en_locale, dot) = map_locale("en");
        assert_eq!(format_tick(1_234_567.0, en_locale, dot), "1,234,567");
        let (de_locale, comma) = map_locale("de");
        assert_eq!(format_tick(1_234_567.0, de_locale, comma), "1.234.567");
        assert_eq!(format_tick(2.5, de_locale, comma), "2,50");
        assert_eq!(format_tick(85.34, en_locale, dot), "85.3");
    }

    #[test]
    fn value_range_includes_zero() {
        assert_eq!(value_range(Vec::<f64>::new()), (0.0, 1.0));
        let (lo, hi) = value_range([80.0, 90.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 94.5).abs() < 1e-9);
        let (lo, _) = value_range([-10.0, 10.0]);
        assert!(lo < -10.0);
    }

    #[test]
    fn wedge_starts_at_center() {
        let pts = wedge_points((100, 100), 50.0, 0.0, 90.0);
        assert_eq!(pts[0], (100, 100));
        assert_eq!(pts[1], (150, 100));
        assert_eq!(*pts.last().unwrap(), (100, 50));
    }
}
