use num_format::Locale;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use wdi_panels::models::{FilteredTable, IndicatorRow};
use wdi_panels::shape::{DEFAULT_BAR_WIDTH, shape_horizontal_bars, shape_vertical_bars};
use wdi_panels::viz::charts::{self, PanelText};
use wdi_panels::viz;

const COUNTRIES: [&str; 5] = ["Europe & Central Asia", "Ghana", "Malaysia", "Azerbaijan", "Mexico"];

fn table() -> FilteredTable {
    let years: Vec<i32> = (2000..=2005).collect();
    FilteredTable {
        rows: COUNTRIES
            .iter()
            .enumerate()
            .map(|(k, c)| IndicatorRow {
                country_name: c.to_string(),
                indicator_name: "Trained teachers".into(),
                values: years.iter().map(|y| Some(50.0 + k as f64 + (y - 2000) as f64)).collect(),
            })
            .collect(),
        years,
    }
}

fn text() -> PanelText {
    PanelText {
        title_px: 16,
        desc_px: 14,
        tick_px: 12,
        legend_px: 12,
        locale: &Locale::en,
        dec_sep: '.',
    }
}

/// SVG text nodes are written as `>\n{content}\n</text>`.
fn text_node(content: &str) -> String {
    format!(">\n{}\n</text>", content)
}

fn render<F>(draw: F) -> Option<String>
where
    F: FnOnce(&DrawingArea<SVGBackend, plotters::coord::Shift>),
{
    let Some(font) = viz::system_font() else {
        eprintln!("skipping: no system TrueType font found");
        return None;
    };
    viz::ensure_fonts_registered(Some(&font)).unwrap();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (900, 600)).into_drawing_area();
        root.fill(&WHITE).unwrap();
        draw(&root);
        root.present().unwrap();
    }
    Some(svg)
}

#[test]
fn vertical_bars_label_every_year_group() {
    let spec = shape_vertical_bars(&table(), DEFAULT_BAR_WIDTH);
    let Some(svg) = render(|root| charts::draw_vertical_bars(root, "Teachers", &spec, &text()).unwrap())
    else {
        return;
    };
    for year in 2000..=2005 {
        assert!(svg.contains(&text_node(&year.to_string())), "missing year label {year}");
    }
}

#[test]
fn horizontal_bars_label_every_country() {
    let spec = shape_horizontal_bars(&table());
    let Some(svg) = render(|root| charts::draw_horizontal_bars(root, "Enrollment", &spec, &text()).unwrap())
    else {
        return;
    };
    for name in ["Europe &amp; Central Asia", "Ghana", "Malaysia", "Azerbaijan", "Mexico"] {
        assert!(svg.contains(&text_node(name)), "missing country label {name}");
    }
}
