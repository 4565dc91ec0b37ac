//! SVG line chart of price and moving average.

use crate::domain::indicator::IndicatorPoint;
use crate::domain::price_series::PricePoint;

pub const CHART_WIDTH: f64 = 960.0;
pub const DEFAULT_CHART_HEIGHT: u32 = 500;

const PADDING: f64 = 48.0;
const PRICE_COLOR: &str = "#1f77b4";
const AVERAGE_COLOR: &str = "#ff7f0e";

pub fn generate_trend_svg(
    prices: &[PricePoint],
    indicator: &[IndicatorPoint],
    indicator_label: &str,
    height: u32,
) -> String {
    if prices.is_empty() {
        return "<p>No price data available.</p>".to_string();
    }

    let width = CHART_WIDTH;
    let height = f64::from(height);
    let plot_width = width - 2.0 * PADDING;
    let plot_height = height - 2.0 * PADDING;

    let values = prices
        .iter()
        .map(|p| p.close)
        .chain(indicator.iter().filter_map(|p| p.value));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let range = max - min;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if prices.len() > 1 {
        plot_width / (prices.len() - 1) as f64
    } else {
        0.0
    };

    let x_at = |i: usize| PADDING + i as f64 * scale_x;
    let y_at = |v: f64| {
        if range > 0.0 {
            height - PADDING - (v - min) * scale_y
        } else {
            height / 2.0
        }
    };

    let price_points: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.1},{:.1}", x_at(i), y_at(p.close)))
        .collect();

    // one polyline per run of defined values
    let mut average_runs: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for (i, point) in indicator.iter().enumerate() {
        match point.value {
            Some(v) => current.push(format!("{:.1},{:.1}", x_at(i), y_at(v))),
            None if !current.is_empty() => average_runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        average_runs.push(current);
    }

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.0} {h:.0}" width="100%" height="{h:.0}" role="img">"#,
        w = width,
        h = height
    );
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{w:.0}" height="{h:.0}" fill="#ffffff"/>"##,
        w = width,
        h = height
    ));
    svg.push_str(&format!(
        r##"<line x1="{x0:.1}" y1="{y1:.1}" x2="{x1:.1}" y2="{y1:.1}" stroke="#cccccc"/>"##,
        x0 = PADDING,
        x1 = width - PADDING,
        y1 = height - PADDING
    ));
    svg.push_str(&format!(
        r##"<line x1="{x0:.1}" y1="{y0:.1}" x2="{x0:.1}" y2="{y1:.1}" stroke="#cccccc"/>"##,
        x0 = PADDING,
        y0 = PADDING,
        y1 = height - PADDING
    ));
    svg.push_str(&format!(
        r#"<polyline class="price" fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
        price_points.join(" "),
        color = PRICE_COLOR
    ));
    for run in &average_runs {
        svg.push_str(&format!(
            r#"<polyline class="average" fill="none" stroke="{color}" stroke-width="2" stroke-dasharray="6 4" points="{}"/>"#,
            run.join(" "),
            color = AVERAGE_COLOR
        ));
    }

    let label_style = r##"font-family="sans-serif" font-size="12" fill="#555555""##;
    svg.push_str(&format!(
        r#"<text x="4" y="{:.1}" {label_style}>{:.2}</text>"#,
        y_at(max) + 4.0,
        max
    ));
    svg.push_str(&format!(
        r#"<text x="4" y="{:.1}" {label_style}>{:.2}</text>"#,
        y_at(min) + 4.0,
        min
    ));
    if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" {label_style}>{}</text>"#,
            PADDING,
            height - PADDING / 3.0,
            first.date
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" {label_style}>{}</text>"#,
            width - PADDING,
            height - PADDING / 3.0,
            last.date
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" {label_style}><tspan fill="{price}">&#9644; Price</tspan> <tspan fill="{average}">&#9644; {}</tspan></text>"#,
        PADDING,
        PADDING / 2.0,
        indicator_label,
        price = PRICE_COLOR,
        average = AVERAGE_COLOR
    ));
    svg.push_str("</svg>");
    svg
}
