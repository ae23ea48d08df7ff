//! SVG rendering of the relative rotation graph.
//!
//! The plot is square and centred on (100, 100). Its half-span is the largest
//! distance of any tail point from 100, padded by 10% and never below
//! `MIN_HALF_SPAN`, so every tail fits and the quadrants stay equal in size.

use crate::domain::quadrant::{Quadrant, NEUTRAL};
use crate::domain::ranking::Tail;

const CHART_SIZE: f64 = 560.0;
const MARGIN: f64 = 50.0;
const MIN_HALF_SPAN: f64 = 2.0;
const HEAD_RADIUS: f64 = 7.0;
const POINT_RADIUS: f64 = 2.5;

pub fn sector_color(sector: &str) -> &'static str {
    match sector {
        "Bank" => "#1f77b4",
        "IT" => "#ff7f0e",
        "FMCG" => "#2ca02c",
        "Auto" => "#d62728",
        "Pharma" => "#9467bd",
        "Metal" => "#8c564b",
        "Energy" => "#e377c2",
        _ => "#000000",
    }
}

pub fn quadrant_shade(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::Leading => "#C8E6C9",
        Quadrant::Weakening => "#FFE0B2",
        Quadrant::Lagging => "#FFCDD2",
        Quadrant::Improving => "#BBDEFB",
    }
}

fn half_span(tails: &[Tail]) -> f64 {
    let furthest = tails
        .iter()
        .flat_map(|t| t.points.iter())
        .flat_map(|p| [p.rs_ratio, p.rs_momentum])
        .filter(|v| v.is_finite())
        .map(|v| (v - NEUTRAL).abs())
        .fold(0.0_f64, f64::max);
    (furthest * 1.1).max(MIN_HALF_SPAN)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the tails as a standalone SVG document. Empty input gives an empty string.
pub fn generate_rrg_svg(tails: &[Tail]) -> String {
    if tails.iter().all(|t| t.points.is_empty()) {
        return String::new();
    }

    let span = half_span(tails);
    let plot = CHART_SIZE - 2.0 * MARGIN;
    let centre = MARGIN + plot / 2.0;

    let x_scale = |v: f64| -> f64 { MARGIN + (v - (NEUTRAL - span)) / (2.0 * span) * plot };
    let y_scale = |v: f64| -> f64 { MARGIN + plot - (v - (NEUTRAL - span)) / (2.0 * span) * plot };

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{0}" height="{0}" viewBox="0 0 {0} {0}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_SIZE
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    // (quadrant, left, top) of each shaded half-plot square
    let half = plot / 2.0;
    for (quadrant, x, y) in [
        (Quadrant::Improving, MARGIN, MARGIN),
        (Quadrant::Leading, centre, MARGIN),
        (Quadrant::Lagging, MARGIN, centre),
        (Quadrant::Weakening, centre, centre),
    ] {
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" fill-opacity=\"0.5\"/>\n",
            x,
            y,
            half,
            half,
            quadrant_shade(quadrant)
        ));
        let anchor = if x < centre { "start" } else { "end" };
        let label_x = if x < centre { x + 8.0 } else { x + half - 8.0 };
        let label_y = if y < centre { y + 18.0 } else { y + half - 8.0 };
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" font-size=\"12\" font-weight=\"bold\" fill=\"#555\">{}</text>\n",
            label_x,
            label_y,
            anchor,
            quadrant.label().to_uppercase()
        ));
    }

    svg.push_str(&format!(
        "  <rect x=\"{0}\" y=\"{0}\" width=\"{1}\" height=\"{1}\" fill=\"none\" stroke=\"#999\" stroke-width=\"1\"/>\n",
        MARGIN, plot
    ));
    svg.push_str(&format!(
        "  <line x1=\"{0:.1}\" y1=\"{1}\" x2=\"{0:.1}\" y2=\"{2}\" stroke=\"#666\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>\n",
        centre,
        MARGIN,
        MARGIN + plot
    ));
    svg.push_str(&format!(
        "  <line x1=\"{1}\" y1=\"{0:.1}\" x2=\"{2}\" y2=\"{0:.1}\" stroke=\"#666\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>\n",
        centre,
        MARGIN,
        MARGIN + plot
    ));

    // Axis extremes and the neutral tick on both axes
    for value in [NEUTRAL - span, NEUTRAL, NEUTRAL + span] {
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{:.1}</text>\n",
            x_scale(value),
            MARGIN + plot + 15.0,
            value
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{:.1}</text>\n",
            MARGIN - 5.0,
            y_scale(value) + 3.0,
            value
        ));
    }
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#333\">RS-Ratio</text>\n",
        centre,
        CHART_SIZE - 10.0
    ));
    svg.push_str(&format!(
        "  <text x=\"15\" y=\"{0:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"#333\" transform=\"rotate(-90 15 {0:.1})\">RS-Momentum</text>\n",
        centre
    ));

    for tail in tails {
        let Some(head) = tail.head() else {
            continue;
        };
        let color = sector_color(&tail.sector);

        let points: Vec<String> = tail
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", x_scale(p.rs_ratio), y_scale(p.rs_momentum)))
            .collect();
        svg.push_str(&format!(
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-opacity=\"0.9\"/>\n",
            points.join(" "),
            color
        ));

        for p in &tail.points[..tail.points.len() - 1] {
            svg.push_str(&format!(
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\"/>\n",
                x_scale(p.rs_ratio),
                y_scale(p.rs_momentum),
                POINT_RADIUS,
                color
            ));
        }

        let (hx, hy) = (x_scale(head.rs_ratio), y_scale(head.rs_momentum));
        svg.push_str(&format!(
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\" stroke=\"black\" stroke-width=\"1\"/>\n",
            hx, hy, HEAD_RADIUS, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" font-weight=\"bold\" fill=\"#222\">{}</text>\n",
            hx + HEAD_RADIUS + 2.0,
            hy - HEAD_RADIUS,
            escape(&tail.sector)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
