//! Table formatting for reports.
//!
//! Provides functions to generate Typst markup for:
//! - Run settings summary
//! - Quadrant snapshot counts
//! - Ranking table (quadrant-shaded rows, bold daily-entry YES)
//! - Tail listing per sector
//! - Skipped sectors

use crate::domain::quadrant::Quadrant;
use crate::domain::ranking::{QuadrantCounts, RankingRow, Tail};
use crate::domain::settings::RotationSettings;
use crate::domain::universe::{Instrument, SkippedSector};
use chrono::NaiveDate;

/// Row fill for the ranking table.
pub fn quadrant_fill(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::Leading => "#E6F4EA",
        Quadrant::Weakening => "#FFF4E5",
        Quadrant::Lagging => "#FDECEA",
        Quadrant::Improving => "#E8F0FE",
    }
}

/// Escape characters that carry meaning in Typst markup.
pub fn escape_typst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '#' | '*' | '_' | '$' | '[' | ']' | '<' | '>' | '@' | '`' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn render_settings_summary(
    settings: &RotationSettings,
    benchmark: &Instrument,
    as_of: Option<NaiveDate>,
) -> String {
    let mut out = String::from("#table(\n  columns: 2,\n  [*Setting*], [*Value*],\n");
    out.push_str(&format!(
        "  [Benchmark], [{} ({})],\n",
        escape_typst(&benchmark.name),
        escape_typst(&benchmark.symbol)
    ));
    out.push_str(&format!("  [Timeframe], [{}],\n", settings.timeframe));
    out.push_str(&format!("  [Lookback], [{}],\n", settings.period));
    out.push_str(&format!(
        "  [Mode], [{} (tail {})],\n",
        settings.mode,
        settings.tail_length()
    ));
    out.push_str(&format!("  [Smoothing window], [{}],\n", settings.window));
    out.push_str(&format!(
        "  [As of], [{}],\n",
        as_of.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
    ));
    out.push_str(")\n");
    out
}

pub fn render_quadrant_snapshot(counts: &QuadrantCounts) -> String {
    let mut out = String::from("#table(\n  columns: 4,\n  align: center,\n");
    for (quadrant, _) in counts.iter() {
        out.push_str(&format!(
            "  table.cell(fill: rgb(\"{}\"))[*{}*],\n",
            quadrant_fill(quadrant),
            quadrant
        ));
    }
    for (_, count) in counts.iter() {
        out.push_str(&format!("  [{}],\n", count));
    }
    out.push_str(")\n");
    out
}

pub fn render_ranking_table(rows: &[RankingRow]) -> String {
    if rows.is_empty() {
        return "_No sectors could be classified._".to_string();
    }

    let mut out = String::from(
        "#table(\n  columns: 5,\n  align: (left, right, right, left, center),\n",
    );
    out.push_str("  [*Sector*], [*RS-Ratio*], [*RS-Momentum*], [*Quadrant*], [*Daily Entry*],\n");

    for row in rows {
        let fill = quadrant_fill(row.quadrant);
        let cells = [
            escape_typst(&row.sector),
            format!("{:.2}", row.rs_ratio),
            format!("{:.2}", row.rs_momentum),
            row.quadrant.to_string(),
            row.daily_entry.to_string(),
        ];
        let rendered: Vec<String> = cells
            .iter()
            .map(|cell| {
                if row.daily_entry.is_yes() {
                    format!("table.cell(fill: rgb(\"{}\"))[*{}*]", fill, cell)
                } else {
                    format!("table.cell(fill: rgb(\"{}\"))[{}]", fill, cell)
                }
            })
            .collect();
        out.push_str(&format!("  {},\n", rendered.join(", ")));
    }

    out.push_str(")\n");
    out
}

pub fn render_tail_table(tails: &[Tail]) -> String {
    if tails.iter().all(|t| t.points.is_empty()) {
        return "_No tail data._".to_string();
    }

    let mut out = String::from("#table(\n  columns: 4,\n  align: (left, left, right, right),\n");
    out.push_str("  [*Sector*], [*Date*], [*RS-Ratio*], [*RS-Momentum*],\n");

    for tail in tails {
        for point in &tail.points {
            out.push_str(&format!(
                "  [{}], [{}], [{:.2}], [{:.2}],\n",
                escape_typst(&tail.sector),
                point.date.format("%Y-%m-%d"),
                point.rs_ratio,
                point.rs_momentum
            ));
        }
    }

    out.push_str(")\n");
    out
}

/// Skipped plus unclassified sectors. Empty when nothing was left out.
pub fn render_skipped_sectors(skipped: &[SkippedSector], unclassified: &[String]) -> String {
    if skipped.is_empty() && unclassified.is_empty() {
        return String::new();
    }

    let mut out = String::from("== Excluded Sectors\n\n");
    for s in skipped {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            escape_typst(&s.sector),
            escape_typst(&s.symbol),
            escape_typst(&s.reason.to_string())
        ));
    }
    for sector in unclassified {
        out.push_str(&format!(
            "- {}: not enough history to classify\n",
            escape_typst(sector)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rotation::RotationPoint;
    use crate::domain::settings::{Mode, Timeframe};
    use crate::domain::signal::{DailyEntry, DailyEntrySignal};
    use crate::domain::universe::SkipReason;

    fn row(sector: &str, quadrant: Quadrant, daily_entry: DailyEntry) -> RankingRow {
        RankingRow {
            sector: sector.into(),
            rs_ratio: 101.25,
            rs_momentum: 99.5,
            quadrant,
            daily_entry,
        }
    }

    #[test]
    fn escape_typst_special_characters() {
        assert_eq!(escape_typst("Bank"), "Bank");
        assert_eq!(escape_typst("^NSE#1 *x*"), "^NSE\\#1 \\*x\\*");
        assert_eq!(escape_typst("a_b$c"), "a\\_b\\$c");
    }

    #[test]
    fn settings_summary_lists_run() {
        let settings = RotationSettings {
            timeframe: Timeframe::Weekly,
            mode: Mode::Swing,
            ..RotationSettings::default()
        };
        let benchmark = Instrument {
            name: "NIFTY 50 (Index)".into(),
            symbol: "^NSEI".into(),
        };
        let out = render_settings_summary(
            &settings,
            &benchmark,
            NaiveDate::from_ymd_opt(2024, 6, 28),
        );
        assert!(out.contains("[NIFTY 50 (Index) (^NSEI)]"));
        assert!(out.contains("[Weekly]"));
        assert!(out.contains("[2y]"));
        assert!(out.contains("[Swing (tail 5)]"));
        assert!(out.contains("[2024-06-28]"));
    }

    #[test]
    fn quadrant_snapshot_has_four_cells() {
        let mut counts = QuadrantCounts::default();
        counts.add(Quadrant::Leading);
        counts.add(Quadrant::Leading);
        counts.add(Quadrant::Lagging);
        let out = render_quadrant_snapshot(&counts);
        assert_eq!(out.matches("table.cell").count(), 4);
        assert!(out.contains("[*Leading*]"));
        assert!(out.contains("  [2],\n  [0],\n  [0],\n  [1],\n"));
    }

    #[test]
    fn ranking_table_shades_and_bolds() {
        let rows = vec![
            row("IT", Quadrant::Leading, DailyEntry::Signal(DailyEntrySignal::Yes)),
            row("Metal", Quadrant::Lagging, DailyEntry::NotEvaluated),
        ];
        let out = render_ranking_table(&rows);
        assert!(out.contains("table.cell(fill: rgb(\"#E6F4EA\"))[*IT*]"));
        assert!(out.contains("table.cell(fill: rgb(\"#E6F4EA\"))[*YES*]"));
        assert!(out.contains("table.cell(fill: rgb(\"#FDECEA\"))[Metal]"));
        assert!(out.contains("table.cell(fill: rgb(\"#FDECEA\"))[—]"));
        assert!(out.contains("[101.25]"));
        assert!(out.contains("[99.50]"));
    }

    #[test]
    fn ranking_table_empty() {
        assert_eq!(render_ranking_table(&[]), "_No sectors could be classified._");
    }

    #[test]
    fn tail_table_lists_points() {
        let tails = vec![Tail {
            sector: "Bank".into(),
            points: vec![
                RotationPoint {
                    date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
                    rs_ratio: 100.123,
                    rs_momentum: 99.876,
                },
                RotationPoint {
                    date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
                    rs_ratio: 100.5,
                    rs_momentum: 100.25,
                },
            ],
        }];
        let out = render_tail_table(&tails);
        assert!(out.contains("[Bank], [2024-06-21], [100.12], [99.88],"));
        assert!(out.contains("[Bank], [2024-06-28], [100.50], [100.25],"));
        assert_eq!(render_tail_table(&[]), "_No tail data._");
    }

    #[test]
    fn skipped_sectors_listed() {
        let skipped = vec![SkippedSector {
            sector: "Energy".into(),
            symbol: "^CNXENERGY".into(),
            reason: SkipReason::NoData,
        }];
        let out = render_skipped_sectors(&skipped, &["Auto".to_string()]);
        assert!(out.contains("== Excluded Sectors"));
        assert!(out.contains("- Energy (^CNXENERGY): no data"));
        assert!(out.contains("- Auto: not enough history to classify"));
        assert_eq!(render_skipped_sectors(&[], &[]), "");
    }
}
