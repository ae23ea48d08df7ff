//! Ranked rotation snapshot: table rows, tails and per-quadrant counts.

use crate::domain::quadrant::{classify, Quadrant};
use crate::domain::rotation::{RotationPoint, RotationSeries};
use crate::domain::signal::DailyEntry;
use chrono::NaiveDate;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub sector: String,
    /// Rounded to 2 decimals.
    pub rs_ratio: f64,
    /// Rounded to 2 decimals.
    pub rs_momentum: f64,
    pub quadrant: Quadrant,
    pub daily_entry: DailyEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tail {
    pub sector: String,
    pub points: Vec<RotationPoint>,
}

impl Tail {
    pub fn head(&self) -> Option<&RotationPoint> {
        self.points.last()
    }
}

/// Number of sectors per quadrant. All four quadrants are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadrantCounts {
    counts: [usize; 4],
}

impl QuadrantCounts {
    pub fn add(&mut self, quadrant: Quadrant) {
        self.counts[quadrant.priority()] += 1;
    }

    pub fn get(&self, quadrant: Quadrant) -> usize {
        self.counts[quadrant.priority()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// (quadrant, count) in Leading, Improving, Weakening, Lagging order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, usize)> + '_ {
        Quadrant::ALL.iter().map(|&q| (q, self.get(q)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationSnapshot {
    pub as_of: Option<NaiveDate>,
    pub rows: Vec<RankingRow>,
    pub tails: Vec<Tail>,
    pub counts: QuadrantCounts,
    /// Sectors whose latest pair is still undefined.
    pub unclassified: Vec<String>,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify each sector's latest pair, rank the rows and collect tails.
///
/// `entry_for` supplies the daily-entry column for a sector once its
/// quadrant is known, so the caller decides when the signal is evaluated.
pub fn rank<F>(rotation: &RotationSeries, tail_length: usize, mut entry_for: F) -> RotationSnapshot
where
    F: FnMut(&str, Quadrant) -> DailyEntry,
{
    let mut rows = Vec::with_capacity(rotation.lines.len());
    let mut tails = Vec::with_capacity(rotation.lines.len());
    let mut counts = QuadrantCounts::default();
    let mut unclassified = Vec::new();

    for line in &rotation.lines {
        let Some(latest) = line.latest() else {
            tracing::debug!(sector = %line.sector, "not enough history to classify");
            unclassified.push(line.sector.clone());
            continue;
        };

        let quadrant = classify(latest.rs_ratio, latest.rs_momentum);
        tracing::debug!(
            sector = %line.sector,
            rs_ratio = latest.rs_ratio,
            rs_momentum = latest.rs_momentum,
            %quadrant,
            "classified"
        );
        counts.add(quadrant);

        rows.push(RankingRow {
            sector: line.sector.clone(),
            rs_ratio: round2(latest.rs_ratio),
            rs_momentum: round2(latest.rs_momentum),
            quadrant,
            daily_entry: entry_for(&line.sector, quadrant),
        });
        tails.push(Tail {
            sector: line.sector.clone(),
            points: line.trail(tail_length),
        });
    }

    rows.sort_by(compare_rows);

    RotationSnapshot {
        as_of: rotation.last_date(),
        rows,
        tails,
        counts,
        unclassified,
    }
}

/// Quadrant priority ascending, then RS-Ratio descending.
fn compare_rows(a: &RankingRow, b: &RankingRow) -> Ordering {
    a.quadrant
        .priority()
        .cmp(&b.quadrant.priority())
        .then_with(|| b.rs_ratio.total_cmp(&a.rs_ratio))
}
