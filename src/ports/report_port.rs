//! Report generation port trait.

use crate::domain::error::RotagraphError;
use crate::domain::ranking::RotationSnapshot;
use crate::domain::settings::RotationSettings;
use crate::domain::universe::{Instrument, SkippedSector};

/// Everything a report needs about one rotation run.
pub struct ReportContext<'a> {
    pub settings: &'a RotationSettings,
    pub benchmark: &'a Instrument,
    pub snapshot: &'a RotationSnapshot,
    pub skipped: &'a [SkippedSector],
}

/// Port for writing rotation reports.
pub trait ReportPort {
    fn write(&self, ctx: &ReportContext, output_path: &str) -> Result<(), RotagraphError>;
}
