//! Price data access port trait.

use crate::domain::error::RotagraphError;
use crate::domain::price_series::PriceSeries;
use crate::domain::settings::Period;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily closes for `symbol` covering `period` up to its latest observation.
    ///
    /// An empty series means the provider has nothing for the symbol; callers
    /// treat that the same as unavailability.
    fn fetch_closes(&self, symbol: &str, period: Period) -> Result<PriceSeries, RotagraphError>;

    fn list_symbols(&self) -> Result<Vec<String>, RotagraphError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotagraphError>;
}
