//! Hourly traffic counts for the two intersecting streets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One observed hour: both streets' volumes in vehicles per hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    #[serde(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Street 1 (vph)")]
    pub street1_vph: u32,
    #[serde(rename = "Street 2 (vph)")]
    pub street2_vph: u32,
}

impl HourlyCount {
    pub fn new(hour: impl Into<String>, street1_vph: u32, street2_vph: u32) -> Self {
        HourlyCount {
            hour: hour.into(),
            street1_vph,
            street2_vph,
        }
    }
}

/// Ordered hourly counts, one row per observed hour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrafficSeries {
    rows: Vec<HourlyCount>,
}

impl TrafficSeries {
    pub fn new(rows: Vec<HourlyCount>) -> Self {
        TrafficSeries { rows }
    }

    /// Reads counts from CSV with a header row.
    ///
    /// Columns are taken by position (hour, street 1, street 2) so renamed
    /// street headers still load. Negative or fractional volumes are errors.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, result) in rdr.deserialize::<(String, u32, u32)>().enumerate() {
            let context = || format!("invalid count on data row {}", line + 1);
            let (hour, street1_vph, street2_vph) = result.with_context(context)?;
            rows.push(HourlyCount::new(hour, street1_vph, street2_vph));
        }

        Ok(TrafficSeries { rows })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open counts file {}", path.display()))?;
        let series = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = series.len(), "Loaded traffic counts");
        Ok(series)
    }

    pub fn rows(&self) -> &[HourlyCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn street1_total(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.street1_vph)).sum()
    }

    pub fn street2_total(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.street2_vph)).sum()
    }

    /// Rows where either street carried traffic.
    pub fn hours_with_data(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.street1_vph > 0 || r.street2_vph > 0)
            .count()
    }
}

impl From<Vec<HourlyCount>> for TrafficSeries {
    fn from(rows: Vec<HourlyCount>) -> Self {
        TrafficSeries::new(rows)
    }
}
