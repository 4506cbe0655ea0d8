//! Flattens verdicts into the summary table used by reports.
//!
//! Every cell is derived from the verdict evidence; nothing is recomputed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::Evaluation;
use crate::roles::{Street, resolve};
use crate::series::TrafficSeries;
use crate::warrants::coordinated::{MAX_SPACING_FT, MIN_SPACING_FT};
use crate::warrants::crash::MIN_CORRECTABLE_CRASHES;
use crate::warrants::grade_crossing::MAX_QUEUING_DISTANCE_FT;
use crate::warrants::types::{Evidence, WarrantVerdict};
use crate::warrants::{crash, eight_hour, four_hour};

const EMPTY_CELL: &str = "—";

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Warrant")]
    pub warrant: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Threshold")]
    pub threshold: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// Summary of one evaluation, ready for a table or report.
#[derive(Debug, Clone, Serialize)]
pub struct WarrantSummary {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SummaryRow>,
    pub met_count: usize,
    pub headline: String,
}

/// Totals of the raw hourly counts, shown next to the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountSummary {
    pub hours: usize,
    pub hours_with_data: usize,
    pub street1_total: u64,
    pub street2_total: u64,
    pub major: Street,
}

impl CountSummary {
    pub fn from_series(series: &TrafficSeries) -> Self {
        CountSummary {
            hours: series.len(),
            hours_with_data: series.hours_with_data(),
            street1_total: series.street1_total(),
            street2_total: series.street2_total(),
            major: resolve(series).major,
        }
    }
}

/// Data and threshold cells for one verdict.
fn cells(verdict: &WarrantVerdict) -> (String, String) {
    match &verdict.evidence {
        Evidence::InsufficientData { .. } => (EMPTY_CELL.to_string(), EMPTY_CELL.to_string()),
        Evidence::EightHour(e) => (
            format!("{}/{} hours", e.hours_met, eight_hour::REQUIRED_HOURS),
            format!("{} vph ({}%)", e.condition_a, e.tier),
        ),
        Evidence::FourHour(e) => (
            format!("{}/{} hours", e.hours_met, four_hour::REQUIRED_HOURS),
            format!("Curve ({}%)", e.tier),
        ),
        Evidence::PeakHour(e) => (
            format!("Peak: {}", e.peak_hour),
            format!("Curve ({}%)", e.tier),
        ),
        Evidence::Pedestrian(e) => (
            format!(
                "{} peak / {} 4-hr",
                e.peak_hour_pedestrians, e.four_hour_avg_pedestrians
            ),
            match &e.volume {
                Some(check) => format!("Curve ({}%)", check.tier),
                None => "Curve".to_string(),
            },
        ),
        Evidence::SchoolCrossing(e) => (
            format!("{} children", e.children),
            "Gaps < Period".to_string(),
        ),
        Evidence::Coordination(e) => (
            format!("{} ft spacing", e.signal_spacing_ft),
            format!("{MIN_SPACING_FT}-{MAX_SPACING_FT} ft"),
        ),
        Evidence::Crash(e) => (
            format!(
                "{} crashes, {}/{} hrs",
                e.correctable_crashes,
                e.hours_meeting_volume,
                crash::REQUIRED_HOURS
            ),
            format!("≥{MIN_CORRECTABLE_CRASHES} crashes + 80% vol"),
        ),
        Evidence::Network(_) => (
            "Route + future vol".to_string(),
            "Eng. judgment".to_string(),
        ),
        Evidence::GradeCrossing(e) => (
            format!(
                "{} ft, {} trains/day",
                e.queuing_distance_ft, e.trains_per_day
            ),
            format!("≤{MAX_QUEUING_DISTANCE_FT} ft to RR"),
        ),
    }
}

pub fn summary_row(verdict: &WarrantVerdict) -> SummaryRow {
    let (data, threshold) = cells(verdict);
    SummaryRow {
        warrant: verdict.warrant.to_string(),
        status: verdict.determination.status_label().to_string(),
        data,
        threshold,
        notes: verdict.explanation.clone(),
    }
}

pub fn headline(met_count: usize) -> String {
    if met_count > 0 {
        format!("{met_count} warrant(s) satisfied — Signal installation may be justified")
    } else {
        "No warrants currently satisfied — Additional data or conditions may be needed".to_string()
    }
}

pub fn summarize(evaluation: &Evaluation) -> WarrantSummary {
    let met_count = evaluation.met_count();
    WarrantSummary {
        generated_at: evaluation.generated_at,
        rows: evaluation.verdicts.iter().map(summary_row).collect(),
        met_count,
        headline: headline(met_count),
    }
}
