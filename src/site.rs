//! Site conditions and the auxiliary inputs each warrant needs.
//!
//! Everything here is read once per evaluation and never mutated. Defaults
//! mirror a blank field-study form, so a site file only needs the values
//! that were actually collected:
//!
//! ```json
//! {
//!   "conditions": { "speed_mph": 45, "population": 8000, "major_lanes": 2, "minor_lanes": 1 },
//!   "pedestrian": { "peak_hour_pedestrians": 150, "four_hour_avg_pedestrians": 90 },
//!   "crash": { "correctable_crashes": 6, "alternatives_tried": true }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::tables::LaneKey;

/// Speed, population, and lane configuration of the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConditions {
    /// Posted or 85th-percentile speed on the major street.
    pub speed_mph: f64,
    pub population: u32,
    /// Approach lanes on the major street.
    pub major_lanes: u32,
    /// Approach lanes on the minor street.
    pub minor_lanes: u32,
}

impl SiteConditions {
    pub fn lane_key(&self) -> LaneKey {
        LaneKey::from_lanes(self.major_lanes, self.minor_lanes)
    }
}

impl Default for SiteConditions {
    fn default() -> Self {
        SiteConditions {
            speed_mph: 35.0,
            population: 10_000,
            major_lanes: 2,
            minor_lanes: 1,
        }
    }
}

/// Warrant 4 inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedestrianInputs {
    /// Pedestrians crossing the major street in the single highest hour.
    pub peak_hour_pedestrians: f64,
    /// Mean pedestrians per hour over the four highest hours.
    pub four_hour_avg_pedestrians: f64,
    pub adequate_gaps_per_hour: u32,
    pub distance_to_signal_ft: f64,
}

impl Default for PedestrianInputs {
    fn default() -> Self {
        PedestrianInputs {
            peak_hour_pedestrians: 0.0,
            four_hour_avg_pedestrians: 0.0,
            adequate_gaps_per_hour: 60,
            distance_to_signal_ft: 1000.0,
        }
    }
}

/// Warrant 5 inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolCrossingInputs {
    pub designated: bool,
    pub children_peak_hour: u32,
    pub adequate_gaps: u32,
    pub crossing_period_minutes: u32,
}

impl Default for SchoolCrossingInputs {
    fn default() -> Self {
        SchoolCrossingInputs {
            designated: false,
            children_peak_hour: 0,
            adequate_gaps: 0,
            crossing_period_minutes: 30,
        }
    }
}

/// Warrant 6 inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinationInputs {
    pub coordinated_system: bool,
    pub signal_spacing_ft: f64,
    pub progression_speed_mph: f64,
}

impl Default for CoordinationInputs {
    fn default() -> Self {
        CoordinationInputs {
            coordinated_system: false,
            signal_spacing_ft: 2000.0,
            progression_speed_mph: 35.0,
        }
    }
}

/// Warrant 7 inputs. Crash counts cover a 12-month window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashInputs {
    pub correctable_crashes: u32,
    pub alternatives_tried: bool,
}

/// Warrant 8 inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkInputs {
    pub network_continuity: bool,
    pub route_designation: bool,
    pub future_volumes: bool,
}

/// Warrant 9 inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeCrossingInputs {
    pub railroad_crossing: bool,
    pub trains_per_day: u32,
    pub queuing_distance_ft: f64,
    pub preemption_needed: bool,
}

impl Default for GradeCrossingInputs {
    fn default() -> Self {
        GradeCrossingInputs {
            railroad_crossing: false,
            trains_per_day: 0,
            queuing_distance_ft: 200.0,
            preemption_needed: false,
        }
    }
}

/// Descriptive project fields carried into reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub project_name: String,
    pub location: String,
    pub street_1: String,
    pub street_2: String,
}

/// Everything except the hourly counts, as stored in a site file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInputs {
    pub project: ProjectInfo,
    pub conditions: SiteConditions,
    pub pedestrian: PedestrianInputs,
    pub school: SchoolCrossingInputs,
    pub coordination: CoordinationInputs,
    pub crash: CrashInputs,
    pub network: NetworkInputs,
    pub grade_crossing: GradeCrossingInputs,
}

impl SiteInputs {
    /// Loads site inputs from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
