//! Major/minor street assignment and threshold tier selection.

use serde::Serialize;

use crate::series::{HourlyCount, TrafficSeries};
use crate::site::SiteConditions;
use crate::tables::{CurveTier, ThresholdTier};

/// Speed above which Warrants 1-3 and 7 use reduced thresholds.
pub const VEHICLE_SPEED_CUTOFF_MPH: f64 = 40.0;
/// Speed above which Warrant 4 uses reduced thresholds.
pub const PEDESTRIAN_SPEED_CUTOFF_MPH: f64 = 35.0;
/// Communities below this population use reduced thresholds.
pub const POPULATION_CUTOFF: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Street {
    #[serde(rename = "Street 1")]
    Street1,
    #[serde(rename = "Street 2")]
    Street2,
}

impl Street {
    pub fn volume(self, row: &HourlyCount) -> u32 {
        match self {
            Street::Street1 => row.street1_vph,
            Street::Street2 => row.street2_vph,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Street1 => "Street 1",
            Street::Street2 => "Street 2",
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which street plays the major role for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreetRoles {
    pub major: Street,
    pub minor: Street,
}

impl StreetRoles {
    pub fn major_of(&self, row: &HourlyCount) -> u32 {
        self.major.volume(row)
    }

    pub fn minor_of(&self, row: &HourlyCount) -> u32 {
        self.minor.volume(row)
    }
}

/// The street with the higher total volume is major; ties go to street 1.
pub fn resolve(series: &TrafficSeries) -> StreetRoles {
    if series.street1_total() >= series.street2_total() {
        StreetRoles {
            major: Street::Street1,
            minor: Street::Street2,
        }
    } else {
        StreetRoles {
            major: Street::Street2,
            minor: Street::Street1,
        }
    }
}

fn has_reduction(site: &SiteConditions, speed_cutoff_mph: f64) -> bool {
    site.speed_mph > speed_cutoff_mph || site.population < POPULATION_CUTOFF
}

/// Table 4C-1 tier for Warrants 1-3 and 7.
///
/// `combination` selects the 80/56 columns used for the Warrant 1 A+B test.
pub fn tier(site: &SiteConditions, combination: bool) -> ThresholdTier {
    ThresholdTier::select(has_reduction(site, VEHICLE_SPEED_CUTOFF_MPH), combination)
}

/// Curve tier for Warrants 2, 3 and the volume test of Warrant 7.
pub fn curve_tier(site: &SiteConditions) -> CurveTier {
    CurveTier::select(has_reduction(site, VEHICLE_SPEED_CUTOFF_MPH))
}

/// Curve tier for Warrant 4, which uses a lower speed cutoff.
pub fn pedestrian_tier(site: &SiteConditions) -> CurveTier {
    CurveTier::select(has_reduction(site, PEDESTRIAN_SPEED_CUTOFF_MPH))
}
