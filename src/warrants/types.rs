//! Verdict records produced by the warrant evaluators.

use serde::Serialize;

use crate::curve::Curve;
use crate::roles::{Street, StreetRoles};
use crate::tables::{CurveTier, LaneKey, PedestrianFigure, ThresholdTier, VolumeThresholdPair};

/// The nine MUTCD 2009 signal warrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarrantId {
    EightHourVolume,
    FourHourVolume,
    PeakHour,
    PedestrianVolume,
    SchoolCrossing,
    CoordinatedSystem,
    CrashExperience,
    RoadwayNetwork,
    GradeCrossing,
}

impl WarrantId {
    pub const ALL: [WarrantId; 9] = [
        WarrantId::EightHourVolume,
        WarrantId::FourHourVolume,
        WarrantId::PeakHour,
        WarrantId::PedestrianVolume,
        WarrantId::SchoolCrossing,
        WarrantId::CoordinatedSystem,
        WarrantId::CrashExperience,
        WarrantId::RoadwayNetwork,
        WarrantId::GradeCrossing,
    ];

    pub fn number(self) -> u8 {
        match self {
            WarrantId::EightHourVolume => 1,
            WarrantId::FourHourVolume => 2,
            WarrantId::PeakHour => 3,
            WarrantId::PedestrianVolume => 4,
            WarrantId::SchoolCrossing => 5,
            WarrantId::CoordinatedSystem => 6,
            WarrantId::CrashExperience => 7,
            WarrantId::RoadwayNetwork => 8,
            WarrantId::GradeCrossing => 9,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WarrantId::EightHourVolume => "Eight-Hour Volume",
            WarrantId::FourHourVolume => "Four-Hour Volume",
            WarrantId::PeakHour => "Peak Hour",
            WarrantId::PedestrianVolume => "Pedestrian Volume",
            WarrantId::SchoolCrossing => "School Crossing",
            WarrantId::CoordinatedSystem => "Coordinated System",
            WarrantId::CrashExperience => "Crash Experience",
            WarrantId::RoadwayNetwork => "Roadway Network",
            WarrantId::GradeCrossing => "Grade Crossing",
        }
    }
}

impl std::fmt::Display for WarrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Outcome of one warrant.
///
/// `NotApplicable` means the warrant could not be evaluated (missing data or
/// an enabling condition is absent). It is not a negative finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Determination {
    Met,
    NotMet,
    NotApplicable,
}

impl Determination {
    pub fn from_met(met: bool) -> Self {
        if met {
            Determination::Met
        } else {
            Determination::NotMet
        }
    }

    /// Status cell used in the summary table.
    pub fn status_label(self) -> &'static str {
        match self {
            Determination::Met => "✓ MET",
            Determination::NotMet => "✗ NOT MET",
            Determination::NotApplicable => "—",
        }
    }
}

/// A single warrant's verdict with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarrantVerdict {
    pub warrant: WarrantId,
    pub determination: Determination,
    pub explanation: String,
    /// Advisory warrants rest on engineering judgment rather than a formula.
    pub engineering_judgment: bool,
    pub evidence: Evidence,
}

impl WarrantVerdict {
    pub fn new(
        warrant: WarrantId,
        determination: Determination,
        explanation: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        WarrantVerdict {
            warrant,
            determination,
            explanation: explanation.into(),
            engineering_judgment: false,
            evidence,
        }
    }

    /// Too few hourly rows to evaluate.
    pub fn insufficient_data(
        warrant: WarrantId,
        rows_available: usize,
        rows_required: usize,
    ) -> Self {
        let explanation = if rows_required == 1 {
            "Insufficient traffic data".to_string()
        } else {
            format!("Insufficient data (need at least {rows_required} hours)")
        };
        WarrantVerdict::new(
            warrant,
            Determination::NotApplicable,
            explanation,
            Evidence::InsufficientData {
                rows_available,
                rows_required,
            },
        )
    }

    pub fn advisory(mut self) -> Self {
        self.engineering_judgment = true;
        self
    }

    pub fn is_met(&self) -> bool {
        self.determination == Determination::Met
    }
}

/// Warrant-specific numbers behind a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    InsufficientData {
        rows_available: usize,
        rows_required: usize,
    },
    EightHour(EightHourEvidence),
    FourHour(FourHourEvidence),
    PeakHour(PeakHourEvidence),
    Pedestrian(PedestrianEvidence),
    SchoolCrossing(SchoolCrossingEvidence),
    Coordination(CoordinationEvidence),
    Crash(CrashEvidence),
    Network(NetworkEvidence),
    GradeCrossing(GradeCrossingEvidence),
}

/// Which Warrant 1 condition was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EightHourCondition {
    A,
    B,
    #[serde(rename = "A+B")]
    Combination,
}

impl std::fmt::Display for EightHourCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EightHourCondition::A => "A",
            EightHourCondition::B => "B",
            EightHourCondition::Combination => "A+B",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EightHourRow {
    pub hour: String,
    pub major_vol: u32,
    pub minor_vol: u32,
    pub meets_a: bool,
    pub meets_b: bool,
    pub meets_combination_a: bool,
    pub meets_combination_b: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EightHourEvidence {
    pub roles: StreetRoles,
    pub lane_key: LaneKey,
    pub tier: ThresholdTier,
    pub combination_tier: ThresholdTier,
    pub condition_a: VolumeThresholdPair,
    pub condition_b: VolumeThresholdPair,
    pub combination_a: VolumeThresholdPair,
    pub combination_b: VolumeThresholdPair,
    pub hours_a: usize,
    pub hours_b: usize,
    pub hours_combination_a: usize,
    pub hours_combination_b: usize,
    pub condition: Option<EightHourCondition>,
    pub hours_met: usize,
    pub hourly: Vec<EightHourRow>,
}

/// One hour tested against a volume curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveHourRow {
    pub hour: String,
    pub major_vol: u32,
    pub minor_vol: u32,
    /// `None` when the major volume is below the curve's range.
    pub threshold: Option<f64>,
    pub above_curve: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourHourEvidence {
    pub roles: StreetRoles,
    pub lane_key: LaneKey,
    pub tier: CurveTier,
    pub curve: Curve,
    pub hours_met: usize,
    pub hourly: Vec<CurveHourRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakHourEvidence {
    pub roles: StreetRoles,
    pub lane_key: LaneKey,
    pub tier: CurveTier,
    pub curve: Curve,
    pub peak_hour: String,
    pub peak_major: u32,
    pub peak_minor: u32,
    pub threshold: Option<f64>,
}

/// Warrant 4 precondition that stopped evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PedestrianGate {
    TooCloseToSignal,
    AdequateGaps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PedestrianVolumeCheck {
    pub tier: CurveTier,
    pub major: Street,
    /// Mean major-street volume of the four busiest hours.
    pub four_hour_major_vol: f64,
    pub peak_major_vol: u32,
    pub four_hour_threshold: Option<f64>,
    pub peak_hour_threshold: Option<f64>,
    pub four_hour_met: bool,
    pub peak_hour_met: bool,
    pub criterion: Option<PedestrianFigure>,
    pub four_hour_curve: Curve,
    pub peak_hour_curve: Curve,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PedestrianEvidence {
    pub peak_hour_pedestrians: f64,
    pub four_hour_avg_pedestrians: f64,
    pub adequate_gaps_per_hour: u32,
    pub distance_to_signal_ft: f64,
    pub failed_gate: Option<PedestrianGate>,
    pub volume: Option<PedestrianVolumeCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolCrossingEvidence {
    pub children: u32,
    pub adequate_gaps: u32,
    pub crossing_period_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinationEvidence {
    pub signal_spacing_ft: f64,
    pub progression_speed_mph: f64,
    pub min_spacing_ft: f64,
    pub max_spacing_ft: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashVolumeRow {
    pub hour: String,
    pub major_vol: u32,
    pub minor_vol: u32,
    pub meets_condition_a: bool,
    pub meets_condition_b: bool,
    pub curve_threshold: Option<f64>,
    pub meets_curve: bool,
    pub meets_volume: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashVolumeCheck {
    pub roles: StreetRoles,
    pub lane_key: LaneKey,
    pub condition_a: VolumeThresholdPair,
    pub condition_b: VolumeThresholdPair,
    pub curve_tier: CurveTier,
    pub curve: Curve,
    pub hourly: Vec<CrashVolumeRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashEvidence {
    pub correctable_crashes: u32,
    pub condition_a: bool,
    pub condition_b: bool,
    pub condition_c: bool,
    pub hours_meeting_volume: usize,
    pub volume: Option<CrashVolumeCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkEvidence {
    pub route_designation: bool,
    pub future_volumes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeCrossingEvidence {
    pub trains_per_day: u32,
    pub queuing_distance_ft: f64,
    pub preemption_needed: bool,
    pub max_queuing_distance_ft: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warrant_display() {
        assert_eq!(
            WarrantId::EightHourVolume.to_string(),
            "1. Eight-Hour Volume"
        );
        assert_eq!(WarrantId::GradeCrossing.to_string(), "9. Grade Crossing");
        let numbers: Vec<u8> = WarrantId::ALL.iter().map(|w| w.number()).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_insufficient_data_is_not_applicable() {
        let v = WarrantVerdict::insufficient_data(WarrantId::EightHourVolume, 5, 8);
        assert_eq!(v.determination, Determination::NotApplicable);
        assert!(!v.is_met());
        assert_eq!(v.explanation, "Insufficient data (need at least 8 hours)");
    }

    #[test]
    fn test_evidence_serializes_with_kind_tag() {
        let v = WarrantVerdict::new(
            WarrantId::RoadwayNetwork,
            Determination::NotMet,
            "x",
            Evidence::Network(NetworkEvidence {
                route_designation: true,
                future_volumes: false,
            }),
        )
        .advisory();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["evidence"]["kind"], "network");
        assert_eq!(json["determination"], "not_met");
        assert_eq!(json["engineering_judgment"], true);
    }
}
