//! MUTCD 2009 reference data for the volume-based warrants.
//!
//! Volume pairs come from Table 4C-1; curve points are digitized from
//! Figures 4C-1 through 4C-8. The raw data is kept in the same shape as the
//! published tables and validated into a [`WarrantTables`] once at startup.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::curve::Curve;

/// Errors in the authored reference tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("curve has no points")]
    EmptyCurve,

    #[error("curve point ({major_vph}, {minor_threshold_vph}) is negative or not finite")]
    InvalidPoint {
        major_vph: f64,
        minor_threshold_vph: f64,
    },

    #[error("curve has more than one point at major volume {major_vph}")]
    DuplicateBreakpoint { major_vph: f64 },

    #[error("{table} has no entry for lane key {lane_key}")]
    MissingEntry {
        table: &'static str,
        lane_key: LaneKey,
    },

    #[error("{table} has more than one entry for lane key {lane_key}")]
    DuplicateEntry {
        table: &'static str,
        lane_key: LaneKey,
    },
}

/// Lane class of one approach: a single lane, or two or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneClass {
    One,
    TwoOrMore,
}

impl LaneClass {
    /// Exactly one lane is `One`; any other count, zero included, is
    /// `TwoOrMore`.
    pub fn from_lanes(lanes: u32) -> Self {
        if lanes == 1 {
            LaneClass::One
        } else {
            LaneClass::TwoOrMore
        }
    }

    fn index(self) -> usize {
        match self {
            LaneClass::One => 0,
            LaneClass::TwoOrMore => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LaneClass::One => "1",
            LaneClass::TwoOrMore => "2+",
        }
    }
}

/// (major, minor) lane classes used to index every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneKey {
    pub major: LaneClass,
    pub minor: LaneClass,
}

impl LaneKey {
    pub const ALL: [LaneKey; 4] = [
        LaneKey::new(LaneClass::One, LaneClass::One),
        LaneKey::new(LaneClass::TwoOrMore, LaneClass::One),
        LaneKey::new(LaneClass::TwoOrMore, LaneClass::TwoOrMore),
        LaneKey::new(LaneClass::One, LaneClass::TwoOrMore),
    ];

    pub const fn new(major: LaneClass, minor: LaneClass) -> Self {
        LaneKey { major, minor }
    }

    /// Collapses raw lane counts into the four table columns.
    pub fn from_lanes(major_lanes: u32, minor_lanes: u32) -> Self {
        LaneKey::new(
            LaneClass::from_lanes(major_lanes),
            LaneClass::from_lanes(minor_lanes),
        )
    }

    fn index(self) -> usize {
        self.major.index() * 2 + self.minor.index()
    }
}

impl std::fmt::Display for LaneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.major.label(), self.minor.label())
    }
}

impl Serialize for LaneKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Percentage of the Table 4C-1 base values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThresholdTier {
    #[serde(rename = "100")]
    Full,
    #[serde(rename = "80")]
    Combination,
    #[serde(rename = "70")]
    Reduced,
    #[serde(rename = "56")]
    ReducedCombination,
}

impl ThresholdTier {
    pub const ALL: [ThresholdTier; 4] = [
        ThresholdTier::Full,
        ThresholdTier::Combination,
        ThresholdTier::Reduced,
        ThresholdTier::ReducedCombination,
    ];

    /// Picks the tier given whether the speed/population reduction applies.
    pub fn select(reduced: bool, combination: bool) -> Self {
        match (reduced, combination) {
            (false, false) => ThresholdTier::Full,
            (false, true) => ThresholdTier::Combination,
            (true, false) => ThresholdTier::Reduced,
            (true, true) => ThresholdTier::ReducedCombination,
        }
    }

    pub fn percent(self) -> &'static str {
        match self {
            ThresholdTier::Full => "100",
            ThresholdTier::Combination => "80",
            ThresholdTier::Reduced => "70",
            ThresholdTier::ReducedCombination => "56",
        }
    }

    fn index(self) -> usize {
        match self {
            ThresholdTier::Full => 0,
            ThresholdTier::Combination => 1,
            ThresholdTier::Reduced => 2,
            ThresholdTier::ReducedCombination => 3,
        }
    }
}

impl std::fmt::Display for ThresholdTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.percent())
    }
}

/// The two tiers the published curves exist for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CurveTier {
    #[serde(rename = "100")]
    Full,
    #[serde(rename = "70")]
    Reduced,
}

impl CurveTier {
    pub const ALL: [CurveTier; 2] = [CurveTier::Full, CurveTier::Reduced];

    pub fn select(reduced: bool) -> Self {
        if reduced {
            CurveTier::Reduced
        } else {
            CurveTier::Full
        }
    }

    pub fn percent(self) -> &'static str {
        ThresholdTier::from(self).percent()
    }

    fn index(self) -> usize {
        match self {
            CurveTier::Full => 0,
            CurveTier::Reduced => 1,
        }
    }
}

impl From<CurveTier> for ThresholdTier {
    fn from(tier: CurveTier) -> Self {
        match tier {
            CurveTier::Full => ThresholdTier::Full,
            CurveTier::Reduced => ThresholdTier::Reduced,
        }
    }
}

impl std::fmt::Display for CurveTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.percent())
    }
}

/// Major and minor volumes that must both be met in the same hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumeThresholdPair {
    pub major_vph: u32,
    pub minor_vph: u32,
}

impl VolumeThresholdPair {
    pub const fn new(major_vph: u32, minor_vph: u32) -> Self {
        VolumeThresholdPair {
            major_vph,
            minor_vph,
        }
    }

    pub fn is_met(&self, major_vol: u32, minor_vol: u32) -> bool {
        major_vol >= self.major_vph && minor_vol >= self.minor_vph
    }
}

impl std::fmt::Display for VolumeThresholdPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.major_vph, self.minor_vph)
    }
}

/// Warrant 1 condition selecting the Table 4C-1 column group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeCondition {
    /// Minimum vehicular volume.
    A,
    /// Interruption of continuous traffic.
    B,
}

/// Pedestrian volume figure used by Warrant 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PedestrianFigure {
    FourHour,
    PeakHour,
}

const fn pair(major_vph: u32, minor_vph: u32) -> VolumeThresholdPair {
    VolumeThresholdPair::new(major_vph, minor_vph)
}

const L1: LaneClass = LaneClass::One;
const L2: LaneClass = LaneClass::TwoOrMore;

/// Table 4C-1 rows; columns follow [`ThresholdTier::ALL`] (100, 80, 70, 56).
type PairRow = (LaneKey, [VolumeThresholdPair; 4]);

#[rustfmt::skip]
static CONDITION_A: &[PairRow] = &[
    (LaneKey::new(L1, L1), [pair(500, 150), pair(400, 120), pair(350, 105), pair(280, 84)]),
    (LaneKey::new(L2, L1), [pair(600, 150), pair(480, 120), pair(420, 105), pair(336, 84)]),
    (LaneKey::new(L2, L2), [pair(600, 200), pair(480, 160), pair(420, 140), pair(336, 112)]),
    (LaneKey::new(L1, L2), [pair(500, 200), pair(400, 160), pair(350, 140), pair(280, 112)]),
];

#[rustfmt::skip]
static CONDITION_B: &[PairRow] = &[
    (LaneKey::new(L1, L1), [pair(750, 75), pair(600, 60), pair(525, 53), pair(420, 42)]),
    (LaneKey::new(L2, L1), [pair(900, 75), pair(720, 60), pair(630, 53), pair(504, 42)]),
    (LaneKey::new(L2, L2), [pair(900, 100), pair(720, 80), pair(630, 70), pair(504, 56)]),
    (LaneKey::new(L1, L2), [pair(750, 100), pair(600, 80), pair(525, 70), pair(420, 56)]),
];

/// Curve rows; the two point sets are the 100% and 70% figures.
type CurveRow = (LaneKey, [&'static [(f64, f64)]; 2]);

// Figures 4C-1 / 4C-2
#[rustfmt::skip]
static FOUR_HOUR_CURVES: &[CurveRow] = &[
    (
        LaneKey::new(L1, L1),
        [
            &[(300.0, 115.0), (400.0, 100.0), (500.0, 90.0), (600.0, 80.0), (700.0, 70.0), (800.0, 60.0), (900.0, 50.0), (1000.0, 40.0)],
            &[(210.0, 80.0), (280.0, 70.0), (350.0, 63.0), (420.0, 56.0), (490.0, 49.0), (560.0, 42.0), (630.0, 35.0), (700.0, 28.0)],
        ],
    ),
    (
        LaneKey::new(L2, L1),
        [
            &[(400.0, 115.0), (500.0, 100.0), (600.0, 90.0), (700.0, 80.0), (800.0, 70.0), (900.0, 60.0), (1000.0, 50.0), (1100.0, 40.0)],
            &[(280.0, 80.0), (350.0, 70.0), (420.0, 63.0), (490.0, 56.0), (560.0, 49.0), (630.0, 42.0), (700.0, 35.0), (770.0, 28.0)],
        ],
    ),
    (
        LaneKey::new(L2, L2),
        [
            &[(400.0, 150.0), (500.0, 135.0), (600.0, 120.0), (700.0, 105.0), (800.0, 95.0), (900.0, 85.0), (1000.0, 75.0), (1100.0, 65.0)],
            &[(280.0, 105.0), (350.0, 95.0), (420.0, 84.0), (490.0, 74.0), (560.0, 67.0), (630.0, 60.0), (700.0, 53.0), (770.0, 46.0)],
        ],
    ),
    (
        LaneKey::new(L1, L2),
        [
            &[(300.0, 150.0), (400.0, 135.0), (500.0, 120.0), (600.0, 105.0), (700.0, 95.0), (800.0, 85.0), (900.0, 75.0), (1000.0, 65.0)],
            &[(210.0, 105.0), (280.0, 95.0), (350.0, 84.0), (420.0, 74.0), (490.0, 67.0), (560.0, 60.0), (630.0, 53.0), (700.0, 46.0)],
        ],
    ),
];

// Figures 4C-3 / 4C-4
#[rustfmt::skip]
static PEAK_HOUR_CURVES: &[CurveRow] = &[
    (
        LaneKey::new(L1, L1),
        [
            &[(400.0, 150.0), (500.0, 135.0), (600.0, 120.0), (700.0, 105.0), (800.0, 100.0), (900.0, 100.0), (1000.0, 100.0)],
            &[(280.0, 105.0), (350.0, 95.0), (420.0, 84.0), (490.0, 74.0), (560.0, 70.0), (630.0, 70.0), (700.0, 70.0)],
        ],
    ),
    (
        LaneKey::new(L2, L1),
        [
            &[(500.0, 150.0), (600.0, 135.0), (700.0, 120.0), (800.0, 105.0), (900.0, 100.0), (1000.0, 100.0), (1100.0, 100.0)],
            &[(350.0, 105.0), (420.0, 95.0), (490.0, 84.0), (560.0, 74.0), (630.0, 70.0), (700.0, 70.0), (770.0, 70.0)],
        ],
    ),
    (
        LaneKey::new(L2, L2),
        [
            &[(500.0, 200.0), (600.0, 180.0), (700.0, 160.0), (800.0, 150.0), (900.0, 150.0), (1000.0, 150.0), (1100.0, 150.0)],
            &[(350.0, 140.0), (420.0, 126.0), (490.0, 112.0), (560.0, 105.0), (630.0, 105.0), (700.0, 105.0), (770.0, 105.0)],
        ],
    ),
    (
        LaneKey::new(L1, L2),
        [
            &[(400.0, 200.0), (500.0, 180.0), (600.0, 160.0), (700.0, 150.0), (800.0, 150.0), (900.0, 150.0), (1000.0, 150.0)],
            &[(280.0, 140.0), (350.0, 126.0), (420.0, 112.0), (490.0, 105.0), (560.0, 105.0), (630.0, 105.0), (700.0, 105.0)],
        ],
    ),
];

// Figures 4C-5 .. 4C-8, indexed by [`CurveTier::ALL`].
#[rustfmt::skip]
static PEDESTRIAN_FOUR_HOUR: [&[(f64, f64)]; 2] = [
    &[(300.0, 190.0), (400.0, 150.0), (500.0, 130.0), (600.0, 115.0), (700.0, 107.0), (800.0, 100.0), (900.0, 100.0), (1000.0, 100.0)],
    &[(210.0, 133.0), (280.0, 105.0), (350.0, 91.0), (420.0, 81.0), (490.0, 75.0), (560.0, 70.0), (630.0, 70.0), (700.0, 70.0)],
];

#[rustfmt::skip]
static PEDESTRIAN_PEAK_HOUR: [&[(f64, f64)]; 2] = [
    &[(300.0, 380.0), (400.0, 300.0), (500.0, 260.0), (600.0, 230.0), (700.0, 214.0), (800.0, 200.0), (900.0, 200.0), (1000.0, 200.0)],
    &[(210.0, 266.0), (280.0, 210.0), (350.0, 182.0), (420.0, 161.0), (490.0, 150.0), (560.0, 140.0), (630.0, 140.0), (700.0, 140.0)],
];

/// Finds the single row for `key`, rejecting gaps and duplicates.
fn unique_row<'a, T>(
    table: &'static str,
    rows: &'a [(LaneKey, T)],
    key: LaneKey,
) -> Result<&'a T, TableError> {
    let mut matches = rows.iter().filter(|(k, _)| *k == key);
    let missing = TableError::MissingEntry {
        table,
        lane_key: key,
    };
    let (_, row) = matches.next().ok_or(missing)?;
    if matches.next().is_some() {
        return Err(TableError::DuplicateEntry {
            table,
            lane_key: key,
        });
    }
    Ok(row)
}

fn pair_table(
    table: &'static str,
    rows: &[PairRow],
) -> Result<[[VolumeThresholdPair; 4]; 4], TableError> {
    let mut out = [[pair(0, 0); 4]; 4];
    for key in LaneKey::ALL {
        out[key.index()] = *unique_row(table, rows, key)?;
    }
    Ok(out)
}

fn curve_table(table: &'static str, rows: &[CurveRow]) -> Result<Vec<[Curve; 2]>, TableError> {
    LaneKey::ALL
        .iter()
        .map(|key| -> Result<[Curve; 2], TableError> {
            let [full, reduced] = unique_row(table, rows, *key)?;
            Ok([Curve::from_pairs(full)?, Curve::from_pairs(reduced)?])
        })
        .collect()
}

/// The validated reference tables for one MUTCD edition.
///
/// Built once and shared read-only; every lookup is total over
/// [`LaneKey::ALL`] and the declared tiers.
#[derive(Debug, Clone)]
pub struct WarrantTables {
    condition_a: [[VolumeThresholdPair; 4]; 4],
    condition_b: [[VolumeThresholdPair; 4]; 4],
    // indexed by LaneKey::index(), then CurveTier::index()
    four_hour: Vec<[Curve; 2]>,
    peak_hour: Vec<[Curve; 2]>,
    pedestrian_four_hour: [Curve; 2],
    pedestrian_peak_hour: [Curve; 2],
}

impl WarrantTables {
    /// Tables from the MUTCD 2009 edition.
    ///
    /// # Errors
    ///
    /// Returns an error if any authored table is malformed.
    pub fn mutcd_2009() -> Result<Self, TableError> {
        Ok(WarrantTables {
            condition_a: pair_table("Table 4C-1 condition A", CONDITION_A)?,
            condition_b: pair_table("Table 4C-1 condition B", CONDITION_B)?,
            four_hour: curve_table("Figure 4C-1/4C-2", FOUR_HOUR_CURVES)?,
            peak_hour: curve_table("Figure 4C-3/4C-4", PEAK_HOUR_CURVES)?,
            pedestrian_four_hour: [
                Curve::from_pairs(PEDESTRIAN_FOUR_HOUR[0])?,
                Curve::from_pairs(PEDESTRIAN_FOUR_HOUR[1])?,
            ],
            pedestrian_peak_hour: [
                Curve::from_pairs(PEDESTRIAN_PEAK_HOUR[0])?,
                Curve::from_pairs(PEDESTRIAN_PEAK_HOUR[1])?,
            ],
        })
    }

    pub fn volume_pair(
        &self,
        condition: VolumeCondition,
        lane_key: LaneKey,
        tier: ThresholdTier,
    ) -> VolumeThresholdPair {
        let table = match condition {
            VolumeCondition::A => &self.condition_a,
            VolumeCondition::B => &self.condition_b,
        };
        table[lane_key.index()][tier.index()]
    }

    /// Warrant 2 curve.
    pub fn four_hour_curve(&self, lane_key: LaneKey, tier: CurveTier) -> &Curve {
        &self.four_hour[lane_key.index()][tier.index()]
    }

    /// Warrant 3 curve, also consulted by Warrant 7.
    pub fn peak_hour_curve(&self, lane_key: LaneKey, tier: CurveTier) -> &Curve {
        &self.peak_hour[lane_key.index()][tier.index()]
    }

    pub fn pedestrian_curve(&self, figure: PedestrianFigure, tier: CurveTier) -> &Curve {
        match figure {
            PedestrianFigure::FourHour => &self.pedestrian_four_hour[tier.index()],
            PedestrianFigure::PeakHour => &self.pedestrian_peak_hour[tier.index()],
        }
    }
}
