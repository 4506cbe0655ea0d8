//! Piecewise-linear volume curves and threshold interpolation.
//!
//! A [`Curve`] is the pass/fail frontier digitized from one of the MUTCD
//! volume figures. Curves are validated on construction so interpolation
//! never has to handle malformed points.

use serde::Serialize;

use crate::tables::TableError;

/// One vertex of a volume curve: a major-street volume and the minimum
/// minor-street volume required at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub major_vph: f64,
    pub minor_threshold_vph: f64,
}

impl From<(f64, f64)> for CurvePoint {
    fn from((major_vph, minor_threshold_vph): (f64, f64)) -> Self {
        CurvePoint {
            major_vph,
            minor_threshold_vph,
        }
    }
}

/// Validated curve, strictly increasing in `major_vph`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<CurvePoint>,
}

impl Curve {
    /// Builds a curve from points in any order.
    ///
    /// # Errors
    ///
    /// Rejects empty point sets, negative or non-finite values, and two
    /// points sharing the same major volume.
    pub fn new(points: impl IntoIterator<Item = CurvePoint>) -> Result<Self, TableError> {
        let mut points: Vec<CurvePoint> = points.into_iter().collect();
        if points.is_empty() {
            return Err(TableError::EmptyCurve);
        }

        for p in &points {
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(p.major_vph) || !valid(p.minor_threshold_vph) {
                return Err(TableError::InvalidPoint {
                    major_vph: p.major_vph,
                    minor_threshold_vph: p.minor_threshold_vph,
                });
            }
        }

        points.sort_by(|a, b| a.major_vph.total_cmp(&b.major_vph));

        for pair in points.windows(2) {
            if pair[1].major_vph <= pair[0].major_vph {
                return Err(TableError::DuplicateBreakpoint {
                    major_vph: pair[0].major_vph,
                });
            }
        }

        Ok(Curve { points })
    }

    /// Builds a curve from `(major, minor)` tuples as they appear in the
    /// reference tables.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, TableError> {
        Self::new(pairs.iter().copied().map(CurvePoint::from))
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Lowest analyzable major-street volume.
    pub fn min_major(&self) -> f64 {
        self.points[0].major_vph
    }

    /// Minor-street threshold at `major_vol`.
    ///
    /// Returns `None` when `major_vol` is below the first breakpoint. At or
    /// past the last breakpoint the curve is flat.
    pub fn threshold_for(&self, major_vol: f64) -> Option<f64> {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        if major_vol < first.major_vph {
            return None;
        }
        if major_vol >= last.major_vph {
            return Some(last.minor_threshold_vph);
        }

        for pair in self.points.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo.major_vph <= major_vol && major_vol < hi.major_vph {
                let width = hi.major_vph - lo.major_vph;
                if width <= 0.0 || major_vol == lo.major_vph {
                    return Some(lo.minor_threshold_vph);
                }
                let slope = (hi.minor_threshold_vph - lo.minor_threshold_vph) / width;
                return Some(lo.minor_threshold_vph + slope * (major_vol - lo.major_vph));
            }
        }

        // NaN input falls through every comparison.
        None
    }
}
