//! Warrant 6: Coordinated Signal System.
//!
//! An engineering-judgment warrant; verdicts are always tagged advisory.

use crate::site::CoordinationInputs;
use crate::warrants::types::{
    CoordinationEvidence, Determination, Evidence, WarrantId, WarrantVerdict,
};

/// Spacing band that supports good progression, in feet.
pub const MIN_SPACING_FT: f64 = 1000.0;
pub const MAX_SPACING_FT: f64 = 2640.0;

pub fn evaluate(inputs: &CoordinationInputs) -> WarrantVerdict {
    let spacing = inputs.signal_spacing_ft;
    let evidence = Evidence::Coordination(CoordinationEvidence {
        signal_spacing_ft: spacing,
        progression_speed_mph: inputs.progression_speed_mph,
        min_spacing_ft: MIN_SPACING_FT,
        max_spacing_ft: MAX_SPACING_FT,
    });

    if !inputs.coordinated_system {
        return WarrantVerdict::new(
            WarrantId::CoordinatedSystem,
            Determination::NotApplicable,
            "Not part of coordinated system",
            evidence,
        )
        .advisory();
    }

    let in_band = (MIN_SPACING_FT..=MAX_SPACING_FT).contains(&spacing);
    let explanation = if in_band {
        format!("MET: {spacing} ft spacing within {MIN_SPACING_FT}-{MAX_SPACING_FT} ft range")
    } else {
        format!("NOT MET: {spacing} ft spacing outside {MIN_SPACING_FT}-{MAX_SPACING_FT} ft range")
    };

    WarrantVerdict::new(
        WarrantId::CoordinatedSystem,
        Determination::from_met(in_band),
        explanation,
        evidence,
    )
    .advisory()
}
