//! Warrant 9: Intersection Near a Grade Crossing.

use crate::site::GradeCrossingInputs;
use crate::warrants::types::{
    Determination, Evidence, GradeCrossingEvidence, WarrantId, WarrantVerdict,
};

/// Farthest the grade crossing may be from the stop line, in feet.
pub const MAX_QUEUING_DISTANCE_FT: f64 = 140.0;

/// The distance gate is checked before train activity.
pub fn evaluate(inputs: &GradeCrossingInputs) -> WarrantVerdict {
    let trains = inputs.trains_per_day;
    let distance = inputs.queuing_distance_ft;

    let evidence = Evidence::GradeCrossing(GradeCrossingEvidence {
        trains_per_day: trains,
        queuing_distance_ft: distance,
        preemption_needed: inputs.preemption_needed,
        max_queuing_distance_ft: MAX_QUEUING_DISTANCE_FT,
    });

    let (determination, explanation) = if !inputs.railroad_crossing {
        (
            Determination::NotApplicable,
            "No railroad grade crossing nearby".to_string(),
        )
    } else if distance > MAX_QUEUING_DISTANCE_FT {
        (
            Determination::NotMet,
            format!(
                "NOT MET: Distance ({distance} ft) exceeds {MAX_QUEUING_DISTANCE_FT} ft maximum"
            ),
        )
    } else if trains > 0 && inputs.preemption_needed {
        (
            Determination::Met,
            format!("MET: {trains} trains/day, {distance} ft from crossing, preemption required"),
        )
    } else {
        (
            Determination::NotMet,
            "NOT MET: Insufficient train activity or preemption not needed".to_string(),
        )
    };

    WarrantVerdict::new(
        WarrantId::GradeCrossing,
        determination,
        explanation,
        evidence,
    )
}
