//! Warrant 5: School Crossing.

use crate::site::SchoolCrossingInputs;
use crate::warrants::types::{
    Determination, Evidence, SchoolCrossingEvidence, WarrantId, WarrantVerdict,
};

pub const MIN_CHILDREN: u32 = 20;

/// Met when enough children cross and there are fewer adequate gaps than
/// minutes in the crossing period.
pub fn evaluate(inputs: &SchoolCrossingInputs) -> WarrantVerdict {
    let children = inputs.children_peak_hour;
    let gaps = inputs.adequate_gaps;
    let period = inputs.crossing_period_minutes;

    let evidence = Evidence::SchoolCrossing(SchoolCrossingEvidence {
        children,
        adequate_gaps: gaps,
        crossing_period_minutes: period,
    });

    let (determination, explanation) = if !inputs.designated {
        (
            Determination::NotApplicable,
            "No school crossing designated".to_string(),
        )
    } else if children < MIN_CHILDREN {
        (
            Determination::NotMet,
            format!("NOT MET: {children} schoolchildren < {MIN_CHILDREN} minimum"),
        )
    } else if gaps < period {
        (
            Determination::Met,
            format!("MET: {children} children, {gaps} gaps < {period} min period"),
        )
    } else {
        (
            Determination::NotMet,
            format!("NOT MET: {gaps} adequate gaps >= {period} min crossing period"),
        )
    };

    WarrantVerdict::new(
        WarrantId::SchoolCrossing,
        determination,
        explanation,
        evidence,
    )
}
