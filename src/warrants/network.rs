//! Warrant 8: Roadway Network. Advisory.

use crate::site::NetworkInputs;
use crate::warrants::types::{Determination, Evidence, NetworkEvidence, WarrantId, WarrantVerdict};

pub fn evaluate(inputs: &NetworkInputs) -> WarrantVerdict {
    let evidence = Evidence::Network(NetworkEvidence {
        route_designation: inputs.route_designation,
        future_volumes: inputs.future_volumes,
    });

    let (determination, explanation) = if !inputs.network_continuity {
        (
            Determination::NotApplicable,
            "Network continuity not applicable",
        )
    } else if inputs.route_designation && inputs.future_volumes {
        (
            Determination::Met,
            "MET: Route designation confirmed, projected volumes support installation",
        )
    } else if inputs.route_designation {
        (
            Determination::NotMet,
            "NOT MET: Route designated but projected volumes insufficient",
        )
    } else {
        (
            Determination::NotMet,
            "NOT MET: Not on designated route network",
        )
    };

    WarrantVerdict::new(
        WarrantId::RoadwayNetwork,
        determination,
        explanation,
        evidence,
    )
    .advisory()
}
