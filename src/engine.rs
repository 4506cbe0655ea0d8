//! Runs every warrant against one set of site inputs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::series::TrafficSeries;
use crate::site::SiteInputs;
use crate::tables::WarrantTables;
use crate::warrants::types::WarrantVerdict;
use crate::warrants::{
    coordinated, crash, eight_hour, four_hour, grade_crossing, network, peak_hour, pedestrian,
    school,
};

/// All nine verdicts for one site, in warrant order.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub generated_at: DateTime<Utc>,
    pub verdicts: Vec<WarrantVerdict>,
}

impl Evaluation {
    pub fn met_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_met()).count()
    }
}

/// Evaluates Warrants 1 through 9.
///
/// Street roles are resolved from `series` on every call.
#[tracing::instrument(skip_all, fields(rows = series.len()))]
pub fn evaluate_all(
    tables: &WarrantTables,
    series: &TrafficSeries,
    inputs: &SiteInputs,
) -> Evaluation {
    let site = &inputs.conditions;

    let verdicts = vec![
        eight_hour::evaluate(tables, series, site),
        four_hour::evaluate(tables, series, site),
        peak_hour::evaluate(tables, series, site),
        pedestrian::evaluate(tables, series, site, &inputs.pedestrian),
        school::evaluate(&inputs.school),
        coordinated::evaluate(&inputs.coordination),
        crash::evaluate(tables, series, site, &inputs.crash),
        network::evaluate(&inputs.network),
        grade_crossing::evaluate(&inputs.grade_crossing),
    ];

    for v in &verdicts {
        debug!(
            warrant = v.warrant.number(),
            determination = ?v.determination,
            explanation = %v.explanation,
            "Warrant evaluated"
        );
    }

    Evaluation {
        generated_at: Utc::now(),
        verdicts,
    }
}
