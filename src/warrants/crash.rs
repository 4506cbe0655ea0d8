//! Warrant 7: Crash Experience.
//!
//! All three conditions must hold and are checked in order:
//!
//! - A: an adequate trial of alternatives has failed to reduce crashes
//! - B: five or more signal-correctable crashes within 12 months
//! - C: for each of any 8 hours, volumes meet 80% of a Warrant 1 pair or
//!   fall above the Warrant 3 curve
//!
//! The Warrant 3 curve is taken at the general speed/population tier
//! (100% or 70%), not at an 80% column. That reading of the MUTCD is not
//! confirmed against the manual.

use crate::roles::{curve_tier, resolve};
use crate::series::TrafficSeries;
use crate::site::{CrashInputs, SiteConditions};
use crate::tables::{ThresholdTier, VolumeCondition, WarrantTables};
use crate::warrants::types::{
    CrashEvidence, CrashVolumeCheck, CrashVolumeRow, Determination, Evidence, WarrantId,
    WarrantVerdict,
};

pub const MIN_CORRECTABLE_CRASHES: u32 = 5;
pub const REQUIRED_HOURS: usize = 8;

fn not_met(evidence: CrashEvidence, explanation: String) -> WarrantVerdict {
    WarrantVerdict::new(
        WarrantId::CrashExperience,
        Determination::NotMet,
        explanation,
        Evidence::Crash(evidence),
    )
}

pub fn evaluate(
    tables: &WarrantTables,
    series: &TrafficSeries,
    site: &SiteConditions,
    inputs: &CrashInputs,
) -> WarrantVerdict {
    let crashes = inputs.correctable_crashes;
    let mut evidence = CrashEvidence {
        correctable_crashes: crashes,
        condition_a: false,
        condition_b: false,
        condition_c: false,
        hours_meeting_volume: 0,
        volume: None,
    };

    if !inputs.alternatives_tried {
        return not_met(
            evidence,
            "NOT MET: Adequate trial of alternatives not documented".to_string(),
        );
    }
    evidence.condition_a = true;

    if crashes < MIN_CORRECTABLE_CRASHES {
        return not_met(
            evidence,
            format!(
                "NOT MET: {crashes} correctable crashes < {MIN_CORRECTABLE_CRASHES} required (12-month period)"
            ),
        );
    }
    evidence.condition_b = true;

    if series.len() < REQUIRED_HOURS {
        return not_met(
            evidence,
            format!(
                "NOT MET: Insufficient traffic data for volume analysis ({}/{REQUIRED_HOURS} hours)",
                series.len()
            ),
        );
    }

    let lane_key = site.lane_key();
    let condition_a = tables.volume_pair(VolumeCondition::A, lane_key, ThresholdTier::Combination);
    let condition_b = tables.volume_pair(VolumeCondition::B, lane_key, ThresholdTier::Combination);
    let tier = curve_tier(site);
    let curve = tables.peak_hour_curve(lane_key, tier);
    let roles = resolve(series);

    let hourly: Vec<CrashVolumeRow> = series
        .rows()
        .iter()
        .map(|row| {
            let major_vol = roles.major_of(row);
            let minor_vol = roles.minor_of(row);
            let meets_condition_a = condition_a.is_met(major_vol, minor_vol);
            let meets_condition_b = condition_b.is_met(major_vol, minor_vol);
            let curve_threshold = curve.threshold_for(f64::from(major_vol));
            let meets_curve = curve_threshold.is_some_and(|t| f64::from(minor_vol) >= t);
            CrashVolumeRow {
                hour: row.hour.clone(),
                major_vol,
                minor_vol,
                meets_condition_a,
                meets_condition_b,
                curve_threshold,
                meets_curve,
                meets_volume: meets_condition_a || meets_condition_b || meets_curve,
            }
        })
        .collect();

    let hours = hourly.iter().filter(|r| r.meets_volume).count();
    evidence.hours_meeting_volume = hours;
    evidence.condition_c = hours >= REQUIRED_HOURS;
    evidence.volume = Some(CrashVolumeCheck {
        roles,
        lane_key,
        condition_a,
        condition_b,
        curve_tier: tier,
        curve: curve.clone(),
        hourly,
    });

    if !evidence.condition_c {
        return not_met(
            evidence,
            format!(
                "NOT MET: Volume requirement - only {hours}/{REQUIRED_HOURS} hours meet threshold"
            ),
        );
    }

    WarrantVerdict::new(
        WarrantId::CrashExperience,
        Determination::Met,
        format!("MET: {crashes} crashes, alternatives tried, {hours}/{REQUIRED_HOURS} hrs volume"),
        Evidence::Crash(evidence),
    )
}
