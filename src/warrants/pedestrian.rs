//! Warrant 4: Pedestrian Volume (Figures 4C-5 through 4C-8).

use crate::roles::{pedestrian_tier, resolve};
use crate::series::TrafficSeries;
use crate::site::{PedestrianInputs, SiteConditions};
use crate::tables::{PedestrianFigure, WarrantTables};
use crate::warrants::types::{
    Determination, Evidence, PedestrianEvidence, PedestrianGate, PedestrianVolumeCheck, WarrantId,
    WarrantVerdict,
};

/// A signal closer than this already serves the crossing.
pub const MIN_DISTANCE_TO_SIGNAL_FT: f64 = 300.0;
/// At this many adequate gaps per hour pedestrians can already cross.
pub const MAX_ADEQUATE_GAPS_PER_HOUR: u32 = 60;
/// Hours averaged for the four-hour criterion.
const FOUR_HOUR_WINDOW: usize = 4;

fn fmt_threshold(threshold: Option<f64>) -> String {
    threshold.map_or_else(|| "N/A".to_string(), |t| t.to_string())
}

pub fn evaluate(
    tables: &WarrantTables,
    series: &TrafficSeries,
    site: &SiteConditions,
    inputs: &PedestrianInputs,
) -> WarrantVerdict {
    let mut evidence = PedestrianEvidence {
        peak_hour_pedestrians: inputs.peak_hour_pedestrians,
        four_hour_avg_pedestrians: inputs.four_hour_avg_pedestrians,
        adequate_gaps_per_hour: inputs.adequate_gaps_per_hour,
        distance_to_signal_ft: inputs.distance_to_signal_ft,
        failed_gate: None,
        volume: None,
    };

    if inputs.distance_to_signal_ft < MIN_DISTANCE_TO_SIGNAL_FT {
        evidence.failed_gate = Some(PedestrianGate::TooCloseToSignal);
        return WarrantVerdict::new(
            WarrantId::PedestrianVolume,
            Determination::NotMet,
            format!(
                "NOT MET: Distance to nearest signal ({} ft) < {MIN_DISTANCE_TO_SIGNAL_FT} ft",
                inputs.distance_to_signal_ft
            ),
            Evidence::Pedestrian(evidence),
        );
    }

    if inputs.adequate_gaps_per_hour >= MAX_ADEQUATE_GAPS_PER_HOUR {
        evidence.failed_gate = Some(PedestrianGate::AdequateGaps);
        return WarrantVerdict::new(
            WarrantId::PedestrianVolume,
            Determination::NotMet,
            format!(
                "NOT MET: Adequate gaps ({}/hr) >= {MAX_ADEQUATE_GAPS_PER_HOUR} required maximum",
                inputs.adequate_gaps_per_hour
            ),
            Evidence::Pedestrian(evidence),
        );
    }

    if series.is_empty() {
        return WarrantVerdict::new(
            WarrantId::PedestrianVolume,
            Determination::NotApplicable,
            "Insufficient traffic data",
            Evidence::Pedestrian(evidence),
        );
    }

    let tier = pedestrian_tier(site);
    let four_hour_curve = tables.pedestrian_curve(PedestrianFigure::FourHour, tier);
    let peak_hour_curve = tables.pedestrian_curve(PedestrianFigure::PeakHour, tier);
    let major = resolve(series).major;

    let mut major_vols: Vec<u32> = series.rows().iter().map(|r| major.volume(r)).collect();
    major_vols.sort_unstable_by(|a, b| b.cmp(a));

    let busiest = &major_vols[..major_vols.len().min(FOUR_HOUR_WINDOW)];
    let four_hour_major_vol =
        busiest.iter().map(|v| f64::from(*v)).sum::<f64>() / busiest.len() as f64;
    let peak_major_vol = major_vols[0];

    let four_hour_threshold = four_hour_curve.threshold_for(four_hour_major_vol);
    let peak_hour_threshold = peak_hour_curve.threshold_for(f64::from(peak_major_vol));

    let four_hour_met = four_hour_threshold.is_some_and(|t| inputs.four_hour_avg_pedestrians >= t);
    let peak_hour_met = peak_hour_threshold.is_some_and(|t| inputs.peak_hour_pedestrians >= t);

    let (criterion, explanation) = if four_hour_met {
        (
            Some(PedestrianFigure::FourHour),
            format!(
                "MET (Four-Hour): {} peds/hr vs {} threshold ({tier}%)",
                inputs.four_hour_avg_pedestrians,
                fmt_threshold(four_hour_threshold)
            ),
        )
    } else if peak_hour_met {
        (
            Some(PedestrianFigure::PeakHour),
            format!(
                "MET (Peak Hour): {} peds/hr vs {} threshold ({tier}%)",
                inputs.peak_hour_pedestrians,
                fmt_threshold(peak_hour_threshold)
            ),
        )
    } else {
        (
            None,
            format!(
                "NOT MET: 4-hr ({} vs {}), Peak ({} vs {}) ({tier}%)",
                inputs.four_hour_avg_pedestrians,
                fmt_threshold(four_hour_threshold),
                inputs.peak_hour_pedestrians,
                fmt_threshold(peak_hour_threshold)
            ),
        )
    };

    evidence.volume = Some(PedestrianVolumeCheck {
        tier,
        major,
        four_hour_major_vol,
        peak_major_vol,
        four_hour_threshold,
        peak_hour_threshold,
        four_hour_met,
        peak_hour_met,
        criterion,
        four_hour_curve: four_hour_curve.clone(),
        peak_hour_curve: peak_hour_curve.clone(),
    });

    WarrantVerdict::new(
        WarrantId::PedestrianVolume,
        Determination::from_met(criterion.is_some()),
        explanation,
        Evidence::Pedestrian(evidence),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::HourlyCount;
    use crate::tables::CurveTier;

    fn tables() -> WarrantTables {
        WarrantTables::mutcd_2009().unwrap()
    }

    fn site(speed_mph: f64) -> SiteConditions {
        SiteConditions {
            speed_mph,
            population: 50_000,
            ..Default::default()
        }
    }

    fn inputs(peak: f64, four_hour: f64) -> PedestrianInputs {
        PedestrianInputs {
            peak_hour_pedestrians: peak,
            four_hour_avg_pedestrians: four_hour,
            adequate_gaps_per_hour: 20,
            distance_to_signal_ft: 1000.0,
        }
    }

    fn series(major: &[u32]) -> TrafficSeries {
        TrafficSeries::new(
            major
                .iter()
                .enumerate()
                .map(|(i, v)| HourlyCount::new(format!("{}:00", i + 7), *v, 50))
                .collect(),
        )
    }

    fn check(v: &WarrantVerdict) -> &PedestrianVolumeCheck {
        match &v.evidence {
            Evidence::Pedestrian(PedestrianEvidence {
                volume: Some(check),
                ..
            }) => check,
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_close_signal_gate_fires_first() {
        let mut i = inputs(1000.0, 1000.0);
        i.distance_to_signal_ft = 250.0;
        i.adequate_gaps_per_hour = 90;
        let v = evaluate(&tables(), &TrafficSeries::default(), &site(30.0), &i);

        assert_eq!(v.determination, Determination::NotMet);
        match v.evidence {
            Evidence::Pedestrian(e) => {
                assert_eq!(e.failed_gate, Some(PedestrianGate::TooCloseToSignal))
            }
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_adequate_gaps_gate() {
        let mut i = inputs(1000.0, 1000.0);
        i.adequate_gaps_per_hour = 60;
        let v = evaluate(&tables(), &series(&[900; 4]), &site(30.0), &i);
        assert_eq!(v.determination, Determination::NotMet);
        assert!(v.explanation.contains("Adequate gaps (60/hr)"));
    }

    #[test]
    fn test_missing_traffic_keeps_pedestrian_inputs() {
        let empty = TrafficSeries::default();
        let v = evaluate(&tables(), &empty, &site(30.0), &inputs(500.0, 300.0));
        assert_eq!(v.determination, Determination::NotApplicable);
        assert_eq!(v.explanation, "Insufficient traffic data");

        match &v.evidence {
            Evidence::Pedestrian(e) => {
                assert_eq!(e.peak_hour_pedestrians, 500.0);
                assert_eq!(e.four_hour_avg_pedestrians, 300.0);
                assert_eq!(e.failed_gate, None);
                assert!(e.volume.is_none());
            }
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_four_hour_criterion() {
        // Top four of [800, 600, 700, 500, 300] average 650 -> threshold 111.
        let v = evaluate(
            &tables(),
            &series(&[800, 600, 700, 500, 300]),
            &site(30.0),
            &inputs(0.0, 111.0),
        );
        let c = check(&v);

        assert_eq!(v.determination, Determination::Met);
        assert_eq!(c.four_hour_major_vol, 650.0);
        assert_eq!(c.four_hour_threshold, Some(111.0));
        assert_eq!(c.criterion, Some(PedestrianFigure::FourHour));
        assert_eq!(c.peak_major_vol, 800);
        assert_eq!(c.peak_hour_threshold, Some(200.0));
    }

    #[test]
    fn test_four_hour_takes_naming_priority() {
        let i = inputs(500.0, 500.0);
        let v = evaluate(&tables(), &series(&[800; 4]), &site(30.0), &i);
        let c = check(&v);
        assert!(c.four_hour_met && c.peak_hour_met);
        assert_eq!(c.criterion, Some(PedestrianFigure::FourHour));
        assert!(v.explanation.starts_with("MET (Four-Hour)"));
    }

    #[test]
    fn test_peak_hour_criterion() {
        let i = inputs(200.0, 50.0);
        let v = evaluate(&tables(), &series(&[800; 4]), &site(30.0), &i);
        let c = check(&v);
        assert_eq!(c.criterion, Some(PedestrianFigure::PeakHour));
        assert_eq!(
            v.explanation,
            "MET (Peak Hour): 200 peds/hr vs 200 threshold (100%)"
        );
    }

    #[test]
    fn test_speed_cutoff_is_35() {
        let i = inputs(0.0, 0.0);
        let v = evaluate(&tables(), &series(&[800; 4]), &site(38.0), &i);
        assert_eq!(check(&v).tier, CurveTier::Reduced);
        assert_eq!(v.determination, Determination::NotMet);
    }

    #[test]
    fn test_short_series_and_below_range() {
        let i = inputs(900.0, 900.0);
        let v = evaluate(&tables(), &series(&[250, 200]), &site(30.0), &i);
        let c = check(&v);
        assert_eq!(c.four_hour_major_vol, 225.0);
        assert_eq!(c.four_hour_threshold, None);
        assert_eq!(c.peak_hour_threshold, None);
        assert_eq!(v.determination, Determination::NotMet);
        assert_eq!(
            v.explanation,
            "NOT MET: 4-hr (900 vs N/A), Peak (900 vs N/A) (100%)"
        );
    }
}
