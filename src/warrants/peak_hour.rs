//! Warrant 3: Peak Hour (Figures 4C-3 and 4C-4).

use crate::roles::{curve_tier, resolve};
use crate::series::TrafficSeries;
use crate::site::SiteConditions;
use crate::tables::WarrantTables;
use crate::warrants::types::{Determination, Evidence, PeakHourEvidence, WarrantId, WarrantVerdict};

/// Tests the single busiest hour (major + minor) against the peak-hour curve.
///
/// Ties go to the earliest hour. A peak whose major volume is below the
/// curve's range is not met, with its own explanation.
pub fn evaluate(
    tables: &WarrantTables,
    series: &TrafficSeries,
    site: &SiteConditions,
) -> WarrantVerdict {
    let roles = resolve(series);

    let mut peak = None;
    for row in series.rows() {
        let total = u64::from(roles.major_of(row)) + u64::from(roles.minor_of(row));
        if peak.is_none_or(|(best, _)| total > best) {
            peak = Some((total, row));
        }
    }

    let Some((_, peak_row)) = peak else {
        return WarrantVerdict::insufficient_data(WarrantId::PeakHour, 0, 1);
    };

    let lane_key = site.lane_key();
    let tier = curve_tier(site);
    let curve = tables.peak_hour_curve(lane_key, tier);

    let peak_major = roles.major_of(peak_row);
    let peak_minor = roles.minor_of(peak_row);
    let threshold = curve.threshold_for(f64::from(peak_major));

    let (met, explanation) = match threshold {
        Some(t) => {
            let met = f64::from(peak_minor) >= t;
            (
                met,
                format!(
                    "{}: Peak hour ({}) - {peak_minor} vph vs {t} vph threshold ({tier}%)",
                    if met { "MET" } else { "NOT MET" },
                    peak_row.hour,
                ),
            )
        }
        None => (
            false,
            format!(
                "NOT MET: Major volume below curve range ({peak_major} vph < {} vph at peak hour {})",
                curve.min_major(),
                peak_row.hour,
            ),
        ),
    };

    WarrantVerdict::new(
        WarrantId::PeakHour,
        Determination::from_met(met),
        explanation,
        Evidence::PeakHour(PeakHourEvidence {
            roles,
            lane_key,
            tier,
            curve: curve.clone(),
            peak_hour: peak_row.hour.clone(),
            peak_major,
            peak_minor,
            threshold,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::HourlyCount;

    fn tables() -> WarrantTables {
        WarrantTables::mutcd_2009().unwrap()
    }

    fn site() -> SiteConditions {
        SiteConditions {
            speed_mph: 30.0,
            population: 20_000,
            major_lanes: 1,
            minor_lanes: 1,
        }
    }

    fn evidence(v: &WarrantVerdict) -> &PeakHourEvidence {
        match &v.evidence {
            Evidence::PeakHour(e) => e,
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_empty_series_not_applicable() {
        let v = evaluate(&tables(), &TrafficSeries::default(), &site());
        assert_eq!(v.determination, Determination::NotApplicable);
    }

    #[test]
    fn test_major_below_curve_range() {
        let series = TrafficSeries::new(vec![HourlyCount::new("8:00", 250, 200)]);
        let v = evaluate(&tables(), &series, &site());
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::NotMet);
        assert_eq!(e.threshold, None);
        assert!(v.explanation.contains("Major volume below curve range"));
        assert!(!v.explanation.contains("threshold"));
    }

    #[test]
    fn test_peak_hour_met() {
        // 1x1 at 100%: threshold at 700 is 105.
        let series = TrafficSeries::new(vec![
            HourlyCount::new("7:00", 500, 60),
            HourlyCount::new("8:00", 700, 110),
            HourlyCount::new("9:00", 600, 90),
        ]);
        let v = evaluate(&tables(), &series, &site());
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.peak_hour, "8:00");
        assert_eq!((e.peak_major, e.peak_minor), (700, 110));
        assert_eq!(e.threshold, Some(105.0));
        assert_eq!(
            v.explanation,
            "MET: Peak hour (8:00) - 110 vph vs 105 vph threshold (100%)"
        );
    }

    #[test]
    fn test_peak_hour_below_threshold() {
        // Threshold at 550 is 127.5.
        let series = TrafficSeries::new(vec![HourlyCount::new("17:00", 550, 127)]);
        let v = evaluate(&tables(), &series, &site());
        assert_eq!(v.determination, Determination::NotMet);
        assert_eq!(evidence(&v).threshold, Some(127.5));
    }

    #[test]
    fn test_tie_takes_first_hour() {
        let series = TrafficSeries::new(vec![
            HourlyCount::new("7:00", 800, 100),
            HourlyCount::new("8:00", 850, 50),
        ]);
        let v = evaluate(&tables(), &series, &site());
        assert_eq!(evidence(&v).peak_hour, "7:00");
    }
}
