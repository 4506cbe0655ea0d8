//! Warrant 2: Four-Hour Vehicular Volume (Figures 4C-1 and 4C-2).

use crate::roles::{curve_tier, resolve};
use crate::series::TrafficSeries;
use crate::site::SiteConditions;
use crate::tables::WarrantTables;
use crate::warrants::types::{
    CurveHourRow, Determination, Evidence, FourHourEvidence, WarrantId, WarrantVerdict,
};

pub const REQUIRED_HOURS: usize = 4;

pub fn evaluate(
    tables: &WarrantTables,
    series: &TrafficSeries,
    site: &SiteConditions,
) -> WarrantVerdict {
    if series.len() < REQUIRED_HOURS {
        return WarrantVerdict::insufficient_data(
            WarrantId::FourHourVolume,
            series.len(),
            REQUIRED_HOURS,
        );
    }

    let lane_key = site.lane_key();
    let tier = curve_tier(site);
    let curve = tables.four_hour_curve(lane_key, tier);
    let roles = resolve(series);

    let hourly: Vec<CurveHourRow> = series
        .rows()
        .iter()
        .map(|row| {
            let major_vol = roles.major_of(row);
            let minor_vol = roles.minor_of(row);
            let threshold = curve.threshold_for(f64::from(major_vol));
            CurveHourRow {
                hour: row.hour.clone(),
                major_vol,
                minor_vol,
                threshold,
                above_curve: threshold.is_some_and(|t| f64::from(minor_vol) >= t),
            }
        })
        .collect();

    let hours_met = hourly.iter().filter(|r| r.above_curve).count();
    let met = hours_met >= REQUIRED_HOURS;
    let explanation = format!(
        "{}: {hours_met}/{REQUIRED_HOURS} hours above curve ({tier}%)",
        if met { "MET" } else { "NOT MET" }
    );

    WarrantVerdict::new(
        WarrantId::FourHourVolume,
        Determination::from_met(met),
        explanation,
        Evidence::FourHour(FourHourEvidence {
            roles,
            lane_key,
            tier,
            curve: curve.clone(),
            hours_met,
            hourly,
        }),
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

    fn one_by_one(speed_mph: f64) -> SiteConditions {
        SiteConditions {
            speed_mph,
            population: 50_000,
            major_lanes: 1,
            minor_lanes: 1,
        }
    }

    fn series(rows: &[(u32, u32)]) -> TrafficSeries {
        TrafficSeries::new(
            rows.iter()
                .enumerate()
                .map(|(i, (s1, s2))| HourlyCount::new(format!("{}:00", i + 7), *s1, *s2))
                .collect(),
        )
    }

    fn evidence(v: &WarrantVerdict) -> &FourHourEvidence {
        match &v.evidence {
            Evidence::FourHour(e) => e,
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_three_rows_not_applicable() {
        let v = evaluate(&tables(), &series(&[(900, 300); 3]), &one_by_one(35.0));
        assert_eq!(v.determination, Determination::NotApplicable);
    }

    #[test]
    fn test_four_hours_above_curve() {
        // 1x1 at 100%: threshold at 600 is 80.
        let v = evaluate(&tables(), &series(&[(600, 80); 4]), &one_by_one(35.0));
        let e = evidence(&v);
        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.hours_met, 4);
        assert_eq!(e.hourly[0].threshold, Some(80.0));
        assert_eq!(v.explanation, "MET: 4/4 hours above curve (100%)");
    }

    #[test]
    fn test_below_range_hours_never_pass() {
        // 250 is below the first breakpoint (300), so even large minor volumes fail.
        let rows = [(250, 240), (250, 240), (600, 80), (600, 80), (600, 80)];
        let v = evaluate(&tables(), &series(&rows), &one_by_one(35.0));
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::NotMet);
        assert_eq!(e.hours_met, 3);
        assert_eq!(e.hourly[0].threshold, None);
        assert!(!e.hourly[0].above_curve);
    }

    #[test]
    fn test_interpolated_threshold_is_used() {
        // Between (400, 100) and (500, 90): threshold at 450 is 95.
        let rows = [(450, 95), (450, 95), (450, 95), (450, 94)];
        let v = evaluate(&tables(), &series(&rows), &one_by_one(35.0));
        let e = evidence(&v);
        assert_eq!(e.hourly[0].threshold, Some(95.0));
        assert_eq!(e.hours_met, 3);
        assert_eq!(v.determination, Determination::NotMet);
    }

    #[test]
    fn test_reduced_curve_for_high_speed() {
        let v = evaluate(&tables(), &series(&[(420, 56); 4]), &one_by_one(50.0));
        let e = evidence(&v);
        assert_eq!(e.tier, CurveTier::Reduced);
        assert_eq!(v.determination, Determination::Met);
        assert_eq!(v.explanation, "MET: 4/4 hours above curve (70%)");
    }
}
