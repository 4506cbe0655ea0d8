//! Warrant 1: Eight-Hour Vehicular Volume (Table 4C-1).

use crate::roles::{self, resolve};
use crate::series::TrafficSeries;
use crate::site::SiteConditions;
use crate::tables::{VolumeCondition, WarrantTables};
use crate::warrants::types::{
    Determination, EightHourCondition, EightHourEvidence, EightHourRow, Evidence, WarrantId,
    WarrantVerdict,
};

pub const REQUIRED_HOURS: usize = 8;

/// Tests every hour against conditions A and B at the primary tier, and
/// against both again at the combination tier.
///
/// Decision order: A alone, then B alone, then A and B together at the
/// combination tier.
pub fn evaluate(
    tables: &WarrantTables,
    series: &TrafficSeries,
    site: &SiteConditions,
) -> WarrantVerdict {
    if series.len() < REQUIRED_HOURS {
        return WarrantVerdict::insufficient_data(
            WarrantId::EightHourVolume,
            series.len(),
            REQUIRED_HOURS,
        );
    }

    let lane_key = site.lane_key();
    let tier = roles::tier(site, false);
    let combination_tier = roles::tier(site, true);

    let condition_a = tables.volume_pair(VolumeCondition::A, lane_key, tier);
    let condition_b = tables.volume_pair(VolumeCondition::B, lane_key, tier);
    let combination_a = tables.volume_pair(VolumeCondition::A, lane_key, combination_tier);
    let combination_b = tables.volume_pair(VolumeCondition::B, lane_key, combination_tier);

    let roles = resolve(series);

    let hourly: Vec<EightHourRow> = series
        .rows()
        .iter()
        .map(|row| {
            let major_vol = roles.major_of(row);
            let minor_vol = roles.minor_of(row);
            EightHourRow {
                hour: row.hour.clone(),
                major_vol,
                minor_vol,
                meets_a: condition_a.is_met(major_vol, minor_vol),
                meets_b: condition_b.is_met(major_vol, minor_vol),
                meets_combination_a: combination_a.is_met(major_vol, minor_vol),
                meets_combination_b: combination_b.is_met(major_vol, minor_vol),
            }
        })
        .collect();

    let count = |f: fn(&EightHourRow) -> bool| hourly.iter().filter(|r| f(r)).count();
    let hours_a = count(|r| r.meets_a);
    let hours_b = count(|r| r.meets_b);
    let hours_combination_a = count(|r| r.meets_combination_a);
    let hours_combination_b = count(|r| r.meets_combination_b);

    let (condition, hours_met, explanation) = if hours_a >= REQUIRED_HOURS {
        (
            Some(EightHourCondition::A),
            hours_a,
            format!("Condition A MET: {hours_a} hours meet {condition_a} vph threshold ({tier}%)"),
        )
    } else if hours_b >= REQUIRED_HOURS {
        (
            Some(EightHourCondition::B),
            hours_b,
            format!("Condition B MET: {hours_b} hours meet {condition_b} vph threshold ({tier}%)"),
        )
    } else if hours_combination_a >= REQUIRED_HOURS && hours_combination_b >= REQUIRED_HOURS {
        let hours = hours_combination_a.min(hours_combination_b);
        (
            Some(EightHourCondition::Combination),
            hours,
            format!(
                "Combination A+B MET: {hours} hours meet both {combination_a} and \
                 {combination_b} vph thresholds ({combination_tier}%)"
            ),
        )
    } else {
        (
            None,
            hours_a.max(hours_b),
            format!(
                "NOT MET: Condition A ({hours_a}/{REQUIRED_HOURS} hrs), \
                 Condition B ({hours_b}/{REQUIRED_HOURS} hrs) ({tier}%)"
            ),
        )
    };

    WarrantVerdict::new(
        WarrantId::EightHourVolume,
        Determination::from_met(condition.is_some()),
        explanation,
        Evidence::EightHour(EightHourEvidence {
            roles,
            lane_key,
            tier,
            combination_tier,
            condition_a,
            condition_b,
            combination_a,
            combination_b,
            hours_a,
            hours_b,
            hours_combination_a,
            hours_combination_b,
            condition,
            hours_met,
            hourly,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::HourlyCount;
    use crate::tables::{ThresholdTier, VolumeThresholdPair};

    fn tables() -> WarrantTables {
        WarrantTables::mutcd_2009().unwrap()
    }

    fn site(speed_mph: f64, population: u32, major: u32, minor: u32) -> SiteConditions {
        SiteConditions {
            speed_mph,
            population,
            major_lanes: major,
            minor_lanes: minor,
        }
    }

    fn uniform(hours: usize, major: u32, minor: u32) -> TrafficSeries {
        TrafficSeries::new(
            (0..hours)
                .map(|h| HourlyCount::new(format!("{}:00", h + 6), major, minor))
                .collect(),
        )
    }

    fn evidence(v: &WarrantVerdict) -> &EightHourEvidence {
        match &v.evidence {
            Evidence::EightHour(e) => e,
            other => panic!("unexpected evidence {other:?}"),
        }
    }

    #[test]
    fn test_fewer_than_eight_hours_is_not_applicable() {
        let v = evaluate(&tables(), &uniform(7, 900, 300), &site(35.0, 15_000, 1, 1));
        assert_eq!(v.determination, Determination::NotApplicable);
        let expected = Evidence::InsufficientData {
            rows_available: 7,
            rows_required: 8,
        };
        assert_eq!(v.evidence, expected);
    }

    #[test]
    fn test_condition_a_met_at_full_tier() {
        let v = evaluate(&tables(), &uniform(8, 600, 200), &site(35.0, 15_000, 1, 1));
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.condition, Some(EightHourCondition::A));
        assert_eq!(e.hours_met, 8);
        assert_eq!(e.tier, ThresholdTier::Full);
        assert_eq!(e.condition_a.major_vph, 500);
        assert_eq!(e.condition_a.minor_vph, 150);
        assert_eq!(e.hours_b, 0);
    }

    #[test]
    fn test_high_speed_uses_reduced_tier() {
        let v = evaluate(&tables(), &uniform(8, 600, 200), &site(45.0, 15_000, 1, 1));
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.condition, Some(EightHourCondition::A));
        assert_eq!(e.tier, ThresholdTier::Reduced);
        assert_eq!(e.condition_a, VolumeThresholdPair::new(350, 105));
    }

    #[test]
    fn test_condition_b_met() {
        // 800 >= 750 and 80 >= 75, but 80 < 150 so A fails.
        let v = evaluate(&tables(), &uniform(10, 800, 80), &site(35.0, 15_000, 1, 1));
        let e = evidence(&v);
        assert_eq!(e.condition, Some(EightHourCondition::B));
        assert_eq!(e.hours_met, 10);
        assert!(v.explanation.starts_with("Condition B MET: 10 hours"));
    }

    #[test]
    fn test_combination_met_when_neither_alone_is() {
        // 80% tier for 1x1: A = 400/120, B = 600/60.
        // Hours at 620/125 meet both combination pairs but not A (500/150) or B (750/75).
        let v = evaluate(&tables(), &uniform(9, 620, 125), &site(35.0, 15_000, 1, 1));
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.condition, Some(EightHourCondition::Combination));
        assert_eq!(e.combination_tier, ThresholdTier::Combination);
        assert_eq!(e.hours_met, 9);
        assert_eq!((e.hours_a, e.hours_b), (0, 0));
    }

    #[test]
    fn test_not_met_reports_best_condition() {
        let busy = (0..5).map(|h| HourlyCount::new(format!("{h}:00"), 600, 200));
        let quiet = (5..12).map(|h| HourlyCount::new(format!("{h}:00"), 300, 50));
        let series = TrafficSeries::new(busy.chain(quiet).collect());
        let v = evaluate(&tables(), &series, &site(35.0, 15_000, 1, 1));
        let e = evidence(&v);

        assert_eq!(v.determination, Determination::NotMet);
        assert_eq!(e.condition, None);
        assert_eq!(e.hours_met, 5);
        assert_eq!(
            v.explanation,
            "NOT MET: Condition A (5/8 hrs), Condition B (0/8 hrs) (100%)"
        );
    }

    #[test]
    fn test_roles_follow_higher_total() {
        let v = evaluate(&tables(), &uniform(8, 200, 600), &site(35.0, 15_000, 1, 1));
        let e = evidence(&v);
        assert_eq!(v.determination, Determination::Met);
        assert_eq!(e.hourly[0].major_vol, 600);
        assert_eq!(e.hourly[0].minor_vol, 200);
    }

    #[test]
    fn test_hourly_detail_is_complete() {
        let v = evaluate(&tables(), &uniform(12, 600, 200), &site(35.0, 15_000, 2, 1));
        let e = evidence(&v);
        assert_eq!(e.hourly.len(), 12);
        assert_eq!(e.hourly[0].hour, "6:00");
        assert!(e.hourly.iter().all(|r| r.meets_a && !r.meets_b));
    }

    #[test]
    fn test_reevaluation_is_identical() {
        let t = tables();
        let series = uniform(10, 640, 130);
        let s = site(42.0, 25_000, 2, 2);
        assert_eq!(evaluate(&t, &series, &s), evaluate(&t, &series, &s));
    }
}
