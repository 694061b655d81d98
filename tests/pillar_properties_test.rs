use bazi_chart::{compute_pillars, BaziError, BirthMoment, Branch, PillarRole, PillarSource, Stem};
use chrono::{Datelike, NaiveDate};

/// 1900-01-01 到 2100-12-31 每隔 13 天取樣一次
fn sampled_dates() -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    start
        .iter_days()
        .step_by(13)
        .take_while(move |d| *d <= end)
        .chain(std::iter::once(end))
}

fn birth(date: NaiveDate, hour: u32, minute: u32) -> BirthMoment {
    BirthMoment::new(date.year(), date.month(), date.day(), hour, minute)
}

#[test]
fn test_every_sampled_moment_yields_valid_pillars() {
    for date in sampled_dates() {
        for hour in [0, 1, 11, 12, 22, 23] {
            let chart = compute_pillars(&birth(date, hour, 30), None).unwrap();

            assert_eq!(chart.pillars.len(), 4);
            for (pillar, role) in chart.pillars.iter().zip(PillarRole::ALL) {
                assert_eq!(pillar.role, role);
                assert!(pillar.stem.index() < Stem::COUNT);
                assert!(pillar.branch.index() < Branch::COUNT);
            }
            assert!(chart.day().is_sexagenary(), "{} {}h: {}", date, hour, chart.day());
            assert!(chart.day().cycle_index().is_some());
            assert!(chart.year().is_sexagenary());
            assert!(chart.hour().is_sexagenary());
            assert_eq!(chart.tally.total(), 8);
            assert_eq!(chart.day_master(), chart.day().stem);
        }
    }
}

#[test]
fn test_simplified_month_rule_is_preserved() {
    // 公曆月份簡化算法的天干地支奇偶永遠不同
    for date in sampled_dates().step_by(5) {
        let chart = compute_pillars(&birth(date, date.day() % 23, 0), None).unwrap();
        assert!(!chart.month().is_sexagenary());
        assert_eq!(chart.month().branch.index(), (date.month() as usize + 1) % 12);
    }
}

#[test]
fn test_consecutive_days_advance_the_cycle() {
    let mut previous: Option<usize> = None;
    for date in NaiveDate::from_ymd_opt(1999, 12, 1).unwrap().iter_days().take(120) {
        let chart = compute_pillars(&birth(date, 12, 0), None).unwrap();
        let index = chart.day().cycle_index().unwrap();
        if let Some(prev) = previous {
            assert_eq!(index, (prev + 1) % 60);
        }
        previous = Some(index);
    }
}

#[test]
fn test_compute_is_idempotent() {
    let moment = BirthMoment::new(1987, 7, 21, 9, 45).with_location("成都");
    let first = compute_pillars(&moment, None).unwrap();
    let second = compute_pillars(&moment, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hour_23_matches_next_day_midnight() {
    for date in sampled_dates().step_by(3) {
        let Some(next) = date.succ_opt() else { continue };
        if next.year() > 2100 {
            continue;
        }
        let late = compute_pillars(&birth(date, 23, 30), None).unwrap();
        let early = compute_pillars(&birth(next, 0, 0), None).unwrap();
        assert_eq!(late.pillars, early.pillars, "{}", date);
    }
}

#[test]
fn test_reference_epoch_is_geng_zi() {
    let chart = compute_pillars(&BirthMoment::new(1900, 1, 1, 0, 0), None).unwrap();
    assert_eq!(chart.day().stem.index(), 6);
    assert_eq!(chart.day().branch.index(), 0);
    assert_eq!(chart.day().to_string(), "庚子");
}

#[test]
fn test_override_wins_regardless_of_birth_date() {
    for moment in [
        BirthMoment::new(2003, 2, 13, 23, 55),
        BirthMoment::new(1900, 1, 1, 0, 0),
        BirthMoment::new(2100, 12, 31, 12, 0),
    ] {
        let chart = compute_pillars(&moment, Some("癸未甲寅戊午壬子")).unwrap();
        assert_eq!(chart.eight_characters(), "癸未甲寅戊午壬子");
        assert_eq!(chart.year().to_string(), "癸未");
        assert_eq!(chart.month().to_string(), "甲寅");
        assert_eq!(chart.day().to_string(), "戊午");
        assert_eq!(chart.hour().to_string(), "壬子");
        assert_eq!(chart.source, PillarSource::Provided);
    }
}

#[test]
fn test_malformed_override_is_an_error() {
    let moment = BirthMoment::new(2003, 2, 13, 10, 0);
    for bad in ["癸未甲寅戊午壬", "癸未甲寅戊午壬子子", "癸未甲寅戊午壬丑X", "癸未甲寅戊午壬金", ""] {
        let err = compute_pillars(&moment, Some(bad)).unwrap_err();
        assert!(matches!(err, BaziError::InvalidOverride { .. }), "{}", bad);
    }
}

#[test]
fn test_day_31_in_30_day_month() {
    for month in [4, 6, 9, 11] {
        let err = compute_pillars(&BirthMoment::new(2001, month, 31, 8, 0), None).unwrap_err();
        assert!(matches!(err, BaziError::InvalidBirthMoment { .. }));
    }
}
