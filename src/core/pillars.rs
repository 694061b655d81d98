//! 四柱排盤。
//!
//! 計算路徑依序處理子時跨日、年柱、月柱（以公曆月份簡化推算，不看節氣）、
//! 日柱（以 1900-01-01 庚子日為基準）與時柱。使用者提供的八字會直接取代計算結果。

use crate::domain::model::{BaziChart, BirthMoment, ElementTally, Pillar, PillarRole, PillarSource};
use crate::domain::symbols::{Branch, Stem};
use crate::utils::error::{BaziError, Result};
use chrono::{Datelike, NaiveDate, Timelike};

/// 1900-01-01 的 `num_days_from_ce`
const EPOCH_DAYS_FROM_CE: i64 = 693_596;
/// 1900-01-01 定為庚子日
const EPOCH_DAY_STEM: i64 = 6;
const EPOCH_DAY_BRANCH: i64 = 0;

const OVERRIDE_LEN: usize = 8;

pub fn compute_pillars(birth: &BirthMoment, provided: Option<&str>) -> Result<BaziChart> {
    let date = birth.date()?;

    let mut notes = Vec::new();
    if birth.crosses_midnight() {
        tracing::warn!(
            "{:02}:{:02} falls in the next day's zi hour, shifting date",
            birth.hour,
            birth.minute
        );
        notes.push(format!(
            "{}:{:02}属于次日子时，年、月、日柱按次日推算",
            birth.hour, birth.minute
        ));
    }

    let (pillars, source) = match provided {
        Some(text) => {
            let pillars = parse_provided(text)?;
            notes.push("八字由用户提供，未与出生时间核对".to_string());
            (pillars, PillarSource::Provided)
        }
        None => {
            notes.push("月柱按公历月份简化推算，未考虑节气与真太阳时".to_string());
            (computed_pillars(date, birth.hour)?, PillarSource::Computed)
        }
    };

    let chart = BaziChart {
        tally: ElementTally::from_pillars(&pillars),
        pillars,
        notes,
        source,
    };

    tracing::debug!(
        "pillars {} ({:?}), day master {}",
        chart.eight_characters(),
        chart.source,
        chart.day_master()
    );
    Ok(chart)
}

/// 解析使用者提供的八字：第 0/2/4/6 字為天干，第 1/3/5/7 字為地支
pub fn parse_provided(text: &str) -> Result<[Pillar; 4]> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != OVERRIDE_LEN {
        return Err(BaziError::InvalidOverride {
            value: text.to_string(),
            reason: format!("expected {} characters, got {}", OVERRIDE_LEN, chars.len()),
        });
    }

    let mut pillars = [Pillar::new(PillarRole::Year, Stem::from_index(0), Branch::from_index(0)); 4];
    for (slot, (role, pair)) in PillarRole::ALL.iter().zip(chars.chunks(2)).enumerate() {
        let stem = Stem::from_symbol(pair[0]).ok_or_else(|| BaziError::InvalidOverride {
            value: text.to_string(),
            reason: format!("'{}' at position {} is not a heavenly stem", pair[0], slot * 2),
        })?;
        let branch = Branch::from_symbol(pair[1]).ok_or_else(|| BaziError::InvalidOverride {
            value: text.to_string(),
            reason: format!("'{}' at position {} is not an earthly branch", pair[1], slot * 2 + 1),
        })?;
        pillars[slot] = Pillar::new(*role, stem, branch);
    }
    Ok(pillars)
}

fn computed_pillars(date: NaiveDate, hour: u32) -> Result<[Pillar; 4]> {
    let moment = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| BaziError::InvalidBirthMoment {
            field: "hour".to_string(),
            value: hour.to_string(),
            reason: "hour out of range".to_string(),
        })?;
    // 23 點整段歸入次日子時
    let adjusted = if hour == 23 {
        moment + chrono::Duration::hours(1)
    } else {
        moment
    };
    let date = adjusted.date();
    let hour = adjusted.hour() as i64;

    let year = date.year() as i64;
    let month = date.month() as i64;

    let year_stem = Stem::from_index(year - 4);
    let year_branch = Branch::from_index(year - 4);

    let month_stem = Stem::from_index(year_stem.index() as i64 * 2 + month);
    let month_branch = Branch::from_index(month + 1);

    let diff = date.num_days_from_ce() as i64 - EPOCH_DAYS_FROM_CE;
    let day_stem = Stem::from_index(diff + EPOCH_DAY_STEM);
    let day_branch = Branch::from_index(diff + EPOCH_DAY_BRANCH);

    let hour_branch = Branch::from_index((hour + 1) / 2);
    let hour_stem = Stem::from_index(day_stem.index() as i64 * 2 + hour_branch.index() as i64);

    Ok([
        Pillar::new(PillarRole::Year, year_stem, year_branch),
        Pillar::new(PillarRole::Month, month_stem, month_branch),
        Pillar::new(PillarRole::Day, day_stem, day_branch),
        Pillar::new(PillarRole::Hour, hour_stem, hour_branch),
    ])
}
