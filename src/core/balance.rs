use crate::domain::model::{BalanceLevel, BalanceReport, ElementTally, TallySource};
use crate::domain::symbols::Element;
use crate::utils::error::{BaziError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 五行平衡分析：>30% 偏旺，<10% 偏弱，其餘平衡
pub fn analyze_balance(source: TallySource<'_>) -> Result<BalanceReport> {
    if let TallySource::ReportText(_) = source {
        tracing::warn!("Counting elements by text scan; results may include unrelated characters");
    }

    let tally = source.tally();
    let total = tally.total();
    if total == 0 {
        return Err(BaziError::NoElementDataFound);
    }

    let mut percentages = BTreeMap::new();
    let mut classifications = BTreeMap::new();
    let mut deficient = BTreeSet::new();
    let mut excess = BTreeSet::new();
    let mut missing = BTreeSet::new();

    for (element, count) in tally.iter() {
        let percentage = count as f64 / total as f64 * 100.0;
        let level = BalanceLevel::classify(percentage);
        match level {
            BalanceLevel::Excess => {
                excess.insert(element);
            }
            BalanceLevel::Deficient => {
                deficient.insert(element);
            }
            BalanceLevel::Balanced => {}
        }
        if count == 0 {
            missing.insert(element);
        }
        percentages.insert(element, percentage);
        classifications.insert(element, level);
    }

    let advice = compose_advice(&missing, &excess);
    tracing::info!(
        "Element balance over {} symbols: excess {:?}, missing {:?}",
        total,
        excess,
        missing
    );

    Ok(BalanceReport {
        tally,
        percentages,
        classifications,
        deficient,
        excess,
        missing,
        advice,
    })
}

fn compose_advice(missing: &BTreeSet<Element>, excess: &BTreeSet<Element>) -> String {
    let mut lines = Vec::new();
    if !missing.is_empty() {
        lines.push(format!("缺失五行：{}，建议在生活中适当补充。", join_in_report_order(missing)));
    }
    if !excess.is_empty() {
        lines.push(format!("过旺五行：{}，建议适当克制。", join_in_report_order(excess)));
    }
    if lines.is_empty() {
        lines.push("五行分布较为均衡，无明显缺失或过旺。".to_string());
    }
    lines.join("\n")
}

fn join_in_report_order(elements: &BTreeSet<Element>) -> String {
    Element::REPORT_ORDER
        .into_iter()
        .filter(|e| elements.contains(e))
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("、")
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "五行平衡分析：")?;
        writeln!(f, "================")?;
        for element in Element::REPORT_ORDER {
            let percentage = self.percentages.get(&element).copied().unwrap_or(0.0);
            let level = self.level(element).unwrap_or(BalanceLevel::Deficient);
            writeln!(
                f,
                "{}：{}个 ({:.1}%) - {}",
                element,
                self.tally.count(element),
                percentage,
                level.label()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "五行建议：")?;
        writeln!(f, "{}", self.advice)
    }
}

/// 直接從結構化計數分析
pub fn analyze_tally(tally: &ElementTally) -> Result<BalanceReport> {
    analyze_balance(TallySource::Structured(tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_of(symbols: &str) -> ElementTally {
        ElementTally::scan_text(symbols)
    }

    #[test]
    fn test_excess_and_missing() {
        // 癸未甲寅戊午壬子：水3 木2 土2 火1 金0
        let report = analyze_tally(&tally_of("水土木木土火水水")).unwrap();

        assert_eq!(report.level(Element::Water), Some(BalanceLevel::Excess));
        assert_eq!(report.level(Element::Wood), Some(BalanceLevel::Balanced));
        assert_eq!(report.level(Element::Fire), Some(BalanceLevel::Balanced));
        assert_eq!(report.level(Element::Metal), Some(BalanceLevel::Deficient));
        assert_eq!(report.percentages[&Element::Water], 37.5);
        assert_eq!(report.percentages[&Element::Fire], 12.5);

        assert!(report.excess.contains(&Element::Water));
        assert_eq!(report.missing.iter().copied().collect::<Vec<_>>(), vec![Element::Metal]);
        assert!(report.advice.contains("缺失五行：金"));
        assert!(report.advice.contains("过旺五行：水"));
    }

    #[test]
    fn test_deficient_but_present_is_not_missing() {
        // 木 1/11 ≈ 9.1%
        let report = analyze_tally(&tally_of("木火火火土土金金金水水")).unwrap();
        assert!(report.deficient.contains(&Element::Wood));
        assert!(report.missing.is_empty());
        assert!(!report.advice.contains("缺失五行"));
    }

    #[test]
    fn test_even_distribution_advice() {
        let report = analyze_tally(&tally_of("木木火火土土金金水水")).unwrap();
        assert!(report.excess.is_empty());
        assert!(report.deficient.is_empty());
        assert_eq!(report.advice, "五行分布较为均衡，无明显缺失或过旺。");
    }

    #[test]
    fn test_missing_listed_in_report_order() {
        let report = analyze_tally(&tally_of("土土土土")).unwrap();
        assert!(report.advice.contains("缺失五行：金、木、水、火"));
        assert_eq!(report.percentages[&Element::Earth], 100.0);
    }

    #[test]
    fn test_empty_tally_fails() {
        let err = analyze_tally(&ElementTally::default()).unwrap_err();
        assert!(matches!(err, BaziError::NoElementDataFound));

        let err = analyze_balance(TallySource::ReportText("八字排盘结果")).unwrap_err();
        assert!(matches!(err, BaziError::NoElementDataFound));
    }

    #[test]
    fn test_display_lines() {
        let report = analyze_tally(&tally_of("水土木木土火水水")).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("五行平衡分析："));
        assert!(text.contains("金：0个 (0.0%) - 偏弱"));
        assert!(text.contains("水：3个 (37.5%) - 偏旺"));
        assert!(text.contains("火：1个 (12.5%) - 平衡"));
    }
}
