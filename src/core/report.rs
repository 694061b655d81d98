use crate::domain::model::{BaziChart, ChartRequest, PillarSource};
use crate::domain::ports::ConfigProvider;
use std::fmt::Write;

/// 報告輸出選項
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_subject: bool,
    pub include_notes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_subject: true,
            include_notes: true,
        }
    }
}

impl RenderOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            include_subject: config.include_subject(),
            include_notes: config.include_notes(),
        }
    }
}

/// 產生排盤報告文字。
///
/// 範本本身不含五行字，五行字只出現在每柱說明與五行統計兩處。
pub fn render_chart(request: &ChartRequest, chart: &BaziChart, options: RenderOptions) -> String {
    let mut out = String::new();

    // 寫入 String 不會失敗
    let _ = writeln!(out, "八字排盘结果：");
    let _ = writeln!(out, "================");

    if options.include_subject {
        let birth = &request.birth;
        let midnight = if birth.crosses_midnight() {
            format!("（注：{}:{:02}属于次日子时）", birth.hour, birth.minute)
        } else {
            String::new()
        };
        let _ = writeln!(out, "姓名：{}", request.name);
        let _ = writeln!(out, "性别：{}", request.gender);
        let _ = writeln!(out, "出生时间：{}{}", birth, midnight);
        let _ = writeln!(
            out,
            "出生地点：{}",
            birth.location.as_deref().unwrap_or("未指定")
        );
    }

    let _ = writeln!(out);
    match chart.source {
        PillarSource::Computed => {
            let _ = writeln!(out, "八字四柱：");
        }
        PillarSource::Provided => {
            let _ = writeln!(out, "八字四柱（用户提供）：");
        }
    }
    for pillar in &chart.pillars {
        let marker = if pillar.is_day_master() { " → 日主" } else { "" };
        let _ = writeln!(
            out,
            "{}：{} (天干{}属{}，地支{}属{}){}",
            pillar.role.label(),
            pillar,
            pillar.stem,
            pillar.stem.element(),
            pillar.branch,
            pillar.branch.element(),
            marker
        );
    }

    let stems: Vec<String> = chart.pillars.iter().map(|p| p.stem.element().to_string()).collect();
    let branches: Vec<String> = chart
        .pillars
        .iter()
        .map(|p| p.branch.element().to_string())
        .collect();
    let _ = writeln!(out);
    let _ = writeln!(out, "五行统计：");
    let _ = writeln!(out, "天干：{}", stems.join(" "));
    let _ = writeln!(out, "地支：{}", branches.join(" "));

    if options.include_notes && !chart.notes.is_empty() {
        let _ = writeln!(out);
        for note in &chart.notes {
            let _ = writeln!(out, "注：{}", note);
        }
    }

    out
}
