use crate::core::balance::analyze_balance;
use crate::core::pillars::compute_pillars;
use crate::core::report::{render_chart, RenderOptions};
use crate::domain::model::{BaziChart, BalanceReport, ChartRequest, TallyMode, TallySource};
use crate::domain::ports::{ChartPipeline, ConfigProvider};
use crate::utils::error::Result;

/// 依設定執行排盤、報告與五行分析
pub struct BaziPipeline<C: ConfigProvider> {
    pub(crate) config: C,
}

impl<C: ConfigProvider> BaziPipeline<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }
}

impl<C: ConfigProvider> ChartPipeline for BaziPipeline<C> {
    fn calculate(&self, request: &ChartRequest) -> Result<BaziChart> {
        let provided = request.provided_override();
        if let Some(bazi) = provided {
            tracing::info!("Using provided bazi: {}", bazi);
        }
        compute_pillars(&request.birth, provided)
    }

    fn render(&self, request: &ChartRequest, chart: &BaziChart) -> String {
        render_chart(request, chart, RenderOptions::from_config(&self.config))
    }

    fn analyze(&self, chart: &BaziChart, chart_text: &str) -> Result<BalanceReport> {
        let source = match self.config.tally_mode() {
            TallyMode::Structural => TallySource::Structured(&chart.tally),
            TallyMode::TextScan => TallySource::ReportText(chart_text),
        };
        analyze_balance(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BirthMoment, Gender};
    use crate::domain::symbols::Element;

    struct TestConfig {
        mode: TallyMode,
    }

    impl ConfigProvider for TestConfig {
        fn tally_mode(&self) -> TallyMode {
            self.mode
        }

        fn include_subject(&self) -> bool {
            true
        }

        fn include_notes(&self) -> bool {
            true
        }
    }

    fn run(mode: TallyMode, name: &str) -> BalanceReport {
        let pipeline = BaziPipeline::new(TestConfig { mode });
        let request = ChartRequest::new(name, Gender::Male, BirthMoment::new(1900, 1, 1, 0, 0));
        let chart = pipeline.calculate(&request).unwrap();
        let text = pipeline.render(&request, &chart);
        pipeline.analyze(&chart, &text).unwrap()
    }

    #[test]
    fn test_structural_mode_counts_eight_symbols() {
        let report = run(TallyMode::Structural, "张三");
        assert_eq!(report.tally.total(), 8);
        assert!(report.missing.contains(&Element::Earth));
        assert!(report.excess.contains(&Element::Water));
    }

    #[test]
    fn test_text_scan_mode_agrees_on_neutral_report() {
        let structural = run(TallyMode::Structural, "张三");
        let scanned = run(TallyMode::TextScan, "张三");
        assert_eq!(scanned.tally.total(), 16);
        assert_eq!(scanned.classifications, structural.classifications);
    }

    #[test]
    fn test_text_scan_mode_picks_up_subject_name() {
        // 名字裡的五行字也會被計入
        let scanned = run(TallyMode::TextScan, "金土");
        assert_eq!(scanned.tally.total(), 18);
        assert!(scanned.missing.is_empty());
    }
}
